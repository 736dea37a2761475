//! Helpers for reporting `validator` failures as one message.

use std::borrow::Cow;

use itertools::Itertools;
use validator::{ValidationError, ValidationErrors};

/// Prefix every joined validation message starts with.
pub const VALIDATION_PREFIX: &str = "Validation Error: ";

/// Build a field error carrying a display message.
pub fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Forms whose failures are reported in field declaration order.
pub trait FormFields {
    /// Field names in the order the form declares them
    const FIELDS: &'static [&'static str];
}

/// Collect every field message in the order of `fields`.
///
/// Fields missing from `fields` come last, ordered by name.
pub fn validation_messages(errors: &ValidationErrors, fields: &[&str]) -> Vec<String> {
    errors
        .field_errors()
        .into_iter()
        .sorted_by_cached_key(|(field, _)| {
            let name: &str = field;
            let position = fields.iter().position(|f| *f == name).unwrap_or(fields.len());
            (position, name.to_string())
        })
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid."),
            })
        })
        .collect()
}

/// Join all failures into `"Validation Error: a, b"`.
pub fn join_validation_errors(errors: &ValidationErrors, fields: &[&str]) -> String {
    format!("{VALIDATION_PREFIX}{}", validation_messages(errors, fields).join(", "))
}

/// Merge the outcome of a derived `validate()` call with hand-written
/// checks, returning `Err` when either produced a failure.
pub fn finish_validation(
    derived: Result<(), ValidationErrors>,
    extra: Vec<(&'static str, ValidationError)>,
) -> Result<(), ValidationErrors> {
    let mut errors = match derived {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };
    for (field, error) in extra {
        errors.add(field, error);
    }
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
