//! Logging for the BiteCare clinic engine with automatic contact-data redaction
//!
//! Patient intake, employee records and branch details carry e-mail
//! addresses and mobile numbers. Free-text log messages built from those
//! records go through [`redacted_info!`], [`redacted_warn!`] or
//! [`redacted_error!`], which run the [`PiiRedactor`] over the formatted
//! message before handing it to `tracing`. Structured fields should only
//! ever carry record ids.
//!
//! # Example
//!
//! ```rust,no_run
//! use logger_redacted::{init_tracing, redacted_info, LoggerConfig};
//!
//! init_tracing(&LoggerConfig::default()).ok();
//! redacted_info!("Employee {} created", "juan@example.com");
//! // Output: "Employee EMAIL[...] created"
//! ```

pub mod config;
pub mod macros;
pub mod redactor;
pub mod subscriber;

pub use config::*;
pub use redactor::*;
pub use subscriber::*;

// re-exported for the logging macros
pub use tracing;

use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};

lazy_static! {
    static ref GLOBAL_REDACTOR: PiiRedactor = PiiRedactor::default();
}

static REDACTION_ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn message redaction on or off for the whole process
pub fn set_redaction_enabled(enabled: bool) {
    REDACTION_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Redact a formatted message with the process-wide redactor
pub fn redact_message(message: &str) -> String {
    if REDACTION_ENABLED.load(Ordering::Relaxed) {
        GLOBAL_REDACTOR.redact(message)
    } else {
        message.to_string()
    }
}
