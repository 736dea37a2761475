use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

lazy_static! {
    static ref EMAIL_REGEX: Option<Regex> =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").ok();
    // Philippine mobile numbers: 09171234567, +63 917 123 4567, 63-917-123-4567
    static ref MOBILE_REGEX: Option<Regex> =
        Regex::new(r"(?:\+63|\b63|\b0)[-\s]?9\d{2}[-\s]?\d{3}[-\s]?\d{4}\b").ok();
    // Metro Manila landlines: (02) 8123-4567, 02-8123-4567
    static ref LANDLINE_REGEX: Option<Regex> =
        Regex::new(r"\(?\b0?2\)?[-\s]?\d{4}[-\s]\d{4}\b").ok();
    static ref IP_REGEX: Option<Regex> =
        Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").ok();
}

/// Contact-data redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_phones: bool,
    pub redact_ip_addresses: bool,
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_phones: true,
            redact_ip_addresses: true,
            hash_for_correlation: true,
            custom_patterns: Vec::new(),
        }
    }
}

/// Redactor for free-text log messages
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }

        if self.config.redact_phones {
            result = self.redact_phones(&result);
        }

        if self.config.redact_ip_addresses {
            result = self.redact_ip_addresses(&result);
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).to_string();
        }

        result
    }

    fn redact_emails(&self, text: &str) -> String {
        let Some(regex) = EMAIL_REGEX.as_ref() else {
            return text.to_string();
        };
        regex
            .replace_all(text, |caps: &regex::Captures| {
                let email = &caps[0];
                if self.config.hash_for_correlation {
                    format!("EMAIL[{}]", self.hash_value(email))
                } else {
                    match email.split_once('@') {
                        Some((local, domain)) => format!(
                            "{}***@{}***",
                            local.chars().next().unwrap_or('*'),
                            domain.chars().next().unwrap_or('*')
                        ),
                        None => "***@***".to_string(),
                    }
                }
            })
            .to_string()
    }

    fn redact_phones(&self, text: &str) -> String {
        let mut result = text.to_string();
        for regex in [MOBILE_REGEX.as_ref(), LANDLINE_REGEX.as_ref()].into_iter().flatten() {
            result = regex
                .replace_all(&result, |caps: &regex::Captures| {
                    if self.config.hash_for_correlation {
                        format!("PHONE[{}]", self.hash_value(&caps[0]))
                    } else {
                        "***-***-****".to_string()
                    }
                })
                .to_string();
        }
        result
    }

    fn redact_ip_addresses(&self, text: &str) -> String {
        let Some(regex) = IP_REGEX.as_ref() else {
            return text.to_string();
        };
        regex
            .replace_all(text, |caps: &regex::Captures| {
                if self.config.hash_for_correlation {
                    format!("IP[{}]", self.hash_value(&caps[0]))
                } else {
                    let ip = &caps[0];
                    match (ip.split('.').next(), ip.rsplit('.').next()) {
                        (Some(first), Some(last)) => format!("{first}.***.***.{last}"),
                        _ => "***.***.***.***".to_string(),
                    }
                }
            })
            .to_string()
    }

    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let digest = hasher.finalize();
        // first 8 bytes keep the marker short while still correlating
        general_purpose::STANDARD.encode(&digest[..8])
    }
}

impl Default for PiiRedactor {
    fn default() -> Self {
        Self::new(RedactionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masking_redactor() -> PiiRedactor {
        PiiRedactor::new(RedactionConfig {
            hash_for_correlation: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_email_redaction() {
        let redacted = masking_redactor().redact("Employee juan.delacruz@example.com created");
        assert!(redacted.contains("j***@e***"));
        assert!(!redacted.contains("delacruz"));
    }

    #[test]
    fn test_mobile_redaction() {
        let redactor = masking_redactor();
        for text in ["Contact 09171234567", "Contact +63 917 123 4567"] {
            let redacted = redactor.redact(text);
            assert_eq!(redacted, "Contact ***-***-****", "input: {text}");
        }
    }

    #[test]
    fn test_hashing_is_stable() {
        let redactor = PiiRedactor::default();
        let first = redactor.redact("next of kin 09171234567");
        let second = redactor.redact("next of kin 09171234567");
        assert_eq!(first, second);
        assert!(first.starts_with("next of kin PHONE["));
    }

    #[test]
    fn test_ids_are_left_alone() {
        let redactor = PiiRedactor::default();
        let text = "appointment 7d3f9c2e-51a8-4b8e-9d0e-2f6b1c4a9e11 settled";
        assert_eq!(redactor.redact(text), text);
    }
}
