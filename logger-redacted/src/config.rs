// Logger configuration
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggerConfig {
    /// Redact contact data from free-text messages
    pub redaction_enabled: bool,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Default level for the engine's own crates
    pub log_level: String,
    /// Extra `EnvFilter` directives appended after the defaults
    pub directives: Vec<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            redaction_enabled: true,
            json: false,
            log_level: "info".to_string(),
            directives: Vec::new(),
        }
    }
}

impl LoggerConfig {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> String {
        let level = &self.log_level;
        let mut filter = format!(
            "clinic_server={level},appointment_service={level},billing_service={level},\
             inventory_service={level},database_layer={level},tower_http=info,sqlx=warn"
        );
        for directive in &self.directives {
            filter.push(',');
            filter.push_str(directive);
        }
        filter
    }
}
