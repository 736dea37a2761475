use crate::error::{ConfigError, Result};
use crate::settings::ClinicConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Semantic checks the type system cannot express
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &ClinicConfig) -> Result<()> {
        let mut problems = Vec::new();

        if config.server.port == 0 {
            problems.push("server.port must not be 0".to_string());
        }
        if config.server.host.trim().is_empty() {
            problems.push("server.host is required".to_string());
        }
        if config.database.min_connections > config.database.max_connections {
            problems.push(format!(
                "database.min_connections ({}) exceeds database.max_connections ({})",
                config.database.min_connections, config.database.max_connections
            ));
        }
        if config.database.max_connections == 0 {
            problems.push("database.max_connections must be at least 1".to_string());
        }
        if config.ledger.max_conflict_retries == 0 {
            problems.push("ledger.max_conflict_retries must be at least 1".to_string());
        }
        if !LOG_LEVELS.contains(&config.logging.log_level.to_lowercase().as_str()) {
            problems.push(format!("logging.log_level '{}' is not a level", config.logging.log_level));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError(problems.join("; ")))
        }
    }
}
