use error_common::{ClinicError, Result};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggerConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when present.
pub fn init_tracing(config: &LoggerConfig) -> Result<()> {
    crate::set_redaction_enabled(config.redaction_enabled);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_filter()))
        .map_err(|e| ClinicError::ConfigError(format!("Invalid log filter: {e}")))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.json {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_line_number(true),
            )
            .try_init()
    };

    installed.map_err(|e| ClinicError::InternalError(format!("Failed to install tracing subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_includes_services() {
        let config = LoggerConfig {
            log_level: "debug".to_string(),
            directives: vec!["hyper=warn".to_string()],
            ..Default::default()
        };
        let filter = config.default_filter();
        assert!(filter.contains("inventory_service=debug"));
        assert!(filter.ends_with(",hyper=warn"));
        assert!(EnvFilter::try_new(filter).is_ok());
    }

    #[test]
    fn test_redaction_switch() {
        crate::set_redaction_enabled(true);
        assert!(!crate::redact_message("call 09171234567").contains("0917"));
    }
}
