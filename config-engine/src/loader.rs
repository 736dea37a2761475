use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::settings::ClinicConfig;
use crate::validator::ConfigValidator;

/// Prefix for configuration environment variables, e.g. `CLINIC__SERVER__PORT`
pub const ENV_PREFIX: &str = "CLINIC";

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_NAME: &str = "clinic";

/// Layers built-in defaults, an optional file and the environment.
///
/// Later layers win: defaults, then `clinic.toml`/`clinic.yaml` (or the
/// explicit file), then `CLINIC__*` variables.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this file instead of looking for `clinic.*`; it must exist
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Read variables from `vars` instead of the process environment
    pub fn with_env(mut self, vars: HashMap<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    pub fn load(self) -> Result<ClinicConfig> {
        let mut builder = Config::builder();

        builder = match &self.file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::SourceNotFound(path.display().to_string()));
                }
                debug!("Loading configuration from {}", path.display());
                builder.add_source(File::from(path.as_path()).required(true))
            }
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true);
        let environment = match self.env {
            Some(vars) => environment.source(Some(vars)),
            None => {
                // .env only feeds the real process environment
                dotenvy::dotenv().ok();
                environment
            }
        };

        let config: ClinicConfig = builder.add_source(environment).build()?.try_deserialize()?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
