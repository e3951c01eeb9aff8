//! Layered server settings.
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional TOML
//! file, then `SLRG__SECTION__KEY` environment variables.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use slrg_core::paging::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use slrg_core::{default_log_level, PageLimits};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "slrg.toml";
pub const ENV_PREFIX: &str = "SLRG";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: PathBuf,
    /// Ignore `path` and keep everything in memory (lost on exit).
    pub in_memory: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    /// Absolute directory for rotating log files; stderr when unset.
    #[serde(default)]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
    pub paging: PageLimits,
}

impl Settings {
    /// Loads settings from defaults, `config_path` (or `slrg.toml` if
    /// present) and the process environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(config_path, Self::environment())
    }

    /// Environment source used by [`Settings::load`].
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    /// Same as [`Settings::load`] with an explicit environment source.
    ///
    /// An explicit `config_path` must exist; the default file is optional.
    pub fn load_from(
        config_path: Option<&Path>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE)
                .format(FileFormat::Toml)
                .required(false),
        };

        let settings: Self = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080_i64)?
            .set_default("database.path", "slrg.sqlite3")?
            .set_default("database.in_memory", false)?
            .set_default("logging.level", default_log_level())?
            .set_default("paging.default_size", i64::from(DEFAULT_PAGE_SIZE))?
            .set_default("paging.max_size", i64::from(MAX_PAGE_SIZE))?
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.paging.max_size == 0 {
            return Err(ConfigError::Message(
                "paging.max_size must be at least 1".to_string(),
            ));
        }
        if self.paging.default_size > self.paging.max_size {
            return Err(ConfigError::Message(format!(
                "paging.default_size ({}) exceeds paging.max_size ({})",
                self.paging.default_size, self.paging.max_size
            )));
        }
        if !self.database.in_memory && self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Message(
                "database.path must be set unless database.in_memory is true".to_string(),
            ));
        }
        Ok(())
    }
}
