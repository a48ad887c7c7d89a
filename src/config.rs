//! Layered configuration.
//!
//! Settings are resolved from three layers: built-in defaults, an optional
//! `decalc.toml` file, then environment variables prefixed with `DECALC_`
//! (double underscore separates nested levels, so
//! `DECALC_LOGGING__DEFAULT=debug` sets `logging.default`). A `.env` file
//! is honored when the binary loads it before reading settings.
//!
//! Invalid raw values fail fast at startup with a [`ConfigError`]; nothing
//! later in the session re-reads the environment.

use std::collections::HashMap;
use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "decalc.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Where history is persisted.
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,

    /// Rewrite the history file after every calculation.
    #[serde(default = "default_true")]
    pub auto_save: bool,

    /// Upper bound on rows retained when loading history. Must be positive.
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Global debug mode.
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default log level filter (error, warn, info, debug, trace).
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module level overrides, e.g. `repl = "debug"`.
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_history_file() -> PathBuf {
    PathBuf::from("history.csv")
}
fn default_max_history() -> usize {
    1000
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_file: default_history_file(),
            auto_save: true,
            max_history: default_max_history(),
            debug: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources: defaults, then `decalc.toml`
    /// in the current directory, then `DECALC_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Figment::new().merge(Toml::file(CONFIG_FILE)))
    }

    /// Load configuration from a specific TOML file plus the environment.
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        Self::from_figment(Figment::new().merge(Toml::file(path.as_ref())))
    }

    fn from_figment(file_layer: Figment) -> Result<Self, ConfigError> {
        let settings: Settings = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(file_layer)
            .merge(Env::prefixed("DECALC_").map(|key| {
                // Double underscore becomes a nesting dot; single
                // underscores stay part of the field name.
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values figment cannot rule out on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_history",
                reason: "must be a positive integer".to_string(),
            });
        }
        Ok(())
    }
}
