use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("debounce_ms must be greater than zero in debounced mode")]
    InvalidDebounce,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How `form_is_valid` follows the field states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ValidityMode {
    /// Recomputed on every field action; the login button is disabled while invalid.
    Immediate,
    /// Recomputed once the fields have been idle for the debounce delay.
    #[default]
    Debounced,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub mode: ValidityMode,
    pub debounce_ms: u64,
    /// Pre-filled email value, left unvalidated until the field is blurred or edited.
    pub email: Option<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            mode: ValidityMode::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            email: None,
        }
    }
}

/// Values that take precedence over the config file, typically CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub mode: Option<ValidityMode>,
    pub debounce_ms: Option<u64>,
    pub email: Option<String>,
}

impl FormConfig {
    /// Reads `path` if given, applies `overrides`, then validates the result.
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> ConfigResult<Self> {
        match path {
            Some(path) => {
                let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                Self::from_yaml_with(&source, overrides)
            }
            None => Self::default().with_overrides(overrides),
        }
    }

    pub fn from_yaml_with(source: &str, overrides: ConfigOverrides) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(source)?;
        config.with_overrides(overrides)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> ConfigResult<Self> {
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(ms) = overrides.debounce_ms {
            self.debounce_ms = ms;
        }
        if overrides.email.is_some() {
            self.email = overrides.email;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.mode == ValidityMode::Debounced && self.debounce_ms == 0 {
            return Err(ConfigError::InvalidDebounce);
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
