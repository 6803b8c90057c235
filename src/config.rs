use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "toml-config")]
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("config files need the `toml-config` feature")]
    Unsupported,
}

/// Settings for the demonstration driver.
///
/// Every field is optional in the file; missing ones keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// How long the slow sample functions sleep, in milliseconds.
    pub sleep_ms: u64,
    /// Repetition count used by the repeat section.
    pub repeat: usize,
    /// Print cache statistics as JSON.
    pub json: bool,
    /// Collect section output instead of printing it.
    pub quiet: bool,
}

impl DriverConfig {
    pub const MAX_REPEAT: usize = 1_000;
    pub const MAX_SLEEP_MS: u64 = 10_000;

    #[cfg(feature = "toml-config")]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    #[cfg(not(feature = "toml-config"))]
    pub fn load(_path: &Path) -> Result<Self, ConfigError> {
        Err(ConfigError::Unsupported)
    }

    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repeat > Self::MAX_REPEAT {
            return Err(ConfigError::Invalid {
                field: "repeat",
                reason: format!("{} exceeds the maximum of {}", self.repeat, Self::MAX_REPEAT),
            });
        }
        if self.sleep_ms > Self::MAX_SLEEP_MS {
            return Err(ConfigError::Invalid {
                field: "sleep_ms",
                reason: format!(
                    "{} exceeds the maximum of {}",
                    self.sleep_ms,
                    Self::MAX_SLEEP_MS
                ),
            });
        }
        Ok(())
    }

    pub fn sleep(&self) -> Duration {
        Duration::from_millis(self.sleep_ms)
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            sleep_ms: 250,
            repeat: 3,
            json: false,
            quiet: false,
        }
    }
}
