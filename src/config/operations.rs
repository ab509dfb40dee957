//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{Result, TidyError};
use log::debug;
use std::io::ErrorKind;
use std::path::Path;

/// Smallest width that still leaves room for a character before `...`.
const MIN_DESCRIPTION_WIDTH: usize = 4;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(TidyError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            TidyError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from `path` if it exists, otherwise use defaults.
    ///
    /// Any other read failure is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::metadata(path) {
            Ok(_) => Self::load(path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(TidyError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| TidyError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| TidyError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `trunk_branch` and `remote` must be non-empty and contain no whitespace
    /// - `alias_description_width` must be at least 4
    pub fn validate(&self) -> Result<()> {
        validate_name("trunk_branch", &self.trunk_branch)?;
        validate_name("remote", &self.remote)?;

        if self.alias_description_width < MIN_DESCRIPTION_WIDTH {
            return Err(TidyError::Config(format!(
                "alias_description_width must be at least {} (found {})",
                MIN_DESCRIPTION_WIDTH, self.alias_description_width
            )));
        }

        Ok(())
    }
}

fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(TidyError::Config(format!("{} must not be empty", field)));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(TidyError::Config(format!(
            "{} must not contain whitespace (found '{}')",
            field, value
        )));
    }
    Ok(())
}
