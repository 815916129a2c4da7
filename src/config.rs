//! Surface configuration: toolbar layout and gesture tuning.
//!
//! The host passes configuration as JSON. Every field is optional and falls
//! back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::consts::{HALO_DIAGONAL_DIVISOR, MIN_CREATE_CONTACTS};
use crate::input::Toolbar;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed on-screen buttons, in pixel space.
    pub toolbar: Toolbar,
    /// The selection halo is offset by the selection diagonal over this.
    pub halo_divisor: f64,
    /// Contacts that must be tracked before a lift commits a new polygon.
    pub min_create_contacts: usize,
    /// Passed through to the viewport when framing.
    pub animate_framing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toolbar: Toolbar::default(),
            halo_divisor: HALO_DIAGONAL_DIVISOR,
            min_create_contacts: MIN_CREATE_CONTACTS,
            animate_framing: true,
        }
    }
}

impl Config {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.halo_divisor.is_finite() || self.halo_divisor <= 0.0 {
            return Err(ConfigError::Invalid(format!("halo_divisor must be positive, got {}", self.halo_divisor)));
        }
        if self.min_create_contacts < MIN_CREATE_CONTACTS {
            return Err(ConfigError::Invalid(format!(
                "min_create_contacts must be at least {MIN_CREATE_CONTACTS}, got {}",
                self.min_create_contacts
            )));
        }
        for (kind, button) in self.toolbar.iter() {
            let size_ok = |v: f64| v.is_finite() && v >= 0.0;
            if !size_ok(button.width) || !size_ok(button.height) {
                return Err(ConfigError::Invalid(format!(
                    "{kind:?} button size must be finite and non-negative, got {}x{}",
                    button.width, button.height
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
