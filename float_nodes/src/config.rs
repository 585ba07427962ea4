//! Runtime configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! [integer]
//! small_bits = 62
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::integer::SmallIntegerRange;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("integer.small_bits must be between {min} and {max}, got {got}")]
    SmallBitsOutOfRange { got: u32, min: u32, max: u32 },
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FloatConfig {
    pub integer: IntegerConfig,
}

/// `[integer]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegerConfig {
    /// Width of the machine-sized integer representation, sign bit included.
    pub small_bits: u32,
}

impl Default for IntegerConfig {
    fn default() -> Self {
        Self {
            small_bits: SmallIntegerRange::MAX_BITS,
        }
    }
}

impl FloatConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: FloatConfig = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bits = self.integer.small_bits;
        if !(SmallIntegerRange::MIN_BITS..=SmallIntegerRange::MAX_BITS).contains(&bits) {
            return Err(ConfigError::SmallBitsOutOfRange {
                got: bits,
                min: SmallIntegerRange::MIN_BITS,
                max: SmallIntegerRange::MAX_BITS,
            });
        }
        Ok(())
    }
}
