//! Cache configuration.
//!
//! A budget can be set in code, taken from a signed integer coming from an outer configuration
//! layer, or read from the environment.

use std::env::{self, VarError};

use crate::error::{ConfigError, Result};

/// Environment variable read by [`CacheConfig::from_env`].
pub const MAX_BYTES_ENV: &str = "BYTE_LRU_MAX_BYTES";

/// Settings for a [`Cache`](crate::Cache).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheConfig {
    /// Ceiling on `key.len() + value.byte_len()` summed over all entries. `0` disables eviction.
    pub max_bytes: u64,
}

impl CacheConfig {
    pub fn with_max_bytes(max_bytes: u64) -> Self {
        CacheConfig { max_bytes }
    }

    /// Builds a config from a signed budget, rejecting negative values.
    pub fn from_max_bytes_signed(max_bytes: i64) -> Result<Self> {
        u64::try_from(max_bytes)
            .map(Self::with_max_bytes)
            .map_err(|_| ConfigError::NegativeBudget(max_bytes))
    }

    /// Parses a budget such as `"1048576"`. Surrounding whitespace is ignored.
    pub fn parse_max_bytes(value: &str) -> Result<Self> {
        let parsed = value
            .trim()
            .parse::<i64>()
            .map_err(|source| ConfigError::InvalidBudget {
                value: value.to_string(),
                source,
            })?;
        Self::from_max_bytes_signed(parsed)
    }

    /// Reads the budget from `BYTE_LRU_MAX_BYTES`.
    ///
    /// Only an unset variable gives the default (unbounded) config. A value that is not unicode,
    /// not an integer, or negative is an error rather than being replaced by the default.
    pub fn from_env() -> Result<Self> {
        match env::var(MAX_BYTES_ENV) {
            Ok(value) => Self::parse_max_bytes(&value),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NonUnicodeBudget(MAX_BYTES_ENV)),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_bytes == 0
    }
}
