//! Errors raised while building a cache configuration.
//!
//! Cache operations themselves never fail: a miss is `None` and evicting from an empty cache
//! does nothing.

use std::num::ParseIntError;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A byte budget below zero was supplied.
    #[error("byte budget must not be negative, got {0}")]
    NegativeBudget(i64),

    /// A byte budget could not be parsed as an integer.
    #[error("invalid byte budget {value:?}")]
    InvalidBudget {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A byte budget taken from the environment was not valid unicode.
    #[error("byte budget in {0} is not valid unicode")]
    NonUnicodeBudget(&'static str),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
