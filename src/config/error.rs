//! Configuration error types.

use thiserror::Error;

/// Configuration loading error. Fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("cannot coerce value {value:?} to {expected} for field {field}")]
    TypeMismatch {
        field: String,
        value: String,
        expected: &'static str,
    },
}
