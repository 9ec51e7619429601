//! Error types for configuration loading.

use thiserror::Error;

/// Errors that can occur when loading or validating `ParryConfig`.
///
/// Only configuration time can fail; arbitration itself never returns errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read config '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in config: {details}")]
    ParseError { details: String },

    /// A value is out of its allowed range.
    #[error("Invalid config value '{field}' = {value}: {reason}")]
    InvalidValue {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}
