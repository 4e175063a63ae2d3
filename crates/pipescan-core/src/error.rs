//! Error types for Pipescan Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Unknown parameter type: {0}")]
    UnknownParameterType(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
