//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Stages depend on each other in a loop
    #[error("Circular stage dependency: {path}")]
    CircularDependency { path: String },

    /// A `dependsOn` entry names no stage of the pipeline
    #[error("Stage '{stage}' depends on unknown stage '{dependency}'")]
    UnknownStage { stage: String, dependency: String },

    /// A run value does not satisfy its declaration
    #[error("Invalid value for parameter '{name}': {message}")]
    InvalidParameterValue { name: String, message: String },

    /// A run value was supplied for an undeclared parameter
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
