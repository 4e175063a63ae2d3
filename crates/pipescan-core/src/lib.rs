//! Pipescan Core - Core types for pipeline definition outlines
//!
//! This crate provides the data model shared across the Pipescan crates:
//! - Runtime parameter declarations and their typed defaults
//! - Stage nodes with their `dependsOn` edges
//! - Error types

pub mod error;
pub mod model;

// Re-export commonly used types
pub use error::CoreError;
pub use model::{DefaultValue, ParameterDeclaration, ParameterType, StageNode};
