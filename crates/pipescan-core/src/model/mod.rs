//! Outline model definitions
//!
//! Structured results recovered from a pipeline definition's text.

pub mod parameter;
pub mod stage;

pub use parameter::{DefaultValue, ParameterDeclaration, ParameterType};
pub use stage::StageNode;
