//! Pipescan SDK
//!
//! High-level API over the pipeline extractors: outlines for run forms,
//! resolved stage graphs and validated run parameters.

pub mod builder;
pub mod config;
pub mod error;
pub mod outline;
pub mod run_parameters;
pub mod stage_graph;

// Re-export main types
pub use builder::{OutlineBuilder, Outliner};
pub use config::{DanglingPolicy, OutlineConfig};
pub use error::{Result, SdkError};
pub use outline::PipelineOutline;
pub use run_parameters::RunParameters;
pub use stage_graph::{ResolvedStage, StageGraph};

// Re-export commonly used types from dependencies
pub use pipescan_core::{DefaultValue, ParameterDeclaration, ParameterType, StageNode};
pub use pipescan_parser::{extract_parameters, extract_stages};
