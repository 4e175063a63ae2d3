//! Pipescan Parser - parameter and stage extraction for pipeline YAML
//!
//! The extractors read the subset of a pipeline definition needed to build
//! run forms and stage diagrams: the `parameters:` declarations and the
//! `- stage:` items with their `dependsOn` edges. They are total functions:
//! unexpected constructs are skipped and every input yields a list.

mod line;
pub mod parameter_parser;
pub mod stage_parser;

// Re-export main parser types
pub use parameter_parser::ParameterParser;
pub use stage_parser::StageParser;

use pipescan_core::{ParameterDeclaration, StageNode};

/// Extract runtime parameter declarations from pipeline YAML text
pub fn extract_parameters(yaml_str: &str) -> Vec<ParameterDeclaration> {
    ParameterParser::parse(yaml_str)
}

/// Extract stages and their `dependsOn` edges from pipeline YAML text
pub fn extract_stages(yaml_str: &str) -> Vec<StageNode> {
    StageParser::parse(yaml_str)
}
