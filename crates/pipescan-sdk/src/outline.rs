//! Pipeline outline
//!
//! Runs both extractors over one pipeline definition and carries the
//! results to the run form as JSON.

use crate::error::Result;
use pipescan_core::{ParameterDeclaration, StageNode};
use pipescan_parser::{extract_parameters, extract_stages};
use serde::{Deserialize, Serialize};

/// Parameters and stages recovered from a pipeline definition
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineOutline {
    /// Runtime parameter declarations, in source order
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,

    /// Stages and their explicit dependencies, in source order
    #[serde(default)]
    pub stages: Vec<StageNode>,
}

impl PipelineOutline {
    /// Extract an outline from pipeline YAML text
    pub fn extract(yaml_str: &str) -> Self {
        let outline = Self {
            parameters: extract_parameters(yaml_str),
            stages: extract_stages(yaml_str),
        };
        tracing::debug!(
            parameters = outline.parameters.len(),
            stages = outline.stages.len(),
            "Extracted pipeline outline"
        );
        outline
    }

    /// Look up a parameter declaration by name
    pub fn parameter(&self, name: &str) -> Option<&ParameterDeclaration> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Look up a stage by name
    pub fn stage(&self, name: &str) -> Option<&StageNode> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// True when neither parameters nor stages were found
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() && self.stages.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
