//! Builder pattern for Outliner

use crate::config::{DanglingPolicy, OutlineConfig};
use crate::error::Result;
use crate::outline::PipelineOutline;
use crate::run_parameters::RunParameters;
use crate::stage_graph::StageGraph;
use std::collections::HashMap;
use std::path::Path;

/// Builder for Outliner
///
/// # Example
///
/// ```rust,ignore
/// use pipescan_sdk::{DanglingPolicy, OutlineBuilder};
///
/// let outliner = OutlineBuilder::new()
///     .implicit_stage_dependencies(true)
///     .dangling_dependencies(DanglingPolicy::Error)
///     .build();
///
/// let outline = outliner.outline(yaml_content);
/// let graph = outliner.stage_graph(&outline)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutlineBuilder {
    config: OutlineConfig,
}

impl OutlineBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: OutlineConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a YAML file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = OutlineConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Chain stages with unspecified `dependsOn` to their predecessor
    pub fn implicit_stage_dependencies(mut self, enabled: bool) -> Self {
        self.config.implicit_stage_dependencies = enabled;
        self
    }

    /// Set handling of dependencies on unknown stages
    pub fn dangling_dependencies(mut self, policy: DanglingPolicy) -> Self {
        self.config.dangling_dependencies = policy;
        self
    }

    /// Fail on run values for undeclared parameters
    pub fn reject_unknown_run_parameters(mut self, reject: bool) -> Self {
        self.config.reject_unknown_run_parameters = reject;
        self
    }

    pub fn build(self) -> Outliner {
        tracing::debug!(config = ?self.config, "Building outliner");
        Outliner {
            config: self.config,
        }
    }
}

/// Extracts outlines and applies the configured consumer policies
#[derive(Debug, Clone, Default)]
pub struct Outliner {
    config: OutlineConfig,
}

impl Outliner {
    pub fn new(config: OutlineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Extract the outline of pipeline YAML text
    pub fn outline(&self, yaml_str: &str) -> PipelineOutline {
        PipelineOutline::extract(yaml_str)
    }

    /// Read a pipeline definition from disk and extract its outline
    pub fn outline_file(&self, path: impl AsRef<Path>) -> Result<PipelineOutline> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(self.outline(&content))
    }

    /// Resolve the outline's stages into a dependency graph
    pub fn stage_graph(&self, outline: &PipelineOutline) -> Result<StageGraph> {
        StageGraph::resolve(&outline.stages, &self.config)
    }

    /// Build the template parameters for a run request
    pub fn run_parameters(
        &self,
        outline: &PipelineOutline,
        supplied: &HashMap<String, String>,
    ) -> Result<RunParameters> {
        RunParameters::build(&outline.parameters, supplied, &self.config)
    }
}
