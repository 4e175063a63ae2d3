//! Configuration types for the outline SDK

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with a `dependsOn` entry that names no known stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingPolicy {
    /// Keep the edge and log a warning
    #[default]
    Warn,
    /// Remove the edge
    Drop,
    /// Fail graph resolution
    Error,
}

/// Outline configuration
///
/// Every field has a default, so a partial YAML document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Chain stages with unspecified `dependsOn` to their predecessor
    pub implicit_stage_dependencies: bool,

    /// Handling of dependencies on unknown stages
    pub dangling_dependencies: DanglingPolicy,

    /// Fail when run values are supplied for undeclared parameters
    pub reject_unknown_run_parameters: bool,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            implicit_stage_dependencies: true,
            dangling_dependencies: DanglingPolicy::Warn,
            reject_unknown_run_parameters: false,
        }
    }
}

impl OutlineConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from YAML text
    pub fn from_yaml_str(yaml_str: &str) -> Result<Self> {
        if yaml_str.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SdkError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "Loading outline configuration");
        Self::from_yaml_str(&content)
    }

    /// Serialize configuration to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn with_implicit_stage_dependencies(mut self, enabled: bool) -> Self {
        self.implicit_stage_dependencies = enabled;
        self
    }

    pub fn with_dangling_dependencies(mut self, policy: DanglingPolicy) -> Self {
        self.dangling_dependencies = policy;
        self
    }

    pub fn with_reject_unknown_run_parameters(mut self, reject: bool) -> Self {
        self.reject_unknown_run_parameters = reject;
        self
    }
}
