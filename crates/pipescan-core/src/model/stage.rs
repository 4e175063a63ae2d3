//! Stage topology definitions

use serde::{Deserialize, Serialize};

/// A stage of a multi-stage pipeline and the stages it depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageNode {
    /// Stage name from `- stage:`
    pub name: String,

    /// Predecessor stage names
    ///
    /// `None` means the document did not specify any, and the consumer
    /// applies its own default. Entries are not checked against other
    /// stage names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Vec<String>>,
}

impl StageNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depends_on: None,
        }
    }

    pub fn with_depends_on<I, S>(mut self, depends_on: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = Some(depends_on.into_iter().map(Into::into).collect());
        self
    }

    /// Explicit dependencies, empty when unspecified
    pub fn dependencies(&self) -> &[String] {
        self.depends_on.as_deref().unwrap_or(&[])
    }
}
