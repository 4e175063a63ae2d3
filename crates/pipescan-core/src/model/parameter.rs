//! Runtime parameter declarations
//!
//! A pipeline's `parameters:` section declares named, typed inputs that a
//! user supplies when queuing a run. Only the scalar parts of a declaration
//! are modelled; template-valued defaults (steps, jobs, stages) are kept as
//! their raw scalar head.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared type of a runtime parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterType {
    #[default]
    String,
    Boolean,
    Number,
    Object,
    Step,
    StepList,
    Job,
    JobList,
    Deployment,
    DeploymentList,
    Stage,
    StageList,
    StringList,
}

impl ParameterType {
    /// Every recognized type, in declaration order
    pub const ALL: [ParameterType; 13] = [
        ParameterType::String,
        ParameterType::Boolean,
        ParameterType::Number,
        ParameterType::Object,
        ParameterType::Step,
        ParameterType::StepList,
        ParameterType::Job,
        ParameterType::JobList,
        ParameterType::Deployment,
        ParameterType::DeploymentList,
        ParameterType::Stage,
        ParameterType::StageList,
        ParameterType::StringList,
    ];

    /// The keyword used for this type in pipeline YAML
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "string",
            ParameterType::Boolean => "boolean",
            ParameterType::Number => "number",
            ParameterType::Object => "object",
            ParameterType::Step => "step",
            ParameterType::StepList => "stepList",
            ParameterType::Job => "job",
            ParameterType::JobList => "jobList",
            ParameterType::Deployment => "deployment",
            ParameterType::DeploymentList => "deploymentList",
            ParameterType::Stage => "stage",
            ParameterType::StageList => "stageList",
            ParameterType::StringList => "stringList",
        }
    }

    /// Lenient parse: unrecognized keywords fall back to `string`
    pub fn parse_or_default(keyword: &str) -> Self {
        keyword.parse().unwrap_or_default()
    }

    /// Whether values of this type are YAML structures rather than scalars
    pub fn is_structured(&self) -> bool {
        !matches!(
            self,
            ParameterType::String | ParameterType::Boolean | ParameterType::Number
        )
    }
}

impl FromStr for ParameterType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        ParameterType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| CoreError::UnknownParameterType(s.to_string()))
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default value of a parameter, shaped by the parameter's type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl DefaultValue {
    /// Coerce an already quote-stripped scalar according to `parameter_type`
    ///
    /// - `boolean`: true only for a case-insensitive `"true"`
    /// - `number`: parsed float, `0.0` when the text is not a finite number
    /// - anything else: the text unchanged
    pub fn coerce(raw: &str, parameter_type: ParameterType) -> Self {
        match parameter_type {
            ParameterType::Boolean => DefaultValue::Boolean(raw.eq_ignore_ascii_case("true")),
            ParameterType::Number => {
                let number = raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .unwrap_or(0.0);
                DefaultValue::Number(number)
            }
            _ => DefaultValue::String(raw.to_string()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DefaultValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DefaultValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DefaultValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders the value the way it is written back into a run request
impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Boolean(b) => write!(f, "{}", b),
            DefaultValue::Number(n) => write!(f, "{}", n),
            DefaultValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Boolean(value)
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        DefaultValue::Number(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::String(value.to_string())
    }
}

/// A single entry of a pipeline's `parameters:` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDeclaration {
    /// Parameter name (required)
    pub name: String,

    /// Declared type, `string` when absent or unrecognized
    #[serde(rename = "type", default)]
    pub parameter_type: ParameterType,

    /// Optional label shown instead of the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Optional default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,

    /// Enumerated choice set, present only when a `values:` list was declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

impl ParameterDeclaration {
    /// Create a `string` parameter with no other attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_type: ParameterType::String,
            display_name: None,
            default: None,
            values: None,
        }
    }

    pub fn with_type(mut self, parameter_type: ParameterType) -> Self {
        self.parameter_type = parameter_type;
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Display name if declared, otherwise the parameter name
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Whether the parameter restricts input to an enumerated set
    pub fn has_choices(&self) -> bool {
        self.values.as_ref().map_or(false, |v| !v.is_empty())
    }

    /// Whether `value` is acceptable for the declared choice set
    ///
    /// Always true for parameters without `values`.
    pub fn allows(&self, value: &str) -> bool {
        match &self.values {
            Some(values) if !values.is_empty() => values.iter().any(|v| v == value),
            _ => true,
        }
    }

    /// Check a user-supplied value against the declaration
    ///
    /// Booleans are normalized to lowercase and numbers are trimmed. The
    /// normalized value must belong to the choice set when one is declared.
    /// Structured types (`object`, `stepList`, ...) carry YAML text and are
    /// passed through unchecked.
    pub fn normalize_value(&self, value: &str) -> Result<String> {
        if self.parameter_type.is_structured() {
            return Ok(value.to_string());
        }

        let normalized = match self.parameter_type {
            ParameterType::Boolean => {
                if value.trim().eq_ignore_ascii_case("true") {
                    "true".to_string()
                } else if value.trim().eq_ignore_ascii_case("false") {
                    "false".to_string()
                } else {
                    return Err(CoreError::InvalidValue(format!(
                        "expected true or false, got '{}'",
                        value
                    )));
                }
            }
            ParameterType::Number => {
                let trimmed = value.trim();
                match trimmed.parse::<f64>() {
                    Ok(n) if n.is_finite() => trimmed.to_string(),
                    _ => {
                        return Err(CoreError::InvalidValue(format!(
                            "expected a number, got '{}'",
                            value
                        )))
                    }
                }
            }
            _ => value.to_string(),
        };

        if !self.allows(&normalized) {
            let choices = self.values.as_deref().unwrap_or(&[]).join(", ");
            return Err(CoreError::InvalidValue(format!(
                "'{}' is not one of: {}",
                normalized, choices
            )));
        }
        Ok(normalized)
    }
}
