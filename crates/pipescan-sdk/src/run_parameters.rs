//! Run request parameters
//!
//! Turns parameter declarations plus the values a user entered into the
//! `templateParameters` map sent with a run request.

use crate::config::OutlineConfig;
use crate::error::{Result, SdkError};
use pipescan_core::{CoreError, ParameterDeclaration};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Validated template parameters for a run request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct RunParameters {
    values: BTreeMap<String, String>,
}

impl RunParameters {
    /// Build run parameters from declarations and supplied values
    ///
    /// Supplied values are checked against their declaration; declarations
    /// without a supplied value fall back to their default, and are left out
    /// when they have none.
    pub fn build(
        declarations: &[ParameterDeclaration],
        supplied: &HashMap<String, String>,
        config: &OutlineConfig,
    ) -> Result<Self> {
        let mut unknown: Vec<&String> = supplied
            .keys()
            .filter(|name| !declarations.iter().any(|d| &d.name == *name))
            .collect();
        unknown.sort();

        for name in unknown {
            if config.reject_unknown_run_parameters {
                return Err(SdkError::UnknownParameter(name.clone()));
            }
            tracing::warn!(parameter = %name, "Ignoring value for undeclared parameter");
        }

        let mut values = BTreeMap::new();
        for declaration in declarations {
            if let Some(value) = supplied.get(&declaration.name) {
                let normalized = declaration.normalize_value(value).map_err(|e| {
                    let message = match e {
                        CoreError::InvalidValue(message) => message,
                        other => other.to_string(),
                    };
                    SdkError::InvalidParameterValue {
                        name: declaration.name.clone(),
                        message,
                    }
                })?;
                values.insert(declaration.name.clone(), normalized);
            } else if let Some(default) = &declaration.default {
                tracing::debug!(parameter = %declaration.name, "Using declared default");
                values.insert(declaration.name.clone(), default.to_string());
            }
        }

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.values
    }

    /// JSON object keyed by parameter name
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
