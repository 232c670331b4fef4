//! Algorithm capability: declared parameters, declared outputs, and a
//! console command built from resolved parameter values.

pub mod ogrinfo;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::ports::ConnectionResolver;

pub use ogrinfo::{InvocationRequest, OgrInfo};

/// Kind of value a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// A reference to a vector data source.
    VectorLayer,
    /// A true/false flag.
    Boolean,
}

/// Kind of artifact an output produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// An HTML file.
    Html,
}

/// A single value supplied for a declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Opaque layer reference.
    Layer(String),
    /// Boolean flag.
    Boolean(bool),
    /// Filesystem path, used for declared outputs.
    Path(PathBuf),
}

/// Declaration of an input parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDefinition {
    /// Stable parameter name, e.g. `INPUT`.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Accepted value kind.
    pub kind: ParameterKind,
    /// Value used when none is supplied. `None` means the parameter is required.
    pub default: Option<ParameterValue>,
}

/// Declaration of an output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputDefinition {
    /// Stable output name, e.g. `OUTPUT`.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Artifact kind.
    pub kind: OutputKind,
}

/// Parameter values keyed by declared name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterValues(BTreeMap<String, ParameterValue>);

impl ParameterValues {
    /// Creates an empty set of values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any previous value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: ParameterValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets `name` to `value`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: ParameterValue) {
        self.0.insert(name.into(), value);
    }

    /// Returns the value supplied for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.0.get(name)
    }

    /// Returns the layer reference for `definition`, falling back to its default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when the value is missing with no
    /// default, or is not a layer reference.
    pub fn layer(&self, definition: &ParameterDefinition) -> Result<String> {
        match self.value_or_default(definition)? {
            ParameterValue::Layer(layer) => Ok(layer.clone()),
            other => Err(wrong_kind(definition, other)),
        }
    }

    /// Returns the boolean for `definition`, falling back to its default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when the value is missing with no
    /// default, or is not a boolean.
    pub fn boolean(&self, definition: &ParameterDefinition) -> Result<bool> {
        match self.value_or_default(definition)? {
            ParameterValue::Boolean(flag) => Ok(*flag),
            other => Err(wrong_kind(definition, other)),
        }
    }

    /// Returns the path supplied for `output`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when no path was supplied.
    pub fn output_path(&self, output: &OutputDefinition) -> Result<PathBuf> {
        match self.get(output.name) {
            Some(ParameterValue::Path(path)) => Ok(path.clone()),
            Some(other) => Err(Error::InvalidParameter {
                name: output.name.to_string(),
                reason: format!("expected a file path, got {other:?}"),
            }),
            None => Err(Error::InvalidParameter {
                name: output.name.to_string(),
                reason: "no output path supplied".to_string(),
            }),
        }
    }

    fn value_or_default<'a>(
        &'a self,
        definition: &'a ParameterDefinition,
    ) -> Result<&'a ParameterValue> {
        self.get(definition.name)
            .or(definition.default.as_ref())
            .ok_or_else(|| Error::InvalidParameter {
                name: definition.name.to_string(),
                reason: "required parameter is missing".to_string(),
            })
    }
}

fn wrong_kind(definition: &ParameterDefinition, value: &ParameterValue) -> Error {
    Error::InvalidParameter {
        name: definition.name.to_string(),
        reason: format!("expected {:?}, got {value:?}", definition.kind),
    }
}

/// An entity that declares parameters and outputs and turns resolved
/// parameter values into a console command.
pub trait Algorithm {
    /// Stable identifier, e.g. `ogrinfo`.
    fn name(&self) -> &'static str;

    /// Human-readable name.
    fn display_name(&self) -> &'static str;

    /// Group the algorithm is listed under.
    fn group(&self) -> &'static str;

    /// Declared input parameters.
    fn parameters(&self) -> Vec<ParameterDefinition>;

    /// Declared outputs.
    fn outputs(&self) -> Vec<OutputDefinition>;

    /// Builds the console command (program name first) for `values`.
    ///
    /// # Errors
    ///
    /// Returns an error when a parameter is missing or invalid, or the layer
    /// reference cannot be resolved.
    fn console_commands(
        &self,
        values: &ParameterValues,
        resolver: &dyn ConnectionResolver,
    ) -> Result<Vec<String>>;
}
