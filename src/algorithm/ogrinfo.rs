//! The `ogrinfo` algorithm: lists every layer of a vector data source.

use serde::Serialize;

use super::{
    Algorithm, OutputDefinition, OutputKind, ParameterDefinition, ParameterKind, ParameterValue,
    ParameterValues,
};
use crate::error::Result;
use crate::ports::ConnectionResolver;

/// Program invoked by this algorithm.
pub const PROGRAM: &str = "ogrinfo";
/// Flag requesting a listing of all layers.
pub const ALL_LAYERS_FLAG: &str = "-al";
/// Flag restricting the listing to a summary.
pub const SUMMARY_FLAG: &str = "-so";

/// Input layer parameter name.
pub const INPUT: &str = "INPUT";
/// Summary-only parameter name.
pub const SUMMARY_ONLY: &str = "SUMMARY_ONLY";
/// HTML report output name.
pub const OUTPUT: &str = "OUTPUT";

const INPUT_PARAMETER: ParameterDefinition = ParameterDefinition {
    name: INPUT,
    description: "Input layer",
    kind: ParameterKind::VectorLayer,
    default: None,
};

const SUMMARY_ONLY_PARAMETER: ParameterDefinition = ParameterDefinition {
    name: SUMMARY_ONLY,
    description: "Summary output only",
    kind: ParameterKind::Boolean,
    default: Some(ParameterValue::Boolean(true)),
};

const OUTPUT_DEFINITION: OutputDefinition = OutputDefinition {
    name: OUTPUT,
    description: "Layer information",
    kind: OutputKind::Html,
};

/// Inputs for a single `ogrinfo` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationRequest {
    /// Opaque reference to a vector data source, resolved before use.
    pub input_layer_reference: String,
    /// Pass `-so` so only a summary is listed.
    pub summary_only: bool,
}

impl InvocationRequest {
    /// Creates a request with the default `summary_only = true`.
    pub fn new(input_layer_reference: impl Into<String>) -> Self {
        Self {
            input_layer_reference: input_layer_reference.into(),
            summary_only: true,
        }
    }

    /// Sets whether only a summary is listed.
    #[must_use]
    pub fn summary_only(mut self, summary_only: bool) -> Self {
        self.summary_only = summary_only;
        self
    }

    /// Builds a request from host-supplied parameter values.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParameter`] if `INPUT` is missing or
    /// either value has the wrong kind.
    pub fn from_values(values: &ParameterValues) -> Result<Self> {
        Ok(Self {
            input_layer_reference: values.layer(&INPUT_PARAMETER)?,
            summary_only: values.boolean(&SUMMARY_ONLY_PARAMETER)?,
        })
    }
}

/// Builds `ogrinfo -al [-so] <connection>` for `request`.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidLayerReference`] if the layer reference
/// does not resolve to a connection string.
pub fn build_command_line(
    request: &InvocationRequest,
    resolver: &dyn ConnectionResolver,
) -> Result<Vec<String>> {
    let connection = resolver.connection_string(&request.input_layer_reference)?;

    let mut tokens = vec![PROGRAM.to_string(), ALL_LAYERS_FLAG.to_string()];
    if request.summary_only {
        tokens.push(SUMMARY_FLAG.to_string());
    }
    tokens.push(connection);
    Ok(tokens)
}

/// Layer information via `ogrinfo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OgrInfo;

impl Algorithm for OgrInfo {
    fn name(&self) -> &'static str {
        "ogrinfo"
    }

    fn display_name(&self) -> &'static str {
        "Information"
    }

    fn group(&self) -> &'static str {
        "Vector miscellaneous"
    }

    fn parameters(&self) -> Vec<ParameterDefinition> {
        vec![INPUT_PARAMETER, SUMMARY_ONLY_PARAMETER]
    }

    fn outputs(&self) -> Vec<OutputDefinition> {
        vec![OUTPUT_DEFINITION]
    }

    fn console_commands(
        &self,
        values: &ParameterValues,
        resolver: &dyn ConnectionResolver,
    ) -> Result<Vec<String>> {
        build_command_line(&InvocationRequest::from_values(values)?, resolver)
    }
}
