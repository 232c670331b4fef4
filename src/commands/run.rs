//! `ogrinfo-report run` command.

use std::path::{Path, PathBuf};

use crate::adapter::CommandInvocationAdapter;
use crate::algorithm::ogrinfo::{InvocationRequest, OUTPUT};
use crate::algorithm::{Algorithm, OgrInfo, ParameterValue};
use crate::cli::LayerArgs;
use crate::context::ServiceContext;

/// Execute the `run` command: run `ogrinfo` and write the HTML report.
///
/// Prints the report path on success.
///
/// # Errors
///
/// Returns an error string if the parameters are invalid, `ogrinfo` fails,
/// or the report cannot be written.
pub fn run_with_context(
    ctx: &ServiceContext,
    layer: &LayerArgs,
    output: &Path,
) -> Result<PathBuf, String> {
    let values = super::parameter_values(layer)
        .with(OUTPUT, ParameterValue::Path(output.to_path_buf()));

    let request = InvocationRequest::from_values(&values).map_err(|e| e.to_string())?;
    let output_path = OgrInfo
        .outputs()
        .iter()
        .find(|o| o.name == OUTPUT)
        .map(|o| values.output_path(o))
        .transpose()
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("{} declares no {OUTPUT} output", OgrInfo.name()))?;

    let written = CommandInvocationAdapter::new(ctx)
        .run(&request, &output_path)
        .map_err(|e| e.to_string())?;
    println!("{}", written.display());
    Ok(written)
}
