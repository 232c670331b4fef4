//! `ogrinfo-report command` command: prints the command line.

use crate::algorithm::{Algorithm, OgrInfo};
use crate::cli::LayerArgs;
use crate::context::ServiceContext;

/// Execute the `command` command: print the `ogrinfo` command line that
/// `run` would execute, without executing it.
///
/// # Errors
///
/// Returns an error string if the layer reference cannot be resolved.
pub fn run_with_context(ctx: &ServiceContext, layer: &LayerArgs) -> Result<(), String> {
    let line = command_line(ctx, layer)?;
    println!("{line}");
    Ok(())
}

fn command_line(ctx: &ServiceContext, layer: &LayerArgs) -> Result<String, String> {
    let tokens = OgrInfo
        .console_commands(&super::parameter_values(layer), ctx.resolver.as_ref())
        .map_err(|e| e.to_string())?;
    Ok(tokens.join(" "))
}
