//! Command dispatch and handlers.

pub mod cmdline;
pub mod describe;
pub mod run;

use crate::algorithm::ogrinfo::{INPUT, SUMMARY_ONLY};
use crate::algorithm::{ParameterValue, ParameterValues};
use crate::cassette::session::RecordingSession;
use crate::cli::{Command, LayerArgs};
use crate::config::Config;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `OGRINFO_REPORT_RECORD` is set to a directory path, process runs are
/// recorded to a cassette in a new session directory below it. When
/// `OGRINFO_REPORT_REPLAY` names a cassette, runs are served from it.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = Config::from_env().map_err(|e| e.to_string())?;
    let (ctx, session) = ServiceContext::from_config(&config).map_err(|e| e.to_string())?;

    let result = dispatch_with_context(command, &ctx);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Run { layer, output } => run::run_with_context(ctx, layer, output).map(|_| ()),
        Command::Command { layer } => cmdline::run_with_context(ctx, layer),
        Command::Describe => describe::run(),
    }
}

/// Maps CLI layer arguments onto the algorithm's declared parameters.
fn parameter_values(layer: &LayerArgs) -> ParameterValues {
    ParameterValues::new()
        .with(INPUT, ParameterValue::Layer(layer.input.clone()))
        .with(SUMMARY_ONLY, ParameterValue::Boolean(layer.summary_only))
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish().map_err(|e| e.to_string())?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
