//! Live feedback sink that forwards to `tracing`.

use tracing::{debug, info};

use crate::ports::feedback::Feedback;

/// Feedback sink that emits `tracing` events.
///
/// Command lines and messages are logged at `info`, console lines at
/// `debug` so a full listing only shows up with `RUST_LOG=debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFeedback;

impl Feedback for LogFeedback {
    fn push_command_info(&self, command: &str) {
        info!(command, "running external command");
    }

    fn push_console_info(&self, line: &str) {
        debug!(target: "ogrinfo_report::console", "{}", line.trim_end_matches(['\r', '\n']));
    }

    fn push_info(&self, message: &str) {
        info!("{message}");
    }
}
