//! Replaying adapter for the `ProcessRunner` port.

use std::sync::Mutex;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::process::{ProcessOutput, ProcessRunner};

/// Replays recorded process runs from a cassette.
///
/// Arguments are not matched against the recording; runs are served in
/// recorded order.
pub struct ReplayingProcessRunner {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingProcessRunner {
    /// Creates a new replaying runner from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl ProcessRunner for ReplayingProcessRunner {
    fn run(
        &self,
        _program: &str,
        _args: &[String],
    ) -> Result<ProcessOutput, Box<dyn std::error::Error + Send + Sync>> {
        let output = {
            let mut replayer =
                self.replayer.lock().map_err(|e| format!("replayer lock poisoned: {e}"))?;
            replayer.next_interaction("process", "run")?.output.clone()
        };
        super::extract_result(&output, "process::run")
    }
}
