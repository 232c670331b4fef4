//! Process runner port for invoking external programs.

use serde::{Deserialize, Serialize};

/// The captured result of running an external program to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutput {
    /// The exit code of the process (`-1` when terminated by a signal).
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

impl ProcessOutput {
    /// Returns `true` when the process exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs external programs synchronously.
///
/// Abstracting process execution allows deterministic replay by recording
/// and replaying program outputs during cassette playback.
pub trait ProcessRunner: Send + Sync {
    /// Runs `program` with `args` and blocks until it exits.
    ///
    /// A non-zero exit status is not an error at this level; it is reported
    /// through [`ProcessOutput::exit_code`].
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be found or spawned.
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<ProcessOutput, Box<dyn std::error::Error + Send + Sync>>;
}
