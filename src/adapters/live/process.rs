//! Live process runner using `std::process::Command`.

use std::path::PathBuf;
use std::process::Command;

use crate::ports::process::{ProcessOutput, ProcessRunner};

/// Live process runner that spawns programs directly, without a shell.
///
/// When `bin_dir` is set the program is looked up in that directory;
/// otherwise it is resolved through `PATH`.
#[derive(Debug, Clone, Default)]
pub struct LiveProcessRunner {
    bin_dir: Option<PathBuf>,
}

impl LiveProcessRunner {
    /// Creates a runner that resolves programs through `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a runner that looks programs up in `bin_dir`.
    #[must_use]
    pub fn with_bin_dir(bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: Some(bin_dir.into()),
        }
    }

    fn program_path(&self, program: &str) -> PathBuf {
        match &self.bin_dir {
            Some(dir) => dir.join(program),
            None => PathBuf::from(program),
        }
    }
}

impl ProcessRunner for LiveProcessRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<ProcessOutput, Box<dyn std::error::Error + Send + Sync>> {
        let path = self.program_path(program);
        let output = Command::new(&path)
            .args(args)
            .output()
            .map_err(|e| format!("failed to launch {}: {e}", path.display()))?;
        Ok(ProcessOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
