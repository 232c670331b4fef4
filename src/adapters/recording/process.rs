//! Recording adapter for the `ProcessRunner` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::warn;

use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{ProcessOutput, ProcessRunner};

/// Records process runs while delegating to an inner implementation.
pub struct RecordingProcessRunner {
    inner: Box<dyn ProcessRunner>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingProcessRunner {
    /// Creates a new recording runner wrapping the given implementation.
    pub fn new(inner: Box<dyn ProcessRunner>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct RunInput<'a> {
    program: &'a str,
    args: &'a [String],
}

impl ProcessRunner for RecordingProcessRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<ProcessOutput, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.run(program, args);
        let input = RunInput { program, args };
        if let Err(e) = super::record_result(&self.recorder, "process", "run", &input, &result) {
            warn!(program, error = %e, "failed to record process run");
        }
        result
    }
}
