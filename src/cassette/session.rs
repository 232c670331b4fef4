//! Recording session owning the process cassette recorder.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;
use crate::error::{Error, Result};

/// File name of the process cassette inside a session directory.
pub const PROCESS_CASSETTE: &str = "process.cassette.yaml";

/// Manages the recorder shared with the recording process runner.
///
/// Cassettes are stored in a timestamped directory under the configured
/// root, e.g. `<root>/2025-03-15T14-30-00/process.cassette.yaml`.
#[derive(Debug)]
pub struct RecordingSession {
    /// Recorder for process interactions.
    pub process: Arc<Mutex<CassetteRecorder>>,
    /// Output directory containing the cassette files.
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session with a timestamped output directory
    /// under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if the session directory already exists
    /// or cannot be created.
    pub fn new(root: &Path) -> Result<Self> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(Error::Cassette(format!(
                "cassette directory already exists: {}",
                output_dir.display()
            )));
        }
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            Error::Cassette(format!("failed to create {}: {e}", output_dir.display()))
        })?;

        let recorder = CassetteRecorder::new(output_dir.join(PROCESS_CASSETTE), timestamp);
        Ok(Self {
            process: Arc::new(Mutex::new(recorder)),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish the recorder and write the cassette to disk.
    ///
    /// The recording runner must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if a runner still holds the recorder, the
    /// lock is poisoned, or the file cannot be written.
    pub fn finish(self) -> Result<PathBuf> {
        let recorder = Arc::try_unwrap(self.process)
            .map_err(|_| Error::Cassette("recording runner still has references".into()))?
            .into_inner()
            .map_err(|e| Error::Cassette(format!("recorder lock poisoned: {e}")))?;
        recorder.finish()?;
        Ok(self.output_dir)
    }
}
