//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::adapters::live::{LiveProcessRunner, LogFeedback, OgrConnectionResolver};
use crate::adapters::recording::RecordingProcessRunner;
use crate::adapters::replaying::ReplayingProcessRunner;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::Config;
use crate::error::Result;
use crate::ports::{ConnectionResolver, Feedback, ProcessRunner};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Runner for external programs.
    pub process: Box<dyn ProcessRunner>,
    /// Resolver turning layer references into connection strings.
    pub resolver: Box<dyn ConnectionResolver>,
    /// Sink for progress and console output.
    pub feedback: Box<dyn Feedback>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(
        process: Box<dyn ProcessRunner>,
        resolver: Box<dyn ConnectionResolver>,
        feedback: Box<dyn Feedback>,
    ) -> Self {
        Self {
            process,
            resolver,
            feedback,
        }
    }

    /// Creates a live context that spawns real programs.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self::new(
            live_runner(config),
            Box::new(OgrConnectionResolver),
            Box::new(LogFeedback),
        )
    }

    /// Creates a live context whose process runs are recorded into a new
    /// session directory under `root`.
    ///
    /// Drop the context before calling [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(root: &Path, config: &Config) -> Result<(Self, RecordingSession)> {
        let session = RecordingSession::new(root)?;
        info!(dir = %session.output_dir().display(), "recording process runs");
        let process =
            RecordingProcessRunner::new(live_runner(config), Arc::clone(&session.process));
        let ctx = Self::new(
            Box::new(process),
            Box::new(OgrConnectionResolver),
            Box::new(LogFeedback),
        );
        Ok((ctx, session))
    }

    /// Creates a context whose process runs are served from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self> {
        let cassette = Cassette::load(path)?;
        info!(cassette = %path.display(), "replaying process runs");
        Ok(Self::new(
            Box::new(ReplayingProcessRunner::new(CassetteReplayer::new(&cassette))),
            Box::new(OgrConnectionResolver),
            Box::new(LogFeedback),
        ))
    }

    /// Picks live, recording or replaying wiring from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording session or replay cassette cannot
    /// be set up.
    pub fn from_config(config: &Config) -> Result<(Self, Option<RecordingSession>)> {
        if let Some(cassette) = &config.replay_cassette {
            return Ok((Self::replaying(cassette)?, None));
        }
        if let Some(root) = &config.record_dir {
            let (ctx, session) = Self::recording_at(root, config)?;
            return Ok((ctx, Some(session)));
        }
        Ok((Self::live(config), None))
    }
}

fn live_runner(config: &Config) -> Box<dyn ProcessRunner> {
    match &config.gdal_bin_dir {
        Some(dir) => Box::new(LiveProcessRunner::with_bin_dir(dir)),
        None => Box::new(LiveProcessRunner::new()),
    }
}
