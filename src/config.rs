//! Environment-driven configuration.
//!
//! Values come from the process environment, after loading a `.env` file
//! from the working directory if one exists.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Directory holding the GDAL command-line tools.
pub const GDAL_BIN_VAR: &str = "OGRINFO_REPORT_GDAL_BIN";
/// Directory to record process cassettes into.
pub const RECORD_VAR: &str = "OGRINFO_REPORT_RECORD";
/// Cassette file to replay process runs from.
pub const REPLAY_VAR: &str = "OGRINFO_REPORT_REPLAY";

/// Runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Look programs up here instead of on `PATH`.
    pub gdal_bin_dir: Option<PathBuf>,
    /// Record every process run into a cassette under this directory.
    pub record_dir: Option<PathBuf>,
    /// Serve process runs from this cassette instead of spawning programs.
    pub replay_cassette: Option<PathBuf>,
}

impl Config {
    /// Loads `.env` (if present) and reads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a `.env` file exists but cannot be
    /// loaded, or when recording and replaying are both requested.
    pub fn from_env() -> Result<Self> {
        env_file_loaded(dotenvy::dotenv())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when recording and replaying are both requested.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let path = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };

        let config = Self {
            gdal_bin_dir: path(GDAL_BIN_VAR),
            record_dir: path(RECORD_VAR),
            replay_cassette: path(REPLAY_VAR),
        };
        if config.record_dir.is_some() && config.replay_cassette.is_some() {
            return Err(Error::Config(format!(
                "{RECORD_VAR} and {REPLAY_VAR} cannot both be set"
            )));
        }
        Ok(config)
    }
}

/// A missing `.env` is fine; a malformed one stops dotenvy partway through
/// and must not go unnoticed.
fn env_file_loaded<T>(result: dotenvy::Result<T>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::Config(format!("failed to load .env: {e}"))),
    }
}
