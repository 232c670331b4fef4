//! Error types for the invocation adapter.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while turning a request into a report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The external program could not be launched, or exited with a failure status.
    #[error("{program} failed{}: {}", exit_suffix(.exit_code), diagnostics(.stdout, .stderr))]
    ExecutionFailure {
        /// Program that was invoked.
        program: String,
        /// Exit code, when the process ran far enough to report one.
        exit_code: Option<i32>,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error, or the launch error message.
        stderr: String,
    },

    /// The report file could not be created or written.
    #[error("failed to write report {}: {source}", .path.display())]
    IoFailure {
        /// Report path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The layer reference did not resolve to a usable connection string.
    #[error("invalid layer reference {0:?}")]
    InvalidLayerReference(String),

    /// A parameter was missing or carried a value of the wrong kind.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Declared parameter name.
        name: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Environment configuration was inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A cassette file could not be read, parsed or written.
    #[error("cassette error: {0}")]
    Cassette(String),
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!(" with exit code {c}"),
        None => " to launch".to_string(),
    }
}

fn diagnostics(stdout: &str, stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        stdout.trim().to_string()
    } else {
        stderr.to_string()
    }
}
