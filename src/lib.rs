//! Run `ogrinfo` against a vector layer and capture its listing as an HTML
//! report.
//!
//! The pieces:
//! - [`algorithm`]: declared parameters and outputs, and the `ogrinfo`
//!   command line built from them.
//! - [`adapter`]: runs the command through the process port and renders
//!   the captured output with [`report`].
//! - [`ports`] / [`adapters`]: the external collaborators (process runner,
//!   connection-string resolver, feedback sink) and their live, recording
//!   and replaying implementations.

pub mod adapter;
pub mod adapters;
pub mod algorithm;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod ports;
pub mod report;

pub use error::{Error, Result};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
