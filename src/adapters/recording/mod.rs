//! Recording adapters that capture interactions to cassettes.

pub mod process;

pub use process::RecordingProcessRunner;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Record a `Result<T, E>` interaction using the ok/err JSON convention.
///
/// Mirror of `replaying::extract_result`:
/// - `Ok(v)` is serialized as `{"ok": v}`
/// - `Err(e)` is serialized as `{"err": e.to_string()}`
///
/// # Errors
///
/// Fails if the input or output cannot be serialized, or the recorder lock
/// is poisoned.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input_json = serde_json::to_value(input)?;
    let output_json = match result {
        Ok(v) => serde_json::json!({ "ok": serde_json::to_value(v)? }),
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };

    let mut guard =
        recorder.lock().map_err(|e| format!("{port} recorder lock poisoned: {e}"))?;
    guard.record(port, method, input_json, output_json);
    Ok(())
}
