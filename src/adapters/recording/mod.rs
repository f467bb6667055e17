//! Recording adapters that write port calls to the cache.

pub mod git;
pub mod issues;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

pub use git::RecordingGitRepo;
pub use issues::RecordingIssueTracker;

/// Records a `Result<T, E>` call using the ok/err JSON convention.
///
/// - `Ok(v)` is stored as `{"ok": v}`
/// - `Err(e)` is stored as `{"err": e.to_string()}`
///
/// Recording is best effort: a value that fails to serialize is logged and
/// the call's result is still returned to the caller unchanged.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let encoded = serde_json::to_value(input).and_then(|input| {
        let output = match result {
            Ok(v) => {
                let value = serde_json::to_value(v)?;
                serde_json::json!({ "ok": value })
            }
            Err(e) => serde_json::json!({ "err": e.to_string() }),
        };
        Ok((input, output))
    });

    match (encoded, recorder.lock()) {
        (Ok((input, output)), Ok(mut guard)) => guard.record(port, method, input, output),
        (Err(e), _) => tracing::warn!(port, method, error = %e, "could not cache call"),
        (_, Err(_)) => tracing::warn!(port, method, "cache recorder lock poisoned"),
    }
}
