//! Replaying adapters that answer port calls from the cache.

pub mod git;
pub mod issues;

use std::sync::Mutex;

use serde::Serialize;

use crate::cassette::replayer::{decode_result, CassetteReplayer};
use crate::error::PortError;

pub use git::ReplayingGitRepo;
pub use issues::ReplayingIssueTracker;

/// Takes the next recorded result for `port::method` called with `input`.
///
/// Mirror of `recording::record_result`.
pub(crate) fn replay_result<T, I>(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
    input: &I,
) -> Result<T, PortError>
where
    T: serde::de::DeserializeOwned,
    I: Serialize,
{
    let input = serde_json::to_value(input)?;
    let output = replayer
        .lock()
        .map_err(|_| format!("cache replayer for {port} poisoned"))?
        .next_output(port, method, &input)?;
    Ok(decode_result(output, &format!("{port}::{method}"))?)
}
