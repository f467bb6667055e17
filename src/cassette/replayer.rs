//! Serves recorded port calls back from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions in recorded order, per port/method pair.
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues
                .entry(key)
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Returns the recorded output of the next `port::method` call.
    ///
    /// # Errors
    ///
    /// Returns an error if no call is left for `port::method`, or if the next
    /// recorded call was made with different arguments than `input`.
    pub fn next_output(
        &mut self,
        port: &str,
        method: &str,
        input: &serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let key = PortMethodKey {
            port: port.to_string(),
            method: method.to_string(),
        };
        let interaction = self
            .queues
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| format!("cache has no more recorded {port}::{method} calls"))?;

        if interaction.input != *input {
            return Err(format!(
                "cache was recorded for a different {port}::{method} call \
                 (recorded {}, requested {input})",
                interaction.input
            ));
        }
        Ok(interaction.output)
    }
}

/// Converts a recorded `{"ok": ..}` / `{"err": ..}` output into a result.
///
/// # Errors
///
/// Returns the recorded error message, or a decoding error.
pub fn decode_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, String> {
    if let Some(err) = output.get("err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string());
    }
    let value = output.get("ok").cloned().unwrap_or(serde_json::Value::Null);
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to decode cache: {e}"))
}
