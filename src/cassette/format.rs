//! On-disk cache format: a cassette of recorded port calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded call to a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the recording (assigned by the recorder).
    pub seq: u64,
    /// Port name (`git` or `issues`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Arguments of the call.
    pub input: serde_json::Value,
    /// Result of the call, as `{"ok": ..}` or `{"err": ".."}`.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When the data was fetched.
    pub recorded_at: DateTime<Utc>,
    /// `fixver` version that wrote the cassette.
    pub tool_version: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Parses a cassette from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if `yaml` is not a valid cassette.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serializes the cassette to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorded value cannot be represented in YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_hand_written_cassette() {
        let yaml = r#"
name: cache-git
recorded_at: 2026-10-01T12:00:00Z
tool_version: 0.1.0
interactions:
  - seq: 0
    port: git
    method: log
    input: {start: a, end: b}
    output:
      ok:
        - id: abc123
          message: "HADOOP-1. Fix"
"#;
        let cassette = Cassette::from_yaml(yaml).unwrap();
        assert_eq!(cassette.interactions.len(), 1);
        let output = &cassette.interactions[0].output;
        assert_eq!(output["ok"][0]["id"], json!("abc123"));
        let recorded_at = cassette.recorded_at.to_rfc3339();
        assert_eq!(recorded_at, "2026-10-01T12:00:00+00:00");
    }
}
