//! Manual commit-to-issue overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The issue keys a fixup assigns to one commit. Never empty.
///
/// Input files may give a single key or a list; both parse into this form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTarget", into = "Vec<String>")]
pub struct FixupTarget(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTarget {
    One(String),
    Many(Vec<String>),
}

impl TryFrom<RawTarget> for FixupTarget {
    type Error = String;

    fn try_from(raw: RawTarget) -> Result<Self, Self::Error> {
        match raw {
            RawTarget::One(key) => Self::new(vec![key]),
            RawTarget::Many(keys) => Self::new(keys),
        }
    }
}

impl From<FixupTarget> for Vec<String> {
    fn from(target: FixupTarget) -> Self {
        target.0
    }
}

impl FixupTarget {
    /// Builds a target from `keys`, rejecting an empty or blank list.
    ///
    /// # Errors
    ///
    /// Returns an error if `keys` is empty or contains a blank key.
    pub fn new(keys: Vec<String>) -> Result<Self, String> {
        if keys.is_empty() {
            return Err("fixup must name at least one issue key".to_string());
        }
        if keys.iter().any(|k| k.trim().is_empty()) {
            return Err("fixup issue keys must not be blank".to_string());
        }
        Ok(Self(keys))
    }

    /// The issue keys, in the order given.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.0
    }
}

/// Commit id to issue-key overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixups(BTreeMap<String, FixupTarget>);

impl Fixups {
    /// Creates an empty override table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the override for `commit`.
    pub fn insert(&mut self, commit: impl Into<String>, target: FixupTarget) {
        self.0.insert(commit.into(), target);
    }

    /// Returns the override for `commit`, if any.
    #[must_use]
    pub fn get(&self, commit: &str) -> Option<&FixupTarget> {
        self.0.get(commit)
    }

    /// Every issue key named by any override.
    pub fn declared_keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .values()
            .flat_map(|t| t.keys().iter().map(String::as_str))
    }

    /// Number of overridden commits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when there are no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
