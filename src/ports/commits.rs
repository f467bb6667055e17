//! Commit source port for reading version-control history.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PortError;

/// A commit read from the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The full content hash.
    pub id: String,
    /// The full commit message.
    pub message: String,
}

impl Commit {
    /// Creates a commit from an id and message.
    #[must_use]
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }

    /// First line of the message.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// First seven bytes of the id, or the whole id when shorter or when the
    /// cut would split a character.
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.id.get(..7).unwrap_or(&self.id)
    }
}

/// The slice of history to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRange {
    /// Repository working directory.
    pub repo: PathBuf,
    /// Starting ref.
    pub start: String,
    /// Ending ref.
    pub end: String,
    /// Commits reachable from this ref are left out.
    pub exclude: Option<String>,
}

/// Provides commits between two revisions.
///
/// Abstracting history access allows the reconciler to run against a cached
/// or hand-built commit list instead of a real repository.
pub trait CommitSource: Send + Sync {
    /// Returns the commits in `range`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if a ref cannot be resolved or history cannot be read.
    fn log(&self, range: &RevisionRange) -> Result<Vec<Commit>, PortError>;
}
