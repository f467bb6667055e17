//! Replaying adapter for the `CommitSource` port.

use std::sync::Mutex;

use super::replay_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::PortError;
use crate::ports::{Commit, CommitSource, RevisionRange};

/// Serves cached commit logs.
pub struct ReplayingGitRepo {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingGitRepo {
    /// Creates a new replaying commit source from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl CommitSource for ReplayingGitRepo {
    fn log(&self, range: &RevisionRange) -> Result<Vec<Commit>, PortError> {
        replay_result(&self.replayer, "git", "log", range)
    }
}
