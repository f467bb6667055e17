//! Replaying adapter for the `IssueTracker` port.

use std::sync::Mutex;

use super::replay_result;
use crate::adapters::recording::issues::{SearchInput, UpdateInput};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{IssueFuture, IssuePage, IssueTracker};

/// Serves cached issue searches and updates.
pub struct ReplayingIssueTracker {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingIssueTracker {
    /// Create a replaying issue tracker backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl IssueTracker for ReplayingIssueTracker {
    fn search<'a>(
        &'a self,
        query: &'a str,
        start_at: usize,
        max_results: usize,
    ) -> IssueFuture<'a, IssuePage> {
        let input = SearchInput {
            query,
            start_at,
            max_results,
        };
        let result = replay_result(&self.replayer, "issues", "search", &input);
        Box::pin(async move { result })
    }

    fn update_fix_versions<'a>(
        &'a self,
        key: &'a str,
        versions: &'a [String],
    ) -> IssueFuture<'a, ()> {
        let input = UpdateInput { key, versions };
        let result = replay_result(&self.replayer, "issues", "update_fix_versions", &input);
        Box::pin(async move { result })
    }
}
