//! Recording adapter for the `IssueTracker` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{IssueFuture, IssuePage, IssueTracker};

/// Records issue tracker interactions while delegating to an inner implementation.
pub struct RecordingIssueTracker {
    inner: Box<dyn IssueTracker>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingIssueTracker {
    /// Creates a new recording issue tracker wrapping the given implementation.
    pub fn new(inner: Box<dyn IssueTracker>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
pub(crate) struct SearchInput<'a> {
    pub(crate) query: &'a str,
    pub(crate) start_at: usize,
    pub(crate) max_results: usize,
}

#[derive(Serialize)]
pub(crate) struct UpdateInput<'a> {
    pub(crate) key: &'a str,
    pub(crate) versions: &'a [String],
}

impl IssueTracker for RecordingIssueTracker {
    fn search<'a>(
        &'a self,
        query: &'a str,
        start_at: usize,
        max_results: usize,
    ) -> IssueFuture<'a, IssuePage> {
        Box::pin(async move {
            let result = self.inner.search(query, start_at, max_results).await;
            let input = SearchInput {
                query,
                start_at,
                max_results,
            };
            record_result(&self.recorder, "issues", "search", &input, &result);
            result
        })
    }

    fn update_fix_versions<'a>(
        &'a self,
        key: &'a str,
        versions: &'a [String],
    ) -> IssueFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.update_fix_versions(key, versions).await;
            let input = UpdateInput { key, versions };
            record_result(
                &self.recorder,
                "issues",
                "update_fix_versions",
                &input,
                &result,
            );
            result
        })
    }
}
