//! Issue tracker port for querying and editing release labels.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::PortError;

/// Boxed future type alias used by [`IssueTracker`] to keep the trait dyn-compatible.
pub type IssueFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PortError>> + Send + 'a>>;

/// Represents an issue in the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Project-prefixed key, e.g. `HADOOP-1234`.
    pub key: String,
    /// Owning project key, e.g. `HADOOP`.
    pub project: String,
    /// Release labels currently assigned, in tracker order.
    pub fix_versions: Vec<String>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuePage {
    /// Offset of the first issue in this page.
    pub start_at: usize,
    /// Total number of issues matching the query.
    pub total: usize,
    /// Issues in this page.
    pub issues: Vec<Issue>,
}

/// Queries and updates issues in an external tracker.
pub trait IssueTracker: Send + Sync {
    /// Returns one page of issues matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    fn search<'a>(
        &'a self,
        query: &'a str,
        start_at: usize,
        max_results: usize,
    ) -> IssueFuture<'a, IssuePage>;

    /// Replaces the fix versions of issue `key` with `versions`.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue cannot be found or updated.
    fn update_fix_versions<'a>(
        &'a self,
        key: &'a str,
        versions: &'a [String],
    ) -> IssueFuture<'a, ()>;
}

