//! Paged issue queries.

use crate::error::PortError;
use crate::ports::{Issue, IssueTracker};

/// Default number of issues requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Fetches every issue matching `query`, one page at a time.
///
/// Stops when a page comes back empty or the tracker's reported total has been
/// reached.
///
/// # Errors
///
/// Returns the first page error; partial results are discarded.
pub async fn fetch_all(
    tracker: &dyn IssueTracker,
    query: &str,
    page_size: usize,
) -> Result<Vec<Issue>, PortError> {
    let page_size = page_size.max(1);
    let mut issues: Vec<Issue> = Vec::new();
    loop {
        tracing::info!(
            "Fetching batch of issues {} to {}",
            issues.len(),
            issues.len() + page_size - 1
        );
        let page = tracker.search(query, issues.len(), page_size).await?;
        let fetched = page.issues.len();
        issues.extend(page.issues);
        if fetched == 0 || issues.len() >= page.total {
            break;
        }
    }
    tracing::debug!(count = issues.len(), "query complete");
    Ok(issues)
}
