//! Comparing the commit index against the issues expected for a release.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use serde::Serialize;

use super::index::CommitIndex;
use crate::ports::{Commit, Issue};

/// An index key with no matching tracker issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanKey {
    /// The issue key found in history.
    pub key: String,
    /// Commits recorded under it.
    pub commits: Vec<Commit>,
}

/// Aggregate counts for a reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    /// Reverts and merges excluded from matching.
    pub skipped: usize,
    /// Commits dropped by the ignore set.
    pub ignored: usize,
    /// Distinct issue keys found in history.
    pub identified: usize,
    /// Commits with no discoverable issue key.
    pub unidentified: usize,
    /// Queried issues that have commits.
    pub matched: usize,
    /// Queried issues with no commits.
    pub issues_missing_commits: usize,
    /// Index keys with no queried issue.
    pub commits_missing_issues: usize,
}

/// Discrepancy report for one release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// The release label that was checked.
    pub fix_version: String,
    /// Queried issues that have commits, by key.
    pub matched: Vec<String>,
    /// Commits with no discoverable issue key.
    pub unidentified: Vec<Commit>,
    /// Queried issues with no commits.
    pub issues_missing_commits: Vec<Issue>,
    /// Index keys with no queried issue.
    pub commits_missing_issues: Vec<OrphanKey>,
    /// Aggregate counts.
    pub counts: Counts,
}

impl Report {
    /// Returns `true` if any discrepancy bucket is non-empty.
    #[must_use]
    pub fn has_discrepancy(&self) -> bool {
        self.counts.unidentified
            + self.counts.issues_missing_commits
            + self.counts.commits_missing_issues
            > 0
    }

    /// Renders the report as plain text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        if !self.unidentified.is_empty() {
            let _ = writeln!(out, "Unidentified commits:");
            for commit in &self.unidentified {
                let _ = writeln!(out, "  {} {}", commit.id, commit.subject());
            }
        }
        if !self.issues_missing_commits.is_empty() {
            let _ = writeln!(out, "Issues missing commits:");
            for issue in &self.issues_missing_commits {
                let _ = writeln!(out, "  {}", issue.key);
            }
        }
        if !self.commits_missing_issues.is_empty() {
            let _ = writeln!(out, "Commits missing issues:");
            for orphan in &self.commits_missing_issues {
                let _ = writeln!(out, "  {}", orphan.key);
                for commit in &orphan.commits {
                    let _ = writeln!(out, "    {} {}", commit.short_id(), commit.subject());
                }
            }
        }

        let c = &self.counts;
        let _ = writeln!(out, "Fix version: {}", self.fix_version);
        let _ = writeln!(out, "Number commits in skip list: {}", c.skipped);
        let _ = writeln!(out, "Number ignored commits: {}", c.ignored);
        let _ = writeln!(out, "Number identified commits: {}", c.identified);
        let _ = writeln!(out, "Number unidentified commits: {}", c.unidentified);
        let _ = writeln!(out, "Number issues with matching commit(s): {}", c.matched);
        let missing_commits = c.issues_missing_commits;
        let _ = writeln!(out, "Number issues with missing commits: {missing_commits}");
        let missing_issues = c.commits_missing_issues;
        let _ = writeln!(out, "Number commits with missing issues: {missing_issues}");
        out
    }
}

/// Keys that must never be reported as orphans or missing.
#[derive(Debug, Clone, Copy)]
pub struct KnownKeys<'a> {
    /// Issue keys the operator asked to ignore.
    pub ignored: &'a BTreeSet<String>,
    /// Keys declared by fixups, known even if the tracker query missed them.
    pub declared: &'a BTreeSet<String>,
}

/// Compares `index` against the `issues` queried for `fix_version`.
#[must_use]
pub fn reconcile(
    fix_version: &str,
    index: &CommitIndex,
    issues: &[Issue],
    known: KnownKeys<'_>,
) -> Report {
    let queried: BTreeSet<&str> = issues.iter().map(|i| i.key.as_str()).collect();

    let mut matched = Vec::new();
    let mut issues_missing_commits = Vec::new();
    for issue in issues {
        if known.ignored.contains(&issue.key) {
            continue;
        }
        if index.contains_key(&issue.key) {
            matched.push(issue.key.clone());
        } else {
            tracing::warn!(issue = %issue.key, "issue has no commits");
            issues_missing_commits.push(issue.clone());
        }
    }

    let commits_missing_issues: Vec<OrphanKey> = index
        .by_key
        .iter()
        .filter(|(key, _)| {
            !queried.contains(key.as_str())
                && !known.declared.contains(*key)
                && !known.ignored.contains(*key)
        })
        .map(|(key, commits)| {
            tracing::warn!(key = %key, commits = commits.len(), "commits have no matching issue");
            OrphanKey {
                key: key.clone(),
                commits: commits.clone(),
            }
        })
        .collect();

    let counts = Counts {
        skipped: index.skipped.len(),
        ignored: index.ignored.len(),
        identified: index.identified_keys(),
        unidentified: index.unidentified.len(),
        matched: matched.len(),
        issues_missing_commits: issues_missing_commits.len(),
        commits_missing_issues: commits_missing_issues.len(),
    };

    Report {
        fix_version: fix_version.to_string(),
        matched,
        unidentified: index.unidentified.clone(),
        issues_missing_commits,
        commits_missing_issues,
        counts,
    }
}
