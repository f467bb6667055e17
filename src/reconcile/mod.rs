//! Commit–issue reconciliation.
//!
//! Three single-pass stages over an in-memory commit list:
//!
//! 1. [`filter::find_skipped`] finds revert pairs and branch merges.
//! 2. [`index::build_index`] maps each remaining commit to issue keys, using
//!    fixups first and the commit message second.
//! 3. [`report::reconcile`] compares the index with the issues the tracker
//!    lists for a release and reports both directions of mismatch.

pub mod filter;
pub mod fixups;
pub mod index;
pub mod patterns;
pub mod report;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use filter::{find_skipped, SkipSet};
pub use fixups::{FixupTarget, Fixups};
pub use index::{build_index, CommitIndex, IndexRules, Resolution};
pub use patterns::IssueKeyMatcher;
pub use report::{reconcile, Counts, KnownKeys, OrphanKey, Report};

use crate::ports::{Commit, Issue};

/// Operator-supplied overrides, as stored in a fixups file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileInputs {
    /// Commit id to issue-key overrides.
    pub fixups: Fixups,
    /// Commit ids excluded from every bucket.
    #[serde(rename = "ignore")]
    pub ignored_commits: BTreeSet<String>,
    /// Issue keys excluded from every bucket.
    #[serde(rename = "ignore_issues")]
    pub ignored_issues: BTreeSet<String>,
}

/// Runs the three reconciliation stages with fixed inputs.
#[derive(Debug, Clone)]
pub struct Reconciler {
    matcher: IssueKeyMatcher,
    inputs: ReconcileInputs,
    declared: BTreeSet<String>,
}

impl Reconciler {
    /// Creates a reconciler recognising keys of `projects`.
    #[must_use]
    pub fn new<S: AsRef<str>>(projects: &[S], inputs: ReconcileInputs) -> Self {
        let declared = inputs.fixups.declared_keys().map(str::to_string).collect();
        Self {
            matcher: IssueKeyMatcher::new(projects),
            inputs,
            declared,
        }
    }

    /// Filters and indexes `commits`.
    #[must_use]
    pub fn index(&self, commits: &[Commit]) -> CommitIndex {
        let skip = find_skipped(commits);
        let rules = IndexRules {
            matcher: &self.matcher,
            fixups: &self.inputs.fixups,
            ignored_commits: &self.inputs.ignored_commits,
        };
        build_index(commits, &skip, &rules)
    }

    /// Indexes `commits` and compares them with the `issues` for `fix_version`.
    #[must_use]
    pub fn reconcile(&self, fix_version: &str, commits: &[Commit], issues: &[Issue]) -> Report {
        let index = self.index(commits);
        let known = KnownKeys {
            ignored: &self.inputs.ignored_issues,
            declared: &self.declared,
        };
        reconcile(fix_version, &index, issues, known)
    }
}
