//! Commit indexing by issue key.

use std::collections::{BTreeMap, BTreeSet};

use super::filter::SkipSet;
use super::fixups::Fixups;
use super::patterns::{reverted_commit, IssueKeyMatcher};
use crate::ports::Commit;

/// How a single commit was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The commit resolves to these issue keys.
    Keys(Vec<String>),
    /// No fixup, issue key, or revert reference was found.
    Unidentified,
    /// Listed in the commit ignore set.
    Ignored,
    /// A branch merge record.
    Merge,
    /// Half of a revert pair.
    Reverted,
}

/// Static inputs that steer indexing.
#[derive(Debug, Clone, Copy)]
pub struct IndexRules<'a> {
    /// Leading issue-key matcher.
    pub matcher: &'a IssueKeyMatcher,
    /// Manual overrides.
    pub fixups: &'a Fixups,
    /// Commit ids left out of every bucket.
    pub ignored_commits: &'a BTreeSet<String>,
}

impl IndexRules<'_> {
    /// Classifies one commit.
    ///
    /// Ignore and merge exclusions win over fixups; fixups win over
    /// revert-pair exclusion and over the message itself.
    #[must_use]
    pub fn resolve(&self, commit: &Commit, skip: &SkipSet) -> Resolution {
        if self.ignored_commits.contains(&commit.id) {
            return Resolution::Ignored;
        }
        if skip.is_merge(&commit.id) {
            return Resolution::Merge;
        }
        if let Some(target) = self.fixups.get(&commit.id) {
            return Resolution::Keys(target.keys().to_vec());
        }
        if skip.is_revert(&commit.id) {
            return Resolution::Reverted;
        }
        if let Some(key) = self.matcher.leading_key(&commit.message) {
            return Resolution::Keys(vec![key.to_string()]);
        }
        if let Some(reverted) = reverted_commit(&commit.message) {
            return Resolution::Keys(vec![reverted.to_string()]);
        }
        Resolution::Unidentified
    }
}

/// Commits grouped by the issue keys they resolve to.
///
/// Every input commit lands in exactly one of `by_key`, `unidentified`,
/// `ignored`, or `skipped`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitIndex {
    /// Issue key to commits, in discovery order.
    pub by_key: BTreeMap<String, Vec<Commit>>,
    /// Commits with no discoverable issue key.
    pub unidentified: Vec<Commit>,
    /// Commits dropped by the ignore set.
    pub ignored: Vec<Commit>,
    /// Reverts and merges left out of matching.
    pub skipped: Vec<Commit>,
}

impl CommitIndex {
    /// Number of distinct issue keys.
    #[must_use]
    pub fn identified_keys(&self) -> usize {
        self.by_key.len()
    }

    /// Returns `true` if `key` has at least one commit.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Commits recorded under `key`.
    #[must_use]
    pub fn commits_for(&self, key: &str) -> &[Commit] {
        self.by_key.get(key).map_or(&[], Vec::as_slice)
    }
}

/// Builds the issue-key index for `commits`.
#[must_use]
pub fn build_index(commits: &[Commit], skip: &SkipSet, rules: &IndexRules<'_>) -> CommitIndex {
    let mut index = CommitIndex::default();

    for commit in commits {
        match rules.resolve(commit, skip) {
            Resolution::Keys(keys) => {
                for key in keys {
                    index.by_key.entry(key).or_default().push(commit.clone());
                }
            }
            Resolution::Unidentified => {
                tracing::debug!(
                    commit = commit.short_id(),
                    subject = commit.subject(),
                    "unidentified"
                );
                index.unidentified.push(commit.clone());
            }
            Resolution::Ignored => index.ignored.push(commit.clone()),
            Resolution::Merge | Resolution::Reverted => index.skipped.push(commit.clone()),
        }
    }

    index
}
