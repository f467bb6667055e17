//! Revert and merge detection.
//!
//! A revert is skipped together with the commit it undoes, but only when both
//! are in the same history slice. A revert whose target lies outside the slice
//! stays in play so it shows up as its own change. Branch merges are always
//! skipped.

use std::collections::BTreeSet;

use super::patterns::{is_branch_merge, reverted_commit};
use crate::ports::Commit;

/// Commit ids excluded from indexing, split by reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet {
    /// Reverting commits and the commits they revert.
    pub reverts: BTreeSet<String>,
    /// Branch merge records.
    pub merges: BTreeSet<String>,
}

impl SkipSet {
    /// Returns `true` if `id` is a revert pair member.
    #[must_use]
    pub fn is_revert(&self, id: &str) -> bool {
        self.reverts.contains(id)
    }

    /// Returns `true` if `id` is a branch merge.
    #[must_use]
    pub fn is_merge(&self, id: &str) -> bool {
        self.merges.contains(id)
    }
}

/// Scans `commits` for revert pairs and branch merges.
#[must_use]
pub fn find_skipped(commits: &[Commit]) -> SkipSet {
    let mut skip = SkipSet::default();

    for commit in commits {
        if is_branch_merge(&commit.message) {
            tracing::debug!(commit = commit.short_id(), "branch merge, skipping");
            skip.merges.insert(commit.id.clone());
        }

        let Some(target) = reverted_commit(&commit.message) else {
            continue;
        };
        match resolve_in(commits, target) {
            Some(reverted) => {
                tracing::debug!(
                    commit = commit.short_id(),
                    reverted = reverted.short_id(),
                    "revert pair, skipping both"
                );
                skip.reverts.insert(commit.id.clone());
                skip.reverts.insert(reverted.id.clone());
            }
            None => {
                tracing::debug!(
                    commit = commit.short_id(),
                    reverted = target,
                    "reverted commit outside range, keeping revert"
                );
            }
        }
    }

    skip
}

/// Finds the commit `reference` names, by full id or unambiguous prefix.
fn resolve_in<'a>(commits: &'a [Commit], reference: &str) -> Option<&'a Commit> {
    let reference = reference.to_ascii_lowercase();
    let exact = commits
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(&reference));
    if exact.is_some() {
        return exact;
    }
    let mut candidates = commits
        .iter()
        .filter(|c| c.id.to_ascii_lowercase().starts_with(&reference));
    match (candidates.next(), candidates.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_pair_skips_both() {
        let commits = vec![
            Commit::new("def4567", "This reverts commit abc1234."),
            Commit::new("abc1234", "HADOOP-1. Original change"),
            Commit::new("9999999", "HADOOP-2. Unrelated"),
        ];
        let skip = find_skipped(&commits);
        assert!(skip.is_revert("def4567"));
        assert!(skip.is_revert("abc1234"));
        assert!(!skip.is_revert("9999999"));
        assert_eq!(skip.reverts.len(), 2);
        assert!(skip.merges.is_empty());
    }

    #[test]
    fn unpaired_revert_is_kept() {
        let commits = vec![Commit::new("def4567", "This reverts commit 0badc0de.")];
        let skip = find_skipped(&commits);
        assert_eq!(skip, SkipSet::default());
    }

    #[test]
    fn abbreviated_revert_target_resolves_to_full_id() {
        let commits = vec![
            Commit::new("1111111111", "This reverts commit abcdef1."),
            Commit::new("abcdef1234", "YARN-3. Change"),
        ];
        let skip = find_skipped(&commits);
        assert!(skip.is_revert("abcdef1234"));
        assert!(skip.is_revert("1111111111"));
    }

    #[test]
    fn ambiguous_prefix_is_not_paired() {
        let commits = vec![
            Commit::new("1111111111", "This reverts commit abc0000."),
            Commit::new("abc0000000", "YARN-3. Change"),
            Commit::new("abc0000111", "YARN-4. Change"),
        ];
        assert_eq!(find_skipped(&commits), SkipSet::default());
    }

    #[test]
    fn prose_after_revert_phrase_pairs_nothing() {
        let commits = vec![
            Commit::new(
                "1111111111",
                "HADOOP-5. This reverts commit behaviour from the old parser",
            ),
            Commit::new("be12345678", "HDFS-9. Unrelated change"),
        ];
        let skip = find_skipped(&commits);
        assert!(!skip.is_revert("be12345678"));
        assert!(!skip.is_revert("1111111111"));
    }

    #[test]
    fn merges_always_skipped() {
        let commits = vec![
            Commit::new("m1", "Merge branch 'trunk' into HDFS-7240"),
            Commit::new("c1", "HDFS-1. Change"),
        ];
        let skip = find_skipped(&commits);
        assert!(skip.is_merge("m1"));
        assert!(!skip.is_merge("c1"));
        assert_eq!(skip.merges.len(), 1);
    }
}
