//! Commit-message patterns.

use once_cell::sync::Lazy;
use regex::Regex;

/// `git revert` boilerplate naming at least an abbreviated (7 digit) hash.
static REVERT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bThis reverts commit ([0-9a-fA-F]{7,40})\b")
        .expect("valid revert regex")
});

static MERGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Merge branch '[A-Za-z0-9._/-]+' into [A-Za-z0-9._/-]+")
        .expect("valid merge regex")
});

/// Returns the hash named by `This reverts commit <hash>`, if present anywhere
/// in the message.
#[must_use]
pub fn reverted_commit(message: &str) -> Option<&str> {
    let captures = REVERT.captures(message)?;
    captures.get(1).map(|m| m.as_str())
}

/// Returns `true` for `Merge branch '<name>' into <name>` messages.
#[must_use]
pub fn is_branch_merge(message: &str) -> bool {
    MERGE.is_match(message)
}

/// Matches a leading `PROJECT-NUMBER` issue key for a fixed set of projects.
#[derive(Debug, Clone)]
pub struct IssueKeyMatcher {
    regex: Regex,
}

impl IssueKeyMatcher {
    /// Builds a matcher for the given project prefixes.
    ///
    /// # Panics
    ///
    /// Never in practice: prefixes are escaped before compilation.
    #[must_use]
    pub fn new<S: AsRef<str>>(projects: &[S]) -> Self {
        let prefixes: Vec<String> = projects
            .iter()
            .map(|project| regex::escape(project.as_ref()))
            .collect();
        let pattern = format!(r"^(?:{})-[0-9]+", prefixes.join("|"));
        let regex = Regex::new(&pattern)
            .expect("escaped project prefixes form a valid regex");
        Self { regex }
    }

    /// Returns the issue key at the very start of `message`.
    #[must_use]
    pub fn leading_key<'m>(&self, message: &'m str) -> Option<&'m str> {
        self.regex.find(message).map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hadoop() -> IssueKeyMatcher {
        IssueKeyMatcher::new(&["HADOOP", "HDFS", "MAPREDUCE", "YARN"])
    }

    #[test]
    fn leading_key_found() {
        let matcher = hadoop();
        assert_eq!(
            matcher.leading_key("HADOOP-1234: fix thing"),
            Some("HADOOP-1234")
        );
        assert_eq!(matcher.leading_key("YARN-9. Something"), Some("YARN-9"));
    }

    #[test]
    fn key_must_lead_the_message() {
        assert_eq!(hadoop().leading_key("Fix for HADOOP-1234"), None);
        assert_eq!(hadoop().leading_key(" HADOOP-1234"), None);
    }

    #[test]
    fn unknown_projects_do_not_match() {
        assert_eq!(hadoop().leading_key("HBASE-12 thing"), None);
        assert_eq!(hadoop().leading_key("HADOOPX-12 thing"), None);
    }

    #[test]
    fn revert_hash_extracted_from_body() {
        let msg = "Revert \"HDFS-7. Thing\"\n\nThis reverts commit abc123def.\n";
        assert_eq!(reverted_commit(msg), Some("abc123def"));
        assert_eq!(reverted_commit("HDFS-7. Thing"), None);
    }

    #[test]
    fn revert_phrase_in_prose_is_not_a_hash() {
        let msg = "HADOOP-5. This reverts commit behaviour from the old parser";
        assert_eq!(reverted_commit(msg), None);
        assert_eq!(reverted_commit("This reverts commit abc12."), None);
        assert_eq!(reverted_commit("This reverts commit abcdef12xyz"), None);
    }

    #[test]
    fn branch_merge_detected() {
        assert!(is_branch_merge("Merge branch 'trunk' into HDFS-7240"));
        let with_conflicts = "Merge branch 'feature-x' into trunk\n\nConflicts: ...";
        assert!(is_branch_merge(with_conflicts));
        assert!(!is_branch_merge("Merge pull request #12 from foo/bar"));
        assert!(!is_branch_merge("HDFS-1. Merge branch logic fixes"));
    }
}
