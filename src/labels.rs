//! Release-label (fix version) edits.

use serde::{Deserialize, Serialize};

use crate::ports::Issue;

/// The label edit applied to every selected issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRule {
    /// Label added when absent.
    pub target: String,
    /// Label removed when present.
    pub superseded: String,
}

/// Before and after fix versions for one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelChange {
    /// The issue key.
    pub key: String,
    /// Fix versions as fetched.
    pub before: Vec<String>,
    /// Fix versions after applying the rule.
    pub after: Vec<String>,
}

impl LabelChange {
    /// Returns `true` if the rule changes nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }

    /// The two change-log lines for this issue.
    #[must_use]
    pub fn log_lines(&self) -> String {
        format!(
            "{key} old fix versions: {before}\n{key} new fix versions: {after}\n",
            key = self.key,
            before = self.before.join(","),
            after = self.after.join(","),
        )
    }
}

impl LabelRule {
    /// Computes the new fix versions for `issue`.
    #[must_use]
    pub fn apply(&self, issue: &Issue) -> LabelChange {
        let before = issue.fix_versions.clone();
        let mut after = before.clone();
        if !after.contains(&self.target) {
            after.push(self.target.clone());
        }
        after.retain(|v| *v != self.superseded);
        LabelChange {
            key: issue.key.clone(),
            before,
            after,
        }
    }
}
