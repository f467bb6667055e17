//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the reconciler and an external
//! system (git history, the issue tracker, the operator's terminal).
//! Implementations live in `src/adapters/`.

pub mod commits;
pub mod issues;
pub mod prompt;

pub use commits::{Commit, CommitSource, RevisionRange};
pub use issues::{Issue, IssueFuture, IssuePage, IssueTracker};
pub use prompt::Confirmer;
