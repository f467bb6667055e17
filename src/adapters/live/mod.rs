//! Live adapters for real external interactions.

pub mod git;
pub mod jira;
pub mod prompt;

pub use git::LiveGitRepo;
pub use jira::LiveJira;
pub use prompt::TerminalConfirmer;
