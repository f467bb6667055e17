//! Live commit source using the `git` CLI.

use std::process::Command;

use crate::error::PortError;
use crate::ports::commits::{Commit, CommitSource, RevisionRange};

/// Field separator between hash and message.
const FIELD_SEP: char = '\0';
/// Record separator after each message.
const RECORD_SEP: char = '\x1e';

/// Live commit source that shells out to `git log`.
pub struct LiveGitRepo;

impl LiveGitRepo {
    fn log_args(range: &RevisionRange) -> Vec<String> {
        let mut args = vec![
            "-C".to_string(),
            range.repo.display().to_string(),
            "log".to_string(),
            "--format=%H%x00%B%x1e".to_string(),
            format!("{}...{}", range.start, range.end),
        ];
        if let Some(exclude) = &range.exclude {
            args.push(format!("^{exclude}"));
        }
        args.push("--".to_string());
        args
    }
}

impl CommitSource for LiveGitRepo {
    fn log(&self, range: &RevisionRange) -> Result<Vec<Commit>, PortError> {
        let args = Self::log_args(range);
        tracing::debug!(?args, "running git");
        let output = Command::new("git").args(&args).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let (start, end) = (&range.start, &range.end);
            let message = format!("git log {start}...{end} failed: {}", stderr.trim());
            return Err(message.into());
        }
        let commits = parse_log(&String::from_utf8_lossy(&output.stdout));
        tracing::info!(
            count = commits.len(),
            start = %range.start,
            end = %range.end,
            "read commits"
        );
        Ok(commits)
    }
}

/// Parses `git log --format=%H%x00%B%x1e` output.
fn parse_log(raw: &str) -> Vec<Commit> {
    raw.split(RECORD_SEP)
        .filter_map(|record| {
            let record = record.trim_start_matches(['\n', '\r']);
            let (id, message) = record.split_once(FIELD_SEP)?;
            let id = id.trim();
            if id.is_empty() {
                return None;
            }
            Some(Commit::new(id, message.trim_end()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn range(exclude: Option<&str>) -> RevisionRange {
        RevisionRange {
            repo: PathBuf::from("/src/hadoop"),
            start: "release-2.7.0".into(),
            end: "HEAD".into(),
            exclude: exclude.map(String::from),
        }
    }

    #[test]
    fn parses_multiline_messages() {
        let raw = "aaa\0HADOOP-1. One\n\nBody line\n\x1e\nbbb\0YARN-2. Two\n\x1e\n";
        let commits = parse_log(raw);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0], Commit::new("aaa", "HADOOP-1. One\n\nBody line"));
        assert_eq!(commits[1], Commit::new("bbb", "YARN-2. Two"));
    }

    #[test]
    fn empty_output_has_no_commits() {
        assert!(parse_log("").is_empty());
        assert!(parse_log("\n").is_empty());
    }

    #[test]
    fn args_use_symmetric_range() {
        let args = LiveGitRepo::log_args(&range(None));
        assert!(args.contains(&"release-2.7.0...HEAD".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("--"));
    }

    #[test]
    fn args_exclude_prior_revision() {
        let args = LiveGitRepo::log_args(&range(Some("release-2.6.0")));
        assert!(args.contains(&"^release-2.6.0".to_string()));
    }

    #[test]
    fn bad_repo_is_an_error() {
        let mut r = range(None);
        r.repo = std::env::temp_dir().join("fixver_no_such_repo_dir");
        assert!(LiveGitRepo.log(&r).is_err());
    }
}
