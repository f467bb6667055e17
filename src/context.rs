//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::{LiveGitRepo, LiveJira, TerminalConfirmer};
use crate::adapters::recording::{RecordingGitRepo, RecordingIssueTracker};
use crate::adapters::replaying::{ReplayingGitRepo, ReplayingIssueTracker};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::config::{Credentials, Settings};
use crate::error::PortError;
use crate::ports::{
    Commit, CommitSource, Confirmer, IssueFuture, IssuePage, IssueTracker, RevisionRange,
};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Commit history.
    pub commits: Box<dyn CommitSource>,
    /// Issue tracker.
    pub issues: Box<dyn IssueTracker>,
    /// Operator confirmation.
    pub confirm: Box<dyn Confirmer>,
}

impl ServiceContext {
    /// Builds a context from explicit adapters.
    #[must_use]
    pub fn new(
        commits: Box<dyn CommitSource>,
        issues: Box<dyn IssueTracker>,
        confirm: Box<dyn Confirmer>,
    ) -> Self {
        Self {
            commits,
            issues,
            confirm,
        }
    }

    /// Creates a live context: `git` CLI, JIRA at `settings.jira_url`, terminal prompt.
    #[must_use]
    pub fn live(settings: &Settings, credentials: Option<Credentials>) -> Self {
        Self::new(
            Box::new(LiveGitRepo),
            Box::new(LiveJira::new(settings.jira_url.clone(), credentials)),
            Box::new(TerminalConfirmer),
        )
    }

    /// Creates a live context whose git and tracker calls are also written to `dir`.
    ///
    /// The returned session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be created.
    pub fn recording_at(
        dir: &Path,
        settings: &Settings,
        credentials: Option<Credentials>,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(dir)?;
        let live = Self::live(settings, credentials);
        let commits = RecordingGitRepo::new(live.commits, session.git.clone());
        let issues = RecordingIssueTracker::new(live.issues, session.issues.clone());
        let ctx = Self::new(Box::new(commits), Box::new(issues), live.confirm);
        Ok((ctx, session))
    }

    /// Creates a context that answers git and tracker calls from the cache in `dir`.
    ///
    /// A port with no cassette in `dir` fails every call with a cache error.
    ///
    /// # Errors
    ///
    /// Returns an error if a cassette file cannot be read or parsed.
    pub fn replaying_from(dir: &Path) -> Result<Self, String> {
        let replayers = CassetteConfig::from_dir(dir).load_all()?;
        let dir = dir.display().to_string();

        let commits: Box<dyn CommitSource> = match replayers.git {
            Some(r) => Box::new(ReplayingGitRepo::new(r)),
            None => Box::new(Uncached { dir: dir.clone() }),
        };
        let issues: Box<dyn IssueTracker> = match replayers.issues {
            Some(r) => Box::new(ReplayingIssueTracker::new(r)),
            None => Box::new(Uncached { dir }),
        };
        Ok(Self::new(commits, issues, Box::new(TerminalConfirmer)))
    }
}

/// Stand-in for a port whose cassette is missing from the cache directory.
struct Uncached {
    dir: String,
}

impl Uncached {
    fn error(&self, port: &str) -> PortError {
        format!("no {port} cache in {}", self.dir).into()
    }
}

impl CommitSource for Uncached {
    fn log(&self, _range: &RevisionRange) -> Result<Vec<Commit>, PortError> {
        Err(self.error("git"))
    }
}

impl IssueTracker for Uncached {
    fn search<'a>(
        &'a self,
        _query: &'a str,
        _start_at: usize,
        _max_results: usize,
    ) -> IssueFuture<'a, IssuePage> {
        let err = self.error("issues");
        Box::pin(async move { Err(err) })
    }

    fn update_fix_versions<'a>(
        &'a self,
        _key: &'a str,
        _versions: &'a [String],
    ) -> IssueFuture<'a, ()> {
        let err = self.error("issues");
        Box::pin(async move { Err(err) })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::cassette::session::cassette_path;

    fn range() -> RevisionRange {
        RevisionRange {
            repo: PathBuf::from("/src"),
            start: "v1".into(),
            end: "HEAD".into(),
            exclude: None,
        }
    }

    #[test]
    fn replaying_reads_git_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = CassetteRecorder::new(cassette_path(dir.path(), "git"), "git");
        recorder.record(
            "git",
            "log",
            serde_json::to_value(range()).unwrap(),
            serde_json::json!({"ok": [{"id": "abc", "message": "YARN-1. x"}]}),
        );
        recorder.finish().unwrap();

        let ctx = ServiceContext::replaying_from(dir.path()).unwrap();
        let commits = ctx.commits.log(&range()).unwrap();
        assert_eq!(commits[0].id, "abc");
    }

    #[tokio::test]
    async fn missing_cassette_fails_calls_instead_of_panicking() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ServiceContext::replaying_from(dir.path()).unwrap();

        let err = ctx.commits.log(&range()).unwrap_err();
        assert!(err.to_string().contains("no git cache"));
        let err = ctx.issues.search("q", 0, 10).await.unwrap_err();
        assert!(err.to_string().contains("no issues cache"));
    }

    #[test]
    fn recording_context_finishes_session_after_drop() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("cache");
        let settings = Settings::default();
        let recording = ServiceContext::recording_at(&cache, &settings, None);
        let (ctx, session) = recording.unwrap();
        drop(ctx);
        let out = session.finish().unwrap();
        assert!(cassette_path(&out, "git").exists());
        assert!(cassette_path(&out, "issues").exists());
    }
}
