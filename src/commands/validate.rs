//! `fixver validate` command.

use std::path::PathBuf;

use tokio::runtime::Runtime;

use crate::config::{Credentials, Settings};
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::inputs::{load_fixups, load_key_list};
use crate::ports::RevisionRange;
use crate::reconcile::{ReconcileInputs, Reconciler, Report};
use crate::tracker::fetch_all;

/// Options from the command line.
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// History to read.
    pub range: RevisionRange,
    /// Release label to validate.
    pub fix_version: String,
    /// Fixups file; may be absent on disk.
    pub fixups: PathBuf,
    /// Issue keys that need no commit.
    pub whitelist: Option<PathBuf>,
    /// Directory to record fetched data into.
    pub save_cache: Option<PathBuf>,
    /// Directory to replay fetched data from.
    pub load_cache: Option<PathBuf>,
}

/// Execute the `validate` command and print the report to stdout.
///
/// Returns `true` if the report has any discrepancy.
///
/// # Errors
///
/// Returns an error if an input file, git, the tracker, or the cache fails.
pub fn run(runtime: &Runtime, settings: &Settings, options: &ValidateOptions) -> Result<bool> {
    let mut inputs = load_fixups(&options.fixups)?;
    if let Some(path) = &options.whitelist {
        let keys = load_key_list(path)?;
        tracing::info!(count = keys.len(), "loaded whitelisted JIRAs");
        inputs.ignored_issues.extend(keys);
    }

    let (ctx, session) = if let Some(dir) = &options.load_cache {
        tracing::info!("Loading cached commits and issues from {}", dir.display());
        let ctx = ServiceContext::replaying_from(dir).map_err(Error::Cache)?;
        (ctx, None)
    } else {
        // Anonymous access is enough for public trackers.
        let credentials = Credentials::from_env().ok();
        match &options.save_cache {
            Some(dir) => {
                let (ctx, session) = ServiceContext::recording_at(dir, settings, credentials)
                    .map_err(Error::Cache)?;
                (ctx, Some(session))
            }
            None => (ServiceContext::live(settings, credentials), None),
        }
    };

    let validation = validate_release(&ctx, settings, options, inputs);
    let result = runtime.block_on(validation);

    // Finish recording even on error; the context holds the recorders.
    if let Some(session) = session {
        drop(ctx);
        let dir = session.finish().map_err(Error::Cache)?;
        eprintln!("Cache saved to: {}", dir.display());
    }

    let report = result?;
    print!("{}", report.render());
    Ok(report.has_discrepancy())
}

/// Reads the commit range and the issues labelled `fix_version`, then reconciles them.
///
/// # Errors
///
/// Returns [`Error::Git`] or [`Error::Tracker`] if either source fails.
pub async fn validate_release(
    ctx: &ServiceContext,
    settings: &Settings,
    options: &ValidateOptions,
    inputs: ReconcileInputs,
) -> Result<Report> {
    let range = &options.range;
    let excluding = match &range.exclude {
        Some(r) => format!(" excluding {r}"),
        None => String::new(),
    };
    tracing::info!(
        repo = %range.repo.display(),
        "Reading commits {}...{}{excluding}",
        range.start,
        range.end
    );
    let commits = ctx.commits.log(range).map_err(Error::Git)?;
    tracing::info!(count = commits.len(), "read commits");

    let query = settings.validate_query(&options.fix_version);
    let issues = fetch_all(ctx.issues.as_ref(), &query, settings.page_size)
        .await
        .map_err(Error::Tracker)?;
    tracing::info!("Found {} issues for {}", issues.len(), options.fix_version);

    let reconciler = Reconciler::new(&settings.projects, inputs);
    let report = reconciler.reconcile(&options.fix_version, &commits, &issues);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortError;
    use crate::ports::{
        Commit, CommitSource, Confirmer, Issue, IssueFuture, IssuePage, IssueTracker,
    };
    use crate::reconcile::{FixupTarget, Fixups};

    struct FixedCommits(Vec<Commit>);

    impl CommitSource for FixedCommits {
        fn log(&self, _range: &RevisionRange) -> std::result::Result<Vec<Commit>, PortError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenGit;

    impl CommitSource for BrokenGit {
        fn log(&self, _range: &RevisionRange) -> std::result::Result<Vec<Commit>, PortError> {
            Err("fatal: bad revision 'nope...HEAD'".into())
        }
    }

    struct FixedIssues(Vec<Issue>);

    impl IssueTracker for FixedIssues {
        fn search<'a>(
            &'a self,
            query: &'a str,
            start_at: usize,
            _max_results: usize,
        ) -> IssueFuture<'a, IssuePage> {
            assert!(query.contains("fixVersion in (\"3.0.0\")"));
            let issues = if start_at == 0 {
                self.0.clone()
            } else {
                Vec::new()
            };
            let page = IssuePage {
                start_at,
                total: self.0.len(),
                issues,
            };
            Box::pin(async move { Ok(page) })
        }

        fn update_fix_versions<'a>(
            &'a self,
            _key: &'a str,
            _versions: &'a [String],
        ) -> IssueFuture<'a, ()> {
            Box::pin(async { Err("validate never updates".into()) })
        }
    }

    struct Never;

    impl Confirmer for Never {
        fn confirm(&self, _message: &str) -> std::result::Result<bool, PortError> {
            Ok(false)
        }
    }

    fn issue(key: &str) -> Issue {
        Issue {
            key: key.into(),
            project: key.split('-').next().unwrap_or_default().into(),
            fix_versions: vec!["3.0.0".into()],
        }
    }

    fn options() -> ValidateOptions {
        ValidateOptions {
            range: RevisionRange {
                repo: PathBuf::from("."),
                start: "branch-2".into(),
                end: "HEAD".into(),
                exclude: None,
            },
            fix_version: "3.0.0".into(),
            fixups: PathBuf::from("fixups.json"),
            whitelist: None,
            save_cache: None,
            load_cache: None,
        }
    }

    fn context(commits: Box<dyn CommitSource>, issues: Vec<Issue>) -> ServiceContext {
        ServiceContext::new(commits, Box::new(FixedIssues(issues)), Box::new(Never))
    }

    async fn validate_with(ctx: &ServiceContext, inputs: ReconcileInputs) -> Result<Report> {
        let settings = Settings::default();
        validate_release(ctx, &settings, &options(), inputs).await
    }

    async fn validate(ctx: &ServiceContext) -> Result<Report> {
        validate_with(ctx, ReconcileInputs::default()).await
    }

    #[tokio::test]
    async fn clean_release_has_no_discrepancy() {
        let commits = vec![
            Commit::new("c2", "HDFS-2. Second"),
            Commit::new("c1", "HADOOP-1: first"),
        ];
        let issues = vec![issue("HADOOP-1"), issue("HDFS-2")];
        let ctx = context(Box::new(FixedCommits(commits)), issues);
        let report = validate(&ctx).await.unwrap();
        assert!(!report.has_discrepancy());
        assert_eq!(report.counts.matched, 2);
    }

    #[tokio::test]
    async fn missing_commit_is_a_discrepancy() {
        let commits = vec![Commit::new("c1", "HADOOP-1. first")];
        let issues = vec![issue("HADOOP-1"), issue("YARN-99")];
        let ctx = context(Box::new(FixedCommits(commits)), issues);
        let report = validate(&ctx).await.unwrap();
        assert!(report.has_discrepancy());
        assert_eq!(report.counts.issues_missing_commits, 1);
        assert_eq!(report.issues_missing_commits[0].key, "YARN-99");
    }

    #[tokio::test]
    async fn whitelisted_issue_and_fixup_resolve_discrepancies() {
        let commits = vec![Commit::new("c1", "Fix the build")];
        let issues = vec![issue("HADOOP-1"), issue("YARN-99")];
        let ctx = context(Box::new(FixedCommits(commits)), issues);
        let mut fixups = Fixups::new();
        let target = FixupTarget::new(vec!["HADOOP-1".into()]).unwrap();
        fixups.insert("c1", target);
        let inputs = ReconcileInputs {
            fixups,
            ignored_issues: ["YARN-99".to_string()].into(),
            ..ReconcileInputs::default()
        };
        let report = validate_with(&ctx, inputs).await.unwrap();
        assert!(!report.has_discrepancy());
    }

    #[tokio::test]
    async fn git_failure_is_reported_as_git_error() {
        let ctx = context(Box::new(BrokenGit), vec![]);
        let err = validate(&ctx).await.unwrap_err();
        assert!(matches!(err, Error::Git(_)));
        assert!(err.to_string().contains("bad revision"));
    }
}
