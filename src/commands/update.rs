//! `fixver update` command.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use tokio::runtime::Runtime;

use crate::config::{Credentials, Settings};
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::inputs::load_key_list;
use crate::tracker::fetch_all;

/// Options from the command line.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Send updates instead of only logging them.
    pub force: bool,
    /// Change-log file.
    pub output: Option<PathBuf>,
    /// File of issue keys to skip.
    pub excludes: Option<PathBuf>,
}

/// What an update run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Issues returned by the query.
    pub selected: usize,
    /// Issues skipped because they were excluded.
    pub excluded: usize,
    /// Issues whose fix versions already matched the rule.
    pub unchanged: usize,
    /// Updates sent to the tracker.
    pub sent: usize,
}

/// Execute the `update` command against live JIRA.
///
/// # Errors
///
/// Returns an error if credentials are missing, an input file cannot be read,
/// the operator declines, or the tracker fails.
pub fn run(runtime: &Runtime, settings: &Settings, options: &UpdateOptions) -> Result<()> {
    let excludes = match &options.excludes {
        Some(path) => {
            let keys = load_key_list(path)?;
            let listed: Vec<&str> = keys.iter().map(String::as_str).collect();
            tracing::info!("Will exclude {} JIRAs: {}", keys.len(), listed.join(", "));
            keys
        }
        None => BTreeSet::new(),
    };

    let mut change_log: Box<dyn Write> = match &options.output {
        Some(path) => {
            tracing::info!("Logging changes to output file {}", path.display());
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(std::io::sink()),
    };

    let credentials = Credentials::from_env()?;
    let ctx = ServiceContext::live(settings, Some(credentials));

    let labelling = apply_labels(&ctx, settings, options.force, &excludes, &mut change_log);
    let summary = runtime.block_on(labelling)?;
    change_log.flush()?;

    tracing::info!(
        selected = summary.selected,
        excluded = summary.excluded,
        unchanged = summary.unchanged,
        sent = summary.sent,
        "update finished"
    );
    Ok(())
}

/// Applies the settings' label rule to every issue selected by the update query.
///
/// With `force`, the operator is asked to confirm before the query runs, and
/// each changed issue is then sent to the tracker. Before/after fix versions
/// are always logged and written to `change_log`.
///
/// # Errors
///
/// Returns [`Error::Cancelled`] if confirmation is declined, or the first
/// tracker or write failure.
pub async fn apply_labels(
    ctx: &ServiceContext,
    settings: &Settings,
    force: bool,
    excludes: &BTreeSet<String>,
    change_log: &mut dyn Write,
) -> Result<UpdateSummary> {
    if force {
        let approved = ctx
            .confirm
            .confirm("--force specified, changes will be sent to JIRA.")
            .map_err(Error::Prompt)?;
        if !approved {
            return Err(Error::Cancelled);
        }
    } else {
        tracing::info!("Dry-run, will not commit changes.");
    }

    let rule = settings.label_rule();
    let query = settings.update_query();
    let issues = fetch_all(ctx.issues.as_ref(), &query, settings.page_size)
        .await
        .map_err(Error::Tracker)?;

    let mut summary = UpdateSummary {
        selected: issues.len(),
        ..UpdateSummary::default()
    };
    for issue in &issues {
        if excludes.contains(&issue.key) {
            tracing::debug!("{} is excluded, skipping", issue.key);
            summary.excluded += 1;
            continue;
        }

        tracing::info!("Found issue {}", issue.key);
        let change = rule.apply(issue);
        tracing::info!("Old fix versions: {}", change.before.join(","));
        tracing::info!("New fix versions: {}", change.after.join(","));
        change_log.write_all(change.log_lines().as_bytes())?;

        if change.is_noop() {
            tracing::debug!("{} already up to date", issue.key);
            summary.unchanged += 1;
            continue;
        }
        if force {
            tracing::info!("Updating {}", issue.key);
            ctx.issues
                .update_fix_versions(&issue.key, &change.after)
                .await
                .map_err(Error::Tracker)?;
            summary.sent += 1;
        }
    }
    Ok(summary)
}
