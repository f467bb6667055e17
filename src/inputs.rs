//! Operator input files: fixups and issue-key lists.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::reconcile::ReconcileInputs;

/// Loads a JSON fixups file.
///
/// A missing file is not an error: it is logged and empty inputs are returned.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_fixups(path: &Path) -> Result<ReconcileInputs> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no fixups file, continuing without overrides");
        return Ok(ReconcileInputs::default());
    }
    let text = read(path)?;
    let inputs: ReconcileInputs = serde_json::from_str(&text).map_err(|e| Error::Input {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::info!(
        fixups = inputs.fixups.len(),
        ignored_commits = inputs.ignored_commits.len(),
        ignored_issues = inputs.ignored_issues.len(),
        "loaded fixups"
    );
    Ok(inputs)
}

/// Loads a file with one issue key per line.
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_key_list(path: &Path) -> Result<BTreeSet<String>> {
    Ok(parse_key_list(&read(path)?))
}

/// Parses one issue key per line.
#[must_use]
pub fn parse_key_list(text: &str) -> BTreeSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::Input {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_list_skips_blanks_and_comments() {
        let keys = parse_key_list("YARN-4321\n\n# reviewed later\n  HDFS-1  \r\nYARN-4321\n");
        assert_eq!(keys.len(), 2);
        assert!(keys.contains("HDFS-1"));
        assert!(keys.contains("YARN-4321"));
    }

    #[test]
    fn missing_fixups_file_yields_defaults() {
        let inputs = load_fixups(Path::new("/nonexistent/fixups.json")).unwrap();
        assert_eq!(inputs, ReconcileInputs::default());
    }

    #[test]
    fn malformed_fixups_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixups.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_fixups(&path), Err(Error::Input { .. })));
    }

    #[test]
    fn fixups_file_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixups.json");
        let json = r#"{"fixups": {"abc": "HADOOP-1"}, "ignore": ["def"]}"#;
        std::fs::write(&path, json).unwrap();
        let inputs = load_fixups(&path).unwrap();
        assert_eq!(inputs.fixups.get("abc").unwrap().keys(), ["HADOOP-1"]);
        assert!(inputs.ignored_commits.contains("def"));
    }

    #[test]
    fn missing_key_list_is_an_error() {
        let path = Path::new("/nonexistent/excludes.txt");
        assert!(load_key_list(path).is_err());
    }
}
