//! Run settings: tracker location, project set, label rule, credentials.
//!
//! Defaults describe the Apache Hadoop JIRA. A YAML file may override any
//! field; `FIXVER_JIRA_URL` overrides the tracker location last.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::labels::LabelRule;
use crate::tracker::DEFAULT_PAGE_SIZE;

const SOURCE_VERSIONS: &[&str] = &[
    "2.8.0", "2.9.0", "2.6.1", "2.6.2", "2.6.3", "2.6.4", "2.7.1", "2.7.2", "2.7.3",
];

/// Settings for the `update` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSettings {
    /// Label to add.
    pub target_version: String,
    /// Label to remove.
    pub superseded_version: String,
    /// Issues fixed in any of these versions are selected.
    pub source_versions: Vec<String>,
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            target_version: "3.0.0-alpha1".to_string(),
            superseded_version: "3.0.0-alpha2".to_string(),
            source_versions: SOURCE_VERSIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the JIRA instance.
    pub jira_url: String,
    /// Project keys whose issue keys are recognised in commit messages.
    pub projects: Vec<String>,
    /// Issues requested per search page.
    pub page_size: usize,
    /// Label update settings.
    pub update: UpdateSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            jira_url: "https://issues.apache.org/jira".to_string(),
            projects: ["HADOOP", "MAPREDUCE", "HDFS", "YARN"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            page_size: DEFAULT_PAGE_SIZE,
            update: UpdateSettings::default(),
        }
    }
}

impl Settings {
    /// Loads settings from `path` if given, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                serde_yaml::from_str(&text).map_err(|e| Error::Config {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
            }
            None => Self::default(),
        };
        if let Ok(url) = std::env::var("FIXVER_JIRA_URL") {
            settings.jira_url = url;
        }
        Ok(settings)
    }

    /// The label edit for `update`.
    #[must_use]
    pub fn label_rule(&self) -> LabelRule {
        LabelRule {
            target: self.update.target_version.clone(),
            superseded: self.update.superseded_version.clone(),
        }
    }

    /// Query selecting issues fixed in a source version but lacking the target.
    #[must_use]
    pub fn update_query(&self) -> String {
        format!(
            "project in ({}) and fixVersion not in ({}) and fixVersion in ({}) \
             and resolution=Fixed",
            self.projects.join(", "),
            quote_list(std::slice::from_ref(&self.update.target_version)),
            quote_list(&self.update.source_versions),
        )
    }

    /// Query selecting issues fixed in `fix_version`.
    #[must_use]
    pub fn validate_query(&self, fix_version: &str) -> String {
        format!(
            "project in ({}) and fixVersion in ({}) and resolution=Fixed",
            self.projects.join(", "),
            quote_list(&[fix_version.to_string()]),
        )
    }
}

fn quote_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("\"{}\"", v.replace('"', "\\\"")))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Tracker login, read from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name.
    pub user: String,
    /// Account password or API token.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Reads `JIRA_USER` and `JIRA_PASSWORD`, after loading a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredentials`] if either variable is unset.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads credentials through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredentials`] if either value is missing or empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let user = lookup("JIRA_USER").filter(|v| !v.is_empty());
        let password = lookup("JIRA_PASSWORD").filter(|v| !v.is_empty());
        match (user, password) {
            (Some(user), Some(password)) => Ok(Self { user, password }),
            _ => Err(Error::MissingCredentials),
        }
    }
}
