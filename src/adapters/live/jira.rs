//! Live adapter for the `IssueTracker` port using the JIRA REST API v2.

use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use crate::config::Credentials;
use crate::error::PortError;
use crate::ports::issues::{Issue, IssueFuture, IssuePage, IssueTracker};

/// Fields requested on every search.
const SEARCH_FIELDS: &str = "project,fixVersions";

/// Live issue tracker that talks to a JIRA server.
pub struct LiveJira {
    client: Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl LiveJira {
    /// Creates a client for the JIRA instance at `base_url`.
    ///
    /// Without credentials, requests are anonymous.
    #[must_use]
    pub fn new(base_url: impl Into<String>, credentials: Option<Credentials>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            credentials,
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(c) => request.basic_auth(&c.user, Some(&c.password)),
            None => request,
        }
    }
}

/// Search response body.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    start_at: usize,
    #[serde(default)]
    total: usize,
    #[serde(default)]
    issues: Vec<JiraIssue>,
}

/// One issue in a search response.
#[derive(Deserialize)]
struct JiraIssue {
    key: String,
    fields: JiraFields,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraFields {
    project: Option<JiraProject>,
    #[serde(default)]
    fix_versions: Vec<JiraVersion>,
}

#[derive(Deserialize)]
struct JiraProject {
    key: String,
}

/// A version reference, used in both directions.
#[derive(Serialize, Deserialize)]
struct JiraVersion {
    name: String,
}

/// Body of an issue edit.
#[derive(Serialize)]
struct UpdateRequest {
    fields: UpdateFields,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateFields {
    fix_versions: Vec<JiraVersion>,
}

/// Error body returned by JIRA.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraError {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: std::collections::BTreeMap<String, String>,
}

impl From<JiraIssue> for Issue {
    fn from(raw: JiraIssue) -> Self {
        let project = raw.fields.project.map_or_else(
            || raw.key.split('-').next().unwrap_or_default().to_string(),
            |p| p.key,
        );
        let fix_versions = raw.fields.fix_versions.into_iter().map(|v| v.name);
        Issue {
            key: raw.key,
            project,
            fix_versions: fix_versions.collect(),
        }
    }
}

/// Turns a non-2xx response into an error carrying JIRA's messages.
async fn check(response: Response, what: &str) -> Result<Response, PortError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<JiraError>(&text)
        .ok()
        .map(|e| {
            let fields = e.errors.into_iter().map(field_error);
            e.error_messages
                .into_iter()
                .chain(fields)
                .collect::<Vec<_>>()
                .join("; ")
        })
        .filter(|d| !d.is_empty())
        .unwrap_or(text);
    let code = status.as_u16();
    Err(format!("{what} failed ({code}): {detail}").into())
}

fn field_error((field, message): (String, String)) -> String {
    format!("{field}: {message}")
}

impl IssueTracker for LiveJira {
    fn search<'a>(
        &'a self,
        query: &'a str,
        start_at: usize,
        max_results: usize,
    ) -> IssueFuture<'a, IssuePage> {
        Box::pin(async move {
            let url = format!("{}/rest/api/2/search", self.base_url);
            let params = [
                ("jql", query.to_string()),
                ("startAt", start_at.to_string()),
                ("maxResults", max_results.to_string()),
                ("fields", SEARCH_FIELDS.to_string()),
            ];
            let request = self.client.get(&url).query(&params);
            let response = self
                .authorize(request)
                .send()
                .await
                .map_err(|e| -> PortError {
                    format!("JIRA search request failed: {e}").into()
                })?;
            let response = check(response, "JIRA search").await?;
            let body: SearchResponse = response.json().await.map_err(|e| -> PortError {
                format!("Failed to parse JIRA search response: {e}").into()
            })?;
            Ok(IssuePage {
                start_at: body.start_at,
                total: body.total,
                issues: body.issues.into_iter().map(Issue::from).collect(),
            })
        })
    }

    fn update_fix_versions<'a>(
        &'a self,
        key: &'a str,
        versions: &'a [String],
    ) -> IssueFuture<'a, ()> {
        Box::pin(async move {
            let url = format!("{}/rest/api/2/issue/{key}", self.base_url);
            let body = UpdateRequest {
                fields: UpdateFields {
                    fix_versions: versions
                        .iter()
                        .map(|name| JiraVersion { name: name.clone() })
                        .collect(),
                },
            };
            let response = self
                .authorize(self.client.put(&url).json(&body))
                .send()
                .await
                .map_err(|e| -> PortError {
                    format!("JIRA update of {key} request failed: {e}").into()
                })?;
            check(response, &format!("JIRA update of {key}")).await?;
            Ok(())
        })
    }
}
