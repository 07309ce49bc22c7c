//! Live tracker adapter for the GitHub issues API.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::TrackerConfig;
use crate::ports::tracker::{IssueState, IssueTracker, TrackedIssue, TrackerFuture};

const GITHUB_API_URL: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = "todos";
const PAGE_SIZE: usize = 100;

/// Live tracker that manages issues in a GitHub repository.
pub struct GithubIssueTracker {
    client: Client,
    owner: String,
    repo: String,
    token: String,
}

impl GithubIssueTracker {
    /// Creates a tracker client for the configured repository and token.
    #[must_use]
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            client: Client::new(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            token: config.token.clone(),
        }
    }

    fn issues_url(&self) -> String {
        format!("{GITHUB_API_URL}/repos/{}/{}/issues", self.owner, self.repo)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", GITHUB_ACCEPT)
            .header("User-Agent", USER_AGENT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
    }
}

/// Request body for creating an issue.
#[derive(Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    body: &'a str,
}

/// Request body for closing an issue.
#[derive(Serialize)]
struct UpdateIssueRequest<'a> {
    state: &'a str,
}

/// A single issue item returned by the GitHub issues endpoints.
///
/// The issues list also returns pull requests; those carry a `pull_request`
/// key and must be excluded from reconciliation.
#[derive(Deserialize)]
struct IssueItem {
    number: u64,
    title: String,
    state: String,
    pull_request: Option<serde_json::Value>,
}

/// Error response from the GitHub API.
#[derive(Deserialize)]
struct GithubError {
    message: String,
}

/// Converts listed items into tracked issues, dropping pull requests.
fn to_tracked(items: Vec<IssueItem>) -> Vec<TrackedIssue> {
    items
        .into_iter()
        .filter(|item| item.pull_request.is_none())
        .map(|item| TrackedIssue {
            remote_id: item.number.to_string(),
            title: item.title,
            state: if item.state == "open" { IssueState::Open } else { IssueState::Closed },
        })
        .collect()
}

/// Extracts an error message from a failed GitHub response body.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    let msg = serde_json::from_str::<GithubError>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.to_string());
    format!("GitHub API error ({}): {msg}", status.as_u16())
}

impl IssueTracker for GithubIssueTracker {
    fn list_open_issues(&self) -> TrackerFuture<'_, Vec<TrackedIssue>> {
        Box::pin(async move {
            let mut issues = Vec::new();
            let mut page = 1usize;
            loop {
                let url = format!(
                    "{}?state=open&per_page={PAGE_SIZE}&page={page}",
                    self.issues_url()
                );
                let response = self
                    .request(reqwest::Method::GET, &url)
                    .send()
                    .await
                    .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                        format!("GitHub API request failed: {e}").into()
                    })?;

                let status = response.status();
                let text = response.text().await.map_err(
                    |e| -> Box<dyn std::error::Error + Send + Sync> {
                        format!("Failed to read GitHub API response: {e}").into()
                    },
                )?;

                if !status.is_success() {
                    return Err(error_message(status, &text).into());
                }

                let items: Vec<IssueItem> = serde_json::from_str(&text).map_err(
                    |e| -> Box<dyn std::error::Error + Send + Sync> {
                        format!("Failed to parse GitHub issues list: {e}").into()
                    },
                )?;

                let short_page = items.len() < PAGE_SIZE;
                issues.extend(to_tracked(items));
                if short_page {
                    return Ok(issues);
                }
                page += 1;
            }
        })
    }

    fn create_issue<'a>(&'a self, title: &'a str, body: &'a str) -> TrackerFuture<'a, String> {
        Box::pin(async move {
            let response = self
                .request(reqwest::Method::POST, &self.issues_url())
                .json(&CreateIssueRequest { title, body })
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("GitHub API request failed: {e}").into()
                })?;

            let status = response.status();
            let text = response.text().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to read GitHub API response: {e}").into()
                },
            )?;

            if !status.is_success() {
                return Err(error_message(status, &text).into());
            }

            let item: IssueItem = serde_json::from_str(&text).map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse created issue: {e}").into()
                },
            )?;
            Ok(item.number.to_string())
        })
    }

    fn close_issue<'a>(&'a self, remote_id: &'a str) -> TrackerFuture<'a, ()> {
        Box::pin(async move {
            let url = format!("{}/{remote_id}", self.issues_url());
            let response = self
                .request(reqwest::Method::PATCH, &url)
                .json(&UpdateIssueRequest { state: "closed" })
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("GitHub API request failed: {e}").into()
                })?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(error_message(status, &text).into());
            }
            Ok(())
        })
    }
}
