//! Pull request lookup against the GitHub REST API

use crate::domain::PullRequest;
use crate::error::{Result, TagOnMergeError};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Finds the pull request that introduced a commit on trunk
pub trait PrLookup {
    /// Returns the merged pull request targeting `trunk` that introduced `commit`.
    ///
    /// # Returns
    /// * `Ok(PullRequest)` - The pull request
    /// * `Err(PrNotFound)` - If no merged pull request targets trunk
    fn pull_request_for_commit(&self, commit: &str, trunk: &str) -> Result<PullRequest>;
}

/// Picks the pull request that merged `commit` into `trunk`.
///
/// The platform may list several pull requests containing the same commit
/// (e.g. a feature branch merged into `develop` and then into `main`). The
/// first one in listing order whose base is `trunk` and which has a merge
/// commit is chosen.
pub fn select_merged_pr(prs: Vec<PullRequest>, commit: &str, trunk: &str) -> Result<PullRequest> {
    prs.into_iter()
        .find(|pr| pr.is_merged_into(trunk))
        .ok_or_else(|| TagOnMergeError::PrNotFound {
            commit: commit.to_string(),
            trunk: trunk.to_string(),
        })
}

#[derive(Debug, Deserialize)]
struct ApiPullRequest {
    number: u64,
    base: ApiBranch,
    merge_commit_sha: Option<String>,
    #[serde(default)]
    labels: Vec<ApiLabel>,
}

#[derive(Debug, Deserialize)]
struct ApiBranch {
    #[serde(rename = "ref")]
    ref_name: String,
}

#[derive(Debug, Deserialize)]
struct ApiLabel {
    name: String,
}

impl From<ApiPullRequest> for PullRequest {
    fn from(pr: ApiPullRequest) -> Self {
        PullRequest {
            number: pr.number,
            base: pr.base.ref_name,
            merge_commit_sha: pr.merge_commit_sha,
            labels: pr.labels.into_iter().map(|label| label.name).collect(),
        }
    }
}

/// Decode the body of `GET /repos/{owner}/{repo}/commits/{sha}/pulls`
pub fn parse_pull_requests(body: &str) -> Result<Vec<PullRequest>> {
    let prs: Vec<ApiPullRequest> = serde_json::from_str(body)
        .map_err(|e| TagOnMergeError::api(format!("unexpected pull request payload: {}", e)))?;

    Ok(prs.into_iter().map(PullRequest::from).collect())
}

/// Blocking GitHub client scoped to one repository
pub struct GitHubClient {
    http: Client,
    api_url: String,
    owner: String,
    repository: String,
}

impl GitHubClient {
    /// Create a client authenticated with `token`
    pub fn new(
        api_url: impl Into<String>,
        owner: impl Into<String>,
        repository: impl Into<String>,
        token: &str,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static("2022-11-28"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("semver-tag-on-merge/", env!("CARGO_PKG_VERSION"))),
        );

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| TagOnMergeError::config("repository token contains invalid characters"))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| TagOnMergeError::api(format!("failed to build HTTP client: {}", e)))?;

        Ok(GitHubClient {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            owner: owner.into(),
            repository: repository.into(),
        })
    }

    fn pulls_for_commit_url(&self, commit: &str) -> String {
        format!(
            "{}/repos/{}/{}/commits/{}/pulls?per_page=100",
            self.api_url, self.owner, self.repository, commit
        )
    }

    /// List the pull requests associated with `commit`, in platform order
    pub fn list_pull_requests_for_commit(&self, commit: &str) -> Result<Vec<PullRequest>> {
        let url = self.pulls_for_commit_url(commit);
        debug!(%url, "listing pull requests for commit");

        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| TagOnMergeError::api(format!("failed to send request to GitHub: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| TagOnMergeError::api(format!("failed to read GitHub response: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or_else(|| "Unknown error".to_string());

            return Err(TagOnMergeError::api(format!(
                "listing pull requests for commit '{}' failed: HTTP {} - {}",
                commit, status, message
            )));
        }

        parse_pull_requests(&body)
    }
}

impl PrLookup for GitHubClient {
    fn pull_request_for_commit(&self, commit: &str, trunk: &str) -> Result<PullRequest> {
        let prs = self.list_pull_requests_for_commit(commit)?;
        let pr = select_merged_pr(prs, commit, trunk)?;

        info!(number = pr.number, labels = ?pr.labels, "found pull request");
        Ok(pr)
    }
}
