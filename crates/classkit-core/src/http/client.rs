//! GitHub REST API client for classroom administration

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::traits::RepositoryProvider;
use crate::types::{CheckRun, CommitRef, Repository};

/// GitHub returns at most 100 items per page
const PER_PAGE: u32 = 100;

/// Safety limit to prevent infinite pagination loops
const MAX_PAGES: u32 = 1000;

/// GitHub API repository object
#[derive(Debug, Deserialize)]
struct ApiRepository {
    name: String,
    full_name: String,
    html_url: String,
    clone_url: String,
}

/// GitHub API commit list entry
#[derive(Debug, Deserialize)]
struct ApiCommit {
    sha: String,
    commit: ApiCommitDetail,
}

#[derive(Debug, Deserialize)]
struct ApiCommitDetail {
    author: Option<ApiCommitSignature>,
}

#[derive(Debug, Deserialize)]
struct ApiCommitSignature {
    date: Option<String>,
}

/// GitHub API response for a commit's check runs
#[derive(Debug, Deserialize)]
struct CheckRunsResponse {
    #[allow(dead_code)]
    total_count: u32,
    check_runs: Vec<ApiCheckRun>,
}

#[derive(Debug, Deserialize)]
struct ApiCheckRun {
    id: u64,
    html_url: String,
    output: Option<ApiCheckRunOutput>,
}

#[derive(Debug, Deserialize)]
struct ApiCheckRunOutput {
    text: Option<String>,
}

/// Authenticated GitHub API client for classroom operations
pub struct ClassroomApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for ClassroomApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassroomApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl ClassroomApiClient {
    /// Create a new API client
    pub fn new(base_url: String, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("classkit/0.1.0")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url,
            token,
        }
    }

    /// Create from environment variables (`GITHUB_API_URL`, `GITHUB_TOKEN`)
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| "https://api.github.com".to_string());

        let token = std::env::var("GITHUB_TOKEN").ok();

        Ok(Self::new(base_url, token))
    }

    /// Attach auth and the JSON media type to a request
    fn prepare(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request = request.header("Accept", "application/vnd.github+json");
        if let Some(ref token) = self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        request
    }

    /// Map a non-success status to the right error kind.
    ///
    /// 403 with an exhausted `x-ratelimit-remaining` is a rate limit;
    /// any other 401/403 is an auth failure.
    fn status_error(response: &reqwest::Response, context: &str) -> Error {
        let status = response.status();

        if status == reqwest::StatusCode::FORBIDDEN {
            let remaining = response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");

            if remaining == "0" {
                return Error::RateLimitExceeded(format!(
                    "GitHub API rate limit exceeded while {}. Consider using GITHUB_TOKEN.",
                    context
                ));
            }
            return Error::Auth(format!("GitHub API denied {} ({})", context, status));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Auth(format!("GitHub API rejected credentials while {}", context));
        }

        Error::Http(format!("GitHub API returned {} while {}", status, context))
    }

    /// Fetch one repository
    ///
    /// Endpoint: GET /repos/{owner}/{repo}
    pub async fn get_repository(&self, owner: &str, name: &str) -> Result<Repository> {
        let url = format!("{}/repos/{}/{}", self.base_url, owner, name);

        let response = self
            .prepare(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to fetch repository: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::RepoNotFound(format!("{}/{}", owner, name)));
        }

        if !response.status().is_success() {
            return Err(Self::status_error(
                &response,
                &format!("fetching {}/{}", owner, name),
            ));
        }

        let repo: ApiRepository = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Failed to parse repository response: {}", e)))?;

        Ok(convert_repository(repo))
    }

    /// List a repository's commits in remote order (newest first)
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/commits
    /// Paginates with per_page/page until a short page.
    pub async fn list_commits(&self, owner: &str, name: &str) -> Result<Vec<CommitRef>> {
        let url = format!("{}/repos/{}/{}/commits", self.base_url, owner, name);

        let mut all_commits = Vec::new();
        let mut page = 1u32;

        loop {
            let request = self.prepare(self.client.get(&url).query(&[
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]));

            let response = request
                .send()
                .await
                .map_err(|e| Error::Http(format!("Failed to fetch commits: {}", e)))?;

            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(Error::RepoNotFound(format!("{}/{}", owner, name)));
            }

            if !response.status().is_success() {
                return Err(Self::status_error(
                    &response,
                    &format!("listing commits of {}/{}", owner, name),
                ));
            }

            let commits: Vec<ApiCommit> = response
                .json()
                .await
                .map_err(|e| Error::Http(format!("Failed to parse commits response: {}", e)))?;

            let page_len = commits.len();
            all_commits.extend(commits.into_iter().map(convert_commit));

            if page_len < PER_PAGE as usize {
                break;
            }

            page += 1;
            if page > MAX_PAGES {
                return Err(Error::Http(
                    "Too many pages in commits response".to_string(),
                ));
            }
        }

        Ok(all_commits)
    }

    /// List the check runs attached to a commit, remote order preserved
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/commits/{sha}/check-runs
    pub async fn list_check_runs(
        &self,
        owner: &str,
        name: &str,
        sha: &str,
    ) -> Result<Vec<CheckRun>> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}/check-runs",
            self.base_url, owner, name, sha
        );

        let response = self
            .prepare(
                self.client
                    .get(&url)
                    .query(&[("per_page", PER_PAGE.to_string())]),
            )
            .send()
            .await
            .map_err(|e| Error::CheckRun(format!("Failed to fetch check runs: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::CheckRun(format!(
                "GitHub API returned {} for check runs of {}",
                response.status(),
                sha
            )));
        }

        let runs: CheckRunsResponse = response
            .json()
            .await
            .map_err(|e| Error::CheckRun(format!("Failed to parse check runs response: {}", e)))?;

        Ok(runs.check_runs.into_iter().map(convert_check_run).collect())
    }

    /// List every repository of an organization
    ///
    /// Endpoint: GET /orgs/{org}/repos
    pub async fn list_org_repositories(&self, org: &str) -> Result<Vec<Repository>> {
        let url = format!("{}/orgs/{}/repos", self.base_url, org);

        let mut all_repos = Vec::new();
        let mut page = 1u32;

        loop {
            let request = self.prepare(self.client.get(&url).query(&[
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]));

            let response = request
                .send()
                .await
                .map_err(|e| Error::Http(format!("Failed to list organization repos: {}", e)))?;

            if !response.status().is_success() {
                return Err(Self::status_error(
                    &response,
                    &format!("listing repositories of {}", org),
                ));
            }

            let repos: Vec<ApiRepository> = response
                .json()
                .await
                .map_err(|e| Error::Http(format!("Failed to parse repository list: {}", e)))?;

            let page_len = repos.len();
            all_repos.extend(repos.into_iter().map(convert_repository));

            if page_len < PER_PAGE as usize {
                break;
            }

            page += 1;
            if page > MAX_PAGES {
                return Err(Error::Http(
                    "Too many pages in organization repository list".to_string(),
                ));
            }
        }

        Ok(all_repos)
    }

    /// Delete one repository
    ///
    /// Endpoint: DELETE /repos/{owner}/{repo}
    pub async fn delete_repository(&self, owner: &str, name: &str) -> Result<()> {
        let url = format!("{}/repos/{}/{}", self.base_url, owner, name);

        let response = self
            .prepare(self.client.delete(&url))
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to delete repository: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::RepoNotFound(format!("{}/{}", owner, name)));
        }

        if !response.status().is_success() {
            return Err(Self::status_error(
                &response,
                &format!("deleting {}/{}", owner, name),
            ));
        }

        Ok(())
    }
}

impl RepositoryProvider for ClassroomApiClient {
    async fn repository(&self, owner: &str, name: &str) -> Result<Repository> {
        self.get_repository(owner, name).await
    }

    async fn commits(&self, owner: &str, name: &str) -> Result<Vec<CommitRef>> {
        self.list_commits(owner, name).await
    }

    async fn check_runs(&self, owner: &str, name: &str, sha: &str) -> Result<Vec<CheckRun>> {
        self.list_check_runs(owner, name, sha).await
    }
}

/// Convert GitHub API repository to our type
fn convert_repository(repo: ApiRepository) -> Repository {
    Repository {
        name: repo.name,
        full_name: repo.full_name,
        html_url: repo.html_url,
        clone_url: repo.clone_url,
    }
}

/// Convert GitHub API commit to our type.
/// ISO 8601 author date becomes Unix epoch seconds, 0 when unparseable.
fn convert_commit(commit: ApiCommit) -> CommitRef {
    let authored_at = commit
        .commit
        .author
        .and_then(|a| a.date)
        .as_deref()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.timestamp())
        .unwrap_or(0);

    CommitRef {
        sha: commit.sha,
        authored_at,
    }
}

/// Convert GitHub API check run to our type
fn convert_check_run(run: ApiCheckRun) -> CheckRun {
    CheckRun {
        id: run.id,
        html_url: run.html_url,
        output_text: run.output.and_then(|o| o.text),
    }
}
