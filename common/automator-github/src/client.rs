//! GitHub client implementation

use crate::GitHubError;
use crate::util::RepoId;
use reqwest::{RequestBuilder, Response};

/// Public GitHub REST endpoint
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Media type requested on every call
pub const ACCEPT_V3: &str = "application/vnd.github.v3+json";

const USER_AGENT: &str = concat!("repo-automator/", env!("CARGO_PKG_VERSION"));

/// GitHub API client for making authenticated requests
pub struct GitHubClient {
    pub(crate) client: reqwest::Client,
    pub(crate) token: Option<String>,
    pub(crate) api_base: String,
}

impl GitHubClient {
    /// Create a client against api.github.com.
    ///
    /// The token is passed in explicitly; callers decide where it comes from.
    pub fn new(token: Option<String>) -> Self {
        Self::with_api_base(DEFAULT_API_BASE, token)
    }

    /// Create a client against a different API root (GitHub Enterprise, test servers)
    pub fn with_api_base(api_base: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.filter(|t| !t.is_empty()),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// `<api_base>/repos/<owner>/<name><path>`
    pub(crate) fn repo_url(&self, repo: &RepoId, path: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.api_base, repo.owner, repo.name, path
        )
    }

    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.decorate(self.client.get(url))
    }

    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.decorate(self.client.post(url))
    }

    fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        let mut request = request
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT_V3);

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        request
    }
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Status code and body of a response, for error reporting
pub(crate) async fn failure_details(response: Response) -> (u16, String) {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    (status, body)
}

/// Pull the `sha` field out of a git-data creation response
pub(crate) fn sha_field(value: &serde_json::Value, object: &str) -> Result<String, GitHubError> {
    value["sha"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| GitHubError::MalformedResponse {
            what: format!("{} response has no sha", object),
        })
}
