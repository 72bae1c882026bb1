//! Pull request operations

use crate::client::{GitHubClient, failure_details};
use crate::git_data::is_created;
use crate::util::RepoId;
use crate::{GitHubError, Result};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(crate) struct CreatePullRequestPayload<'a> {
    title: &'a str,
    head: &'a str,
    base: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    draft: Option<bool>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PullRequest {
    pub html_url: String,
    pub number: u64,
    pub id: u64,
    pub title: String,
    pub state: String,
}

/// Parameters for creating a pull request
#[derive(Debug, Clone)]
pub struct PullRequestParams<'a> {
    pub repo: &'a RepoId,
    pub title: &'a str,
    pub head: &'a str,
    pub base: &'a str,
    pub body: &'a str,
    pub draft: bool,
}

impl<'a> PullRequestParams<'a> {
    pub fn new(
        repo: &'a RepoId,
        title: &'a str,
        head: &'a str,
        base: &'a str,
        body: &'a str,
    ) -> Self {
        Self {
            repo,
            title,
            head,
            base,
            body,
            draft: false,
        }
    }

    pub fn as_draft(mut self) -> Self {
        self.draft = true;
        self
    }
}

impl GitHubClient {
    /// Create a pull request on GitHub
    ///
    /// # Errors
    /// Returns [`GitHubError::RequestFailed`] carrying the response body when
    /// GitHub answers with anything other than 200/201.
    pub async fn create_pull_request(&self, params: PullRequestParams<'_>) -> Result<PullRequest> {
        let url = self.repo_url(params.repo, "/pulls");

        let payload = CreatePullRequestPayload {
            title: params.title,
            head: params.head,
            base: params.base,
            body: params.body,
            draft: if params.draft { Some(true) } else { None },
        };

        let response = self.post(&url).json(&payload).send().await?;

        if !is_created(response.status().as_u16()) {
            let (status, body) = failure_details(response).await;
            return Err(GitHubError::RequestFailed {
                action: "create pull request",
                status,
                body,
            });
        }

        Ok(response.json().await?)
    }
}
