//! Issue and comment operations

use crate::client::{GitHubClient, failure_details};
use crate::git_data::is_created;
use crate::util::RepoId;
use crate::{GitHubError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
pub(crate) struct CreateIssuePayload<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
pub(crate) struct CreateCommentPayload<'a> {
    body: &'a str,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Issue {
    pub html_url: String,
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub extra: Value,
}

#[derive(Deserialize, Debug, Clone)]
pub struct IssueComment {
    pub id: u64,
    pub html_url: String,
    #[serde(default)]
    pub body: String,
}

impl GitHubClient {
    /// Open an issue
    pub async fn create_issue(&self, repo: &RepoId, title: &str, body: &str) -> Result<Issue> {
        let url = self.repo_url(repo, "/issues");
        let payload = CreateIssuePayload { title, body };

        let response = self.post(&url).json(&payload).send().await?;

        if !is_created(response.status().as_u16()) {
            let (status, body) = failure_details(response).await;
            return Err(GitHubError::RequestFailed {
                action: "create issue",
                status,
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Comment on a pull request
    ///
    /// Pull request conversations live on the issues API, so this posts to
    /// `/issues/<number>/comments`.
    pub async fn comment_on_pull_request(
        &self,
        repo: &RepoId,
        number: u64,
        body: &str,
    ) -> Result<IssueComment> {
        let url = self.repo_url(repo, &format!("/issues/{}/comments", number));
        let payload = CreateCommentPayload { body };

        let response = self.post(&url).json(&payload).send().await?;

        if !is_created(response.status().as_u16()) {
            let (status, body) = failure_details(response).await;
            return Err(GitHubError::RequestFailed {
                action: "comment on pull request",
                status,
                body,
            });
        }

        Ok(response.json().await?)
    }
}
