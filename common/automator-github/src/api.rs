//! The GitHub operations the automation core is written against

use crate::client::GitHubClient;
use crate::git_data::{GitRef, TreeEntry};
use crate::issues::{Issue, IssueComment};
use crate::pull_requests::{PullRequest, PullRequestParams};
use crate::util::RepoId;
use crate::Result;
use async_trait::async_trait;

/// One single-shot call per endpoint.
///
/// [`GitHubClient`] talks to the real API; tests substitute recording fakes.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn get_branch_head_sha(&self, repo: &RepoId, branch: &str) -> Result<String>;

    async fn create_blob(&self, repo: &RepoId, path: &str, content: &str) -> Result<String>;

    async fn create_tree(
        &self,
        repo: &RepoId,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<String>;

    async fn create_commit(
        &self,
        repo: &RepoId,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> Result<String>;

    async fn create_ref(&self, repo: &RepoId, branch: &str, sha: &str) -> Result<GitRef>;

    async fn create_issue(&self, repo: &RepoId, title: &str, body: &str) -> Result<Issue>;

    async fn create_pull_request(&self, params: PullRequestParams<'_>) -> Result<PullRequest>;

    async fn comment_on_pull_request(
        &self,
        repo: &RepoId,
        number: u64,
        body: &str,
    ) -> Result<IssueComment>;
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_branch_head_sha(&self, repo: &RepoId, branch: &str) -> Result<String> {
        GitHubClient::get_branch_head_sha(self, repo, branch).await
    }

    async fn create_blob(&self, repo: &RepoId, path: &str, content: &str) -> Result<String> {
        GitHubClient::create_blob(self, repo, path, content).await
    }

    async fn create_tree(
        &self,
        repo: &RepoId,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<String> {
        GitHubClient::create_tree(self, repo, base_tree, entries).await
    }

    async fn create_commit(
        &self,
        repo: &RepoId,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> Result<String> {
        GitHubClient::create_commit(self, repo, message, tree, parents).await
    }

    async fn create_ref(&self, repo: &RepoId, branch: &str, sha: &str) -> Result<GitRef> {
        GitHubClient::create_ref(self, repo, branch, sha).await
    }

    async fn create_issue(&self, repo: &RepoId, title: &str, body: &str) -> Result<Issue> {
        GitHubClient::create_issue(self, repo, title, body).await
    }

    async fn create_pull_request(&self, params: PullRequestParams<'_>) -> Result<PullRequest> {
        GitHubClient::create_pull_request(self, params).await
    }

    async fn comment_on_pull_request(
        &self,
        repo: &RepoId,
        number: u64,
        body: &str,
    ) -> Result<IssueComment> {
        GitHubClient::comment_on_pull_request(self, repo, number, body).await
    }
}
