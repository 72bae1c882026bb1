//! Retry wrapper around the GitHub transport
//!
//! Each operation is retried on its own with the same [`RetryPolicy`]; a
//! retried blob upload never re-runs the ref lookup before it.

use crate::retry::{RetryPolicy, retry};
use automator_github::{
    GitHubApi, GitHubError, GitRef, Issue, IssueComment, PullRequest, PullRequestParams, RepoId,
    TreeEntry,
};

pub struct RetryingClient<'a, A: GitHubApi + ?Sized> {
    api: &'a A,
    policy: RetryPolicy,
}

impl<'a, A: GitHubApi + ?Sized> RetryingClient<'a, A> {
    pub fn new(api: &'a A, policy: RetryPolicy) -> Self {
        Self { api, policy }
    }

    pub async fn get_branch_head_sha(
        &self,
        repo: &RepoId,
        branch: &str,
    ) -> Result<String, GitHubError> {
        retry(self.policy, || self.api.get_branch_head_sha(repo, branch)).await
    }

    pub async fn create_blob(
        &self,
        repo: &RepoId,
        path: &str,
        content: &str,
    ) -> Result<String, GitHubError> {
        retry(self.policy, || self.api.create_blob(repo, path, content)).await
    }

    pub async fn create_tree(
        &self,
        repo: &RepoId,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<String, GitHubError> {
        retry(self.policy, || self.api.create_tree(repo, base_tree, entries)).await
    }

    pub async fn create_commit(
        &self,
        repo: &RepoId,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> Result<String, GitHubError> {
        retry(self.policy, || {
            self.api.create_commit(repo, message, tree, parents)
        })
        .await
    }

    pub async fn create_ref(
        &self,
        repo: &RepoId,
        branch: &str,
        sha: &str,
    ) -> Result<GitRef, GitHubError> {
        retry(self.policy, || self.api.create_ref(repo, branch, sha)).await
    }

    pub async fn create_issue(
        &self,
        repo: &RepoId,
        title: &str,
        body: &str,
    ) -> Result<Issue, GitHubError> {
        retry(self.policy, || self.api.create_issue(repo, title, body)).await
    }

    pub async fn create_pull_request(
        &self,
        params: PullRequestParams<'_>,
    ) -> Result<PullRequest, GitHubError> {
        retry(self.policy, || self.api.create_pull_request(params.clone())).await
    }

    pub async fn comment_on_pull_request(
        &self,
        repo: &RepoId,
        number: u64,
        body: &str,
    ) -> Result<IssueComment, GitHubError> {
        retry(self.policy, || {
            self.api.comment_on_pull_request(repo, number, body)
        })
        .await
    }
}
