//! Git data operations: refs, blobs, trees and commits
//!
//! These endpoints let a branch be assembled entirely server-side. Each
//! method performs exactly one HTTP round trip; retrying is the caller's
//! business.

use crate::client::{GitHubClient, failure_details, sha_field};
use crate::util::RepoId;
use crate::{GitHubError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Mode of a regular, non-executable file
pub const FILE_MODE_REGULAR: &str = "100644";

#[derive(Serialize)]
pub(crate) struct CreateBlobPayload<'a> {
    content: &'a str,
    encoding: &'static str,
}

#[derive(Serialize)]
pub(crate) struct CreateTreePayload<'a> {
    tree: &'a [TreeEntry],
    base_tree: &'a str,
}

#[derive(Serialize)]
pub(crate) struct CreateCommitPayload<'a> {
    message: &'a str,
    tree: &'a str,
    parents: &'a [String],
}

#[derive(Serialize)]
pub(crate) struct CreateRefPayload<'a> {
    #[serde(rename = "ref")]
    ref_name: &'a str,
    sha: &'a str,
}

/// One entry of a tree creation request
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sha: String,
}

impl TreeEntry {
    /// A regular-file blob entry
    pub fn blob(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: FILE_MODE_REGULAR.to_string(),
            kind: "blob".to_string(),
            sha: sha.into(),
        }
    }
}

/// Object a ref points at
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GitObject {
    pub sha: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Ref payload returned by the refs endpoints
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GitRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub object: GitObject,
}

impl GitHubClient {
    /// Resolve the commit sha at the head of `branch`
    ///
    /// # Errors
    /// Returns [`GitHubError::ReferenceNotFound`] for any status other than 200.
    pub async fn get_branch_head_sha(&self, repo: &RepoId, branch: &str) -> Result<String> {
        let url = self.repo_url(repo, &format!("/git/ref/heads/{}", branch));
        let response = self.get(&url).send().await?;

        if response.status().as_u16() != 200 {
            let (status, body) = failure_details(response).await;
            return Err(GitHubError::ReferenceNotFound {
                branch: branch.to_string(),
                status,
                body,
            });
        }

        let git_ref: GitRef = response.json().await?;
        Ok(git_ref.object.sha)
    }

    /// Upload `content` as a blob; the text is sent as-is with `utf-8` encoding
    pub async fn create_blob(&self, repo: &RepoId, path: &str, content: &str) -> Result<String> {
        let url = self.repo_url(repo, "/git/blobs");
        let payload = CreateBlobPayload {
            content,
            encoding: "utf-8",
        };

        let response = self.post(&url).json(&payload).send().await?;

        if !is_created(response.status().as_u16()) {
            let (status, body) = failure_details(response).await;
            return Err(GitHubError::ObjectCreationFailed {
                object: "blob",
                path: Some(path.to_string()),
                status,
                body,
            });
        }

        let value: Value = response.json().await?;
        sha_field(&value, "blob")
    }

    /// Create a tree layering `entries` over `base_tree`
    pub async fn create_tree(
        &self,
        repo: &RepoId,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<String> {
        let url = self.repo_url(repo, "/git/trees");
        let payload = CreateTreePayload {
            tree: entries,
            base_tree,
        };

        let response = self.post(&url).json(&payload).send().await?;

        if !is_created(response.status().as_u16()) {
            let (status, body) = failure_details(response).await;
            return Err(GitHubError::ObjectCreationFailed {
                object: "tree",
                path: None,
                status,
                body,
            });
        }

        let value: Value = response.json().await?;
        sha_field(&value, "tree")
    }

    /// Create a commit object pointing at `tree` with the given parents
    pub async fn create_commit(
        &self,
        repo: &RepoId,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> Result<String> {
        let url = self.repo_url(repo, "/git/commits");
        let payload = CreateCommitPayload {
            message,
            tree,
            parents,
        };

        let response = self.post(&url).json(&payload).send().await?;

        if !is_created(response.status().as_u16()) {
            let (status, body) = failure_details(response).await;
            return Err(GitHubError::ObjectCreationFailed {
                object: "commit",
                path: None,
                status,
                body,
            });
        }

        let value: Value = response.json().await?;
        sha_field(&value, "commit")
    }

    /// Create `refs/heads/<branch>` pointing at `sha`
    ///
    /// An existing branch of the same name is reported as
    /// [`GitHubError::RefCreationFailed`] like any other rejection.
    pub async fn create_ref(&self, repo: &RepoId, branch: &str, sha: &str) -> Result<GitRef> {
        let url = self.repo_url(repo, "/git/refs");
        let ref_name = branch_ref(branch);
        let payload = CreateRefPayload {
            ref_name: &ref_name,
            sha,
        };

        let response = self.post(&url).json(&payload).send().await?;

        if !is_created(response.status().as_u16()) {
            let (status, body) = failure_details(response).await;
            return Err(GitHubError::RefCreationFailed {
                ref_name,
                status,
                body,
            });
        }

        Ok(response.json().await?)
    }
}

/// Fully qualified ref name for a branch
pub(crate) fn branch_ref(branch: &str) -> String {
    format!("refs/heads/{}", branch)
}

pub(crate) fn is_created(status: u16) -> bool {
    matches!(status, 200 | 201)
}
