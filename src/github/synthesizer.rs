//! Branch synthesis through the git-data API
//!
//! A branch is built without a working tree:
//!
//! 1. resolve the head commit of the base branch
//! 2. upload one blob per [`ContentMap`] entry (concurrently)
//! 3. create a tree over the base commit's tree
//! 4. create a commit whose only parent is the base commit
//! 5. create `refs/heads/<branch>` pointing at that commit
//!
//! Each step needs the sha produced by the previous one. A failure at any
//! step aborts the whole operation; blobs, trees and commits created before
//! the failure are left unreferenced in the remote object store.

use super::client::RetryingClient;
use crate::constants::github::{DEFAULT_BASE_BRANCH, DEFAULT_COMMIT_MSG};
use crate::logger::Logger;
use automator_github::{GitHubApi, GitHubError, GitRef, RepoId, TreeEntry};
use futures::future::try_join_all;
use std::collections::BTreeMap;

/// Desired file contents keyed by repository-relative path.
///
/// Paths use forward slashes; backslashes and leading slashes are normalized
/// away on insert, so two spellings of one path collapse into one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMap {
    files: BTreeMap<String, String>,
}

impl ContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content of `path`, returning the previous content if any
    pub fn insert(&mut self, path: impl AsRef<str>, content: impl Into<String>) -> Option<String> {
        self.files
            .insert(normalize_path(path.as_ref()), content.into())
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(&normalize_path(path)).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(&normalize_path(path))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }
}

impl<P: AsRef<str>, C: Into<String>> FromIterator<(P, C)> for ContentMap {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut map = ContentMap::new();
        for (path, content) in iter {
            map.insert(path, content);
        }
        map
    }
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_string()
}

/// Everything needed to create one branch
#[derive(Debug, Clone)]
pub struct BranchRequest {
    pub branch: String,
    pub files: ContentMap,
    pub commit_message: String,
    pub base_branch: String,
}

impl BranchRequest {
    pub fn new(branch: impl Into<String>, files: ContentMap) -> Self {
        Self {
            branch: branch.into(),
            files,
            commit_message: DEFAULT_COMMIT_MSG.to_string(),
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
        }
    }

    pub fn with_commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = message.into();
        self
    }

    pub fn with_base_branch(mut self, base: impl Into<String>) -> Self {
        self.base_branch = base.into();
        self
    }
}

pub struct BranchSynthesizer<'a, A: GitHubApi + ?Sized> {
    client: RetryingClient<'a, A>,
    logger: Logger,
}

impl<'a, A: GitHubApi + ?Sized> BranchSynthesizer<'a, A> {
    pub fn new(client: RetryingClient<'a, A>) -> Self {
        Self {
            client,
            logger: Logger,
        }
    }

    /// Create `request.branch` on `repo` holding `request.files` on top of
    /// `request.base_branch`, returning the new ref.
    ///
    /// Files not named in the map are inherited unchanged from the base tree.
    ///
    /// # Errors
    /// The first step to exhaust its retries ends the operation with its
    /// error: [`GitHubError::ReferenceNotFound`] for the base lookup,
    /// [`GitHubError::ObjectCreationFailed`] for blobs, the tree or the
    /// commit, and [`GitHubError::RefCreationFailed`] when the branch cannot
    /// be created (an existing branch of that name included).
    pub async fn create_branch(
        &self,
        repo: &RepoId,
        request: &BranchRequest,
    ) -> Result<GitRef, GitHubError> {
        let scope = repo.to_string();

        let base_sha = self
            .client
            .get_branch_head_sha(repo, &request.base_branch)
            .await?;
        self.logger.info(
            &scope,
            &format!("Base {} is at {}", request.base_branch, base_sha),
        );

        let entries = self.upload_blobs(repo, &request.files).await?;
        self.logger
            .info(&scope, &format!("Uploaded {} blob(s)", entries.len()));

        let tree_sha = self.client.create_tree(repo, &base_sha, &entries).await?;

        let parents = vec![base_sha];
        let commit_sha = self
            .client
            .create_commit(repo, &request.commit_message, &tree_sha, &parents)
            .await?;
        self.logger
            .info(&scope, &format!("Created commit {}", commit_sha));

        let git_ref = self
            .client
            .create_ref(repo, &request.branch, &commit_sha)
            .await?;
        self.logger
            .success(&scope, &format!("Created {}", git_ref.ref_name));

        Ok(git_ref)
    }

    /// Blobs do not depend on each other, so they are uploaded concurrently.
    /// Entries come back in [`ContentMap`] order.
    async fn upload_blobs(
        &self,
        repo: &RepoId,
        files: &ContentMap,
    ) -> Result<Vec<TreeEntry>, GitHubError> {
        try_join_all(files.iter().map(|(path, content)| async move {
            let sha = self.client.create_blob(repo, path, content).await?;
            Ok::<_, GitHubError>(TreeEntry::blob(path, sha))
        }))
        .await
    }
}
