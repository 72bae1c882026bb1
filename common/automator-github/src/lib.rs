//! GitHub REST client library for repository automation
//!
//! This library wraps the handful of GitHub endpoints needed to open issues,
//! open and comment on pull requests, and build a branch directly from
//! git-data objects without a local checkout.
//!
//! ## Modules
//!
//! - [`client`]: Core GitHub client implementation
//! - [`git_data`]: Blob, tree, commit and ref endpoints
//! - [`issues`]: Issue creation and issue/PR comments
//! - [`pull_requests`]: Pull request creation
//! - [`api`]: The [`GitHubApi`] trait implemented by [`GitHubClient`]
//! - [`util`]: Repository identity parsing

mod api;
mod client;
mod error;
mod git_data;
mod issues;
mod pull_requests;
mod util;

// Re-export public API
pub use api::GitHubApi;
pub use client::{ACCEPT_V3, GitHubClient};
pub use error::GitHubError;
pub use git_data::{FILE_MODE_REGULAR, GitObject, GitRef, TreeEntry};
pub use issues::{Issue, IssueComment};
pub use pull_requests::{PullRequest, PullRequestParams};
pub use util::{RepoId, parse_github_url};

/// Result alias used throughout this crate
pub type Result<T> = std::result::Result<T, GitHubError>;
