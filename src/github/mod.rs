//! GitHub integration for the automation core
//!
//! - [`client`]: [`RetryingClient`], which wraps every single-shot
//!   [`GitHubApi`] call in the retry executor
//! - [`synthesizer`]: [`BranchSynthesizer`], which builds a branch from a
//!   [`ContentMap`] through the git-data endpoints
//!
//! The HTTP transport itself lives in the `automator-github` crate.

pub mod client;
pub mod synthesizer;

pub use automator_github::{
    GitHubApi, GitHubClient, GitHubError, GitRef, Issue, IssueComment, PullRequest,
    PullRequestParams, RepoId, TreeEntry,
};
pub use client::RetryingClient;
pub use synthesizer::{BranchRequest, BranchSynthesizer, ContentMap};
