//! Repo Automator - run project scripts and automate GitHub work for a repository
//!
//! The interesting part is [`github::BranchSynthesizer`], which turns a map of
//! path to content into a new branch using only the GitHub git-data API,
//! with every call wrapped in [`retry::retry`].

pub mod agent;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod git;
pub mod github;
pub mod logger;
pub mod retry;
pub mod runner;
pub mod slug;
pub mod store;
pub mod workflow;

pub use agent::{RepoAgent, ScanSummary};
pub use config::{AgentSettings, AutoPrSettings, Credential};
pub use error::{AutomationError, Result};
pub use github::{BranchRequest, BranchSynthesizer, ContentMap, RetryingClient};
pub use retry::RetryPolicy;
pub use workflow::{AutoPrOutcome, AutoPrWorkflow};

pub use automator_github::{GitHubApi, GitHubClient, GitHubError, RepoId};
