//! Settings assembled once from the environment and handed to components
//!
//! Nothing below reads the environment after construction; the facade and
//! the workflow only see the values captured here.

use crate::constants;
use crate::retry::RetryPolicy;
use automator_github::RepoId;
use std::fmt;
use std::path::PathBuf;

/// GitHub bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, trimmed; blank tokens count as no token
    pub fn new(token: impl AsRef<str>) -> Option<Self> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Configuration for [`crate::agent::RepoAgent`]
#[derive(Debug, Clone)]
pub struct AgentSettings {
    /// Root of the local project; commands and remote lookups run here
    pub repo_root: PathBuf,
    /// Explicit repository identity, skipping remote inference
    pub repo: Option<RepoId>,
    pub credential: Option<Credential>,
    pub retry: RetryPolicy,
}

impl AgentSettings {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            repo: None,
            credential: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Settings for the current directory with the token from `GITHUB_TOKEN`
    pub fn from_env() -> std::io::Result<Self> {
        let root = std::env::current_dir()?;
        Ok(Self::from_lookup(root, |key| std::env::var(key).ok()))
    }

    /// Same as [`AgentSettings::from_env`] with an arbitrary variable source
    pub fn from_lookup(
        repo_root: impl Into<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let credential = lookup(constants::env::GITHUB_TOKEN).and_then(Credential::new);
        Self {
            credential,
            ..Self::new(repo_root)
        }
    }

    pub fn with_repo(mut self, repo: RepoId) -> Self {
        self.repo = Some(repo);
        self
    }

    pub fn with_credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Configuration for [`crate::workflow::AutoPrWorkflow`]
#[derive(Debug, Clone)]
pub struct AutoPrSettings {
    /// Safety gate; the workflow does nothing unless set
    pub enabled: bool,
    /// Document store to check for posts without a slug
    pub store_uri: Option<String>,
    pub branch: String,
    pub base_branch: String,
}

impl Default for AutoPrSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            store_uri: None,
            branch: constants::auto_pr::BRANCH.to_string(),
            base_branch: constants::github::DEFAULT_BASE_BRANCH.to_string(),
        }
    }
}

impl AutoPrSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup(constants::env::AUTO_PR_ENABLE)
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let store_uri = lookup(constants::env::MONGODB_URI).filter(|v| !v.trim().is_empty());

        Self {
            enabled,
            store_uri,
            ..Self::default()
        }
    }
}
