//! Repository identity parsing

use crate::{GitHubError, Result};
use std::fmt;
use std::str::FromStr;

/// An `owner/name` pair identifying a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Build an identity from a remote URL as printed by `git remote get-url`
    pub fn from_remote_url(url: &str) -> Result<Self> {
        let (owner, name) = parse_github_url(url)?;
        Ok(Self::new(owner, name))
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = GitHubError;

    /// Parse an explicit `owner/name` string
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_end_matches('/').trim_end_matches(".git");
        match trimmed.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(GitHubError::InvalidRepository {
                input: s.to_string(),
            }),
        }
    }
}

/// Parse GitHub URL to extract owner and repository name
///
/// Supports various GitHub URL formats:
/// - SSH: `git@github.com:owner/repo.git`
/// - HTTPS: `https://github.com/owner/repo.git`
/// - Legacy: `github.com/owner/repo`
///
/// The `.git` suffix and trailing slashes are dropped.
pub fn parse_github_url(url: &str) -> Result<(String, String)> {
    let url = url.trim().trim_end_matches('/').trim_end_matches(".git");

    // Handle SSH URLs: git@github.com:owner/repo or git@github-enterprise:owner/repo
    if url.starts_with("git@")
        && let Some(colon_pos) = url.find(':')
    {
        let after_colon = &url[colon_pos + 1..];
        let parts: Vec<&str> = after_colon.split('/').collect();
        if parts.len() == 2 && parts.iter().all(|p| !p.is_empty()) {
            return Ok((parts[0].to_string(), parts[1].to_string()));
        }
    }

    // Handle HTTPS URLs: https://github.com/owner/repo or https://github-enterprise/owner/repo
    if url.starts_with("https://") || url.starts_with("http://") {
        let without_protocol = url
            .trim_start_matches("https://")
            .trim_start_matches("http://");

        let parts: Vec<&str> = without_protocol.split('/').collect();
        if parts.len() >= 3 && !parts[1].is_empty() && !parts[2].is_empty() {
            return Ok((parts[1].to_string(), parts[2].to_string()));
        }
    }

    // Legacy support: github.com/owner/repo
    if url.contains("github.com") {
        let parts: Vec<&str> = url.split('/').collect();
        if parts.len() >= 3 {
            let idx = parts.len() - 2;
            return Ok((parts[idx].to_string(), parts[idx + 1].to_string()));
        }
    }

    Err(GitHubError::InvalidRepository {
        input: url.to_string(),
    })
}
