//! Checks on CLI arguments that clap cannot express
//!
//! Repository identities, branch names, commit messages and `--file`
//! arguments are validated here before any command touches the network.

use anyhow::Result;
use automator_github::RepoId;
use thiserror::Error;

/// A CLI argument that parsed but makes no sense
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid value '{value}' for {argument}: {reason}")]
pub struct InvalidArgument {
    pub argument: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl InvalidArgument {
    fn new(argument: &'static str, value: &str, reason: &'static str) -> Self {
        Self {
            argument,
            value: value.to_string(),
            reason,
        }
    }
}

/// A `--file` argument: where the content goes in the branch and where it
/// is read from locally
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub repo_path: String,
    pub local_path: String,
}

/// Parse the optional `--repo owner/name` argument
pub fn validate_repo_arg(repo: &Option<String>) -> Result<Option<RepoId>> {
    let Some(value) = repo else {
        return Ok(None);
    };
    let repo = value
        .parse::<RepoId>()
        .map_err(|_| InvalidArgument::new("repo", value, "expected owner/name"))?;
    Ok(Some(repo))
}

/// Reject branch names git would refuse as a ref
pub fn validate_branch_name(branch: &Option<String>) -> Result<()> {
    let Some(name) = branch else {
        return Ok(());
    };

    if name.trim().is_empty() {
        return Err(InvalidArgument::new("branch", name, "branch name is blank").into());
    }
    if name.starts_with('-')
        || name.ends_with('.')
        || name.ends_with('/')
        || name.contains("..")
        || name.contains(char::is_whitespace)
    {
        return Err(InvalidArgument::new("branch", name, "not a valid git branch name").into());
    }

    Ok(())
}

/// A given commit message must contain more than whitespace
pub fn validate_commit_message(message: &Option<String>) -> Result<()> {
    match message {
        Some(msg) if msg.trim().is_empty() => {
            Err(InvalidArgument::new("commit message", msg, "commit message is blank").into())
        }
        _ => Ok(()),
    }
}

/// Parse `--file` arguments of the form `repo/path=local/path` or `path`
/// (same path on both sides). No files at all is allowed and yields a branch
/// identical in content to its base.
pub fn validate_file_specs(specs: &[String]) -> Result<Vec<FileSpec>> {
    specs
        .iter()
        .map(|spec| {
            let (repo_path, local_path) = spec
                .split_once('=')
                .unwrap_or((spec.as_str(), spec.as_str()));
            let (repo_path, local_path) = (repo_path.trim(), local_path.trim());
            if repo_path.is_empty() || local_path.is_empty() {
                return Err(InvalidArgument::new(
                    "--file",
                    spec,
                    "expected <repo path>=<local path>",
                )
                .into());
            }
            Ok(FileSpec {
                repo_path: repo_path.to_string(),
                local_path: local_path.to_string(),
            })
        })
        .collect()
}
