//! Error taxonomy for the automation library
//!
//! Configuration problems (no credential, no repository identity) are raised
//! before any network call and are never retried. GitHub failures arrive here
//! only after the retry budget is spent. Command failures are never retried.

use automator_github::GitHubError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("{var} not set in environment")]
    MissingCredential { var: &'static str },

    #[error(
        "Could not infer repository ({reason}); pass --repo owner/name or set git remote 'origin'"
    )]
    RepositoryIdentityUnknown { reason: String },

    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error("Command failed ({exit_code}): {command}")]
    CommandFailed { exit_code: i32, command: String },

    #[error("{} directory not found", .path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Document store error: {0}")]
    ExternalStore(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AutomationError {
    /// True for failures caused by missing or unusable local configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            AutomationError::MissingCredential { .. }
                | AutomationError::RepositoryIdentityUnknown { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AutomationError>;
