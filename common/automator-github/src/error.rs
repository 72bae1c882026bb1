//! GitHub API error types
//!
//! Each variant carries the endpoint context (branch, object kind, path or ref
//! name) plus the HTTP status and response body so failures can be diagnosed
//! without re-running the request.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    /// The base branch lookup did not return 200
    #[error("Failed to get base ref heads/{branch} ({status}): {body}")]
    ReferenceNotFound {
        branch: String,
        status: u16,
        body: String,
    },

    /// A blob, tree or commit could not be created
    #[error("Failed to create {object}{} ({status}): {body}", path_suffix(.path))]
    ObjectCreationFailed {
        object: &'static str,
        path: Option<String>,
        status: u16,
        body: String,
    },

    /// The ref could not be created, including when it already exists
    #[error("Failed to create ref {ref_name} ({status}): {body}")]
    RefCreationFailed {
        ref_name: String,
        status: u16,
        body: String,
    },

    /// Issue, pull request or comment creation was rejected
    #[error("Failed to {action} ({status}): {body}")]
    RequestFailed {
        action: &'static str,
        status: u16,
        body: String,
    },

    #[error("Invalid repository identity: {input}")]
    InvalidRepository { input: String },

    #[error("Unexpected GitHub response: {what}")]
    MalformedResponse { what: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

fn path_suffix(path: &Option<String>) -> String {
    match path {
        Some(path) => format!(" for {}", path),
        None => String::new(),
    }
}

impl GitHubError {
    /// HTTP status of a rejected request, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::ReferenceNotFound { status, .. }
            | GitHubError::ObjectCreationFailed { status, .. }
            | GitHubError::RefCreationFailed { status, .. }
            | GitHubError::RequestFailed { status, .. } => Some(*status),
            GitHubError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
