//! Common test support utilities and fixtures
//!
//! Fakes for the GitHub transport and the command runner that record every
//! call, so tests can assert on ordering and on what was never attempted.

#![allow(dead_code)]

use async_trait::async_trait;
use automator_github::{
    GitHubApi, GitHubError, GitObject, GitRef, Issue, IssueComment, PullRequest,
    PullRequestParams, RepoId, TreeEntry,
};
use repo_automator::runner::CommandRunner;
use repo_automator::{AgentSettings, Credential, RepoAgent, RetryPolicy};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// One recorded GitHub call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetRef {
        repo: String,
        branch: String,
    },
    CreateBlob {
        path: String,
        content: String,
    },
    CreateTree {
        base_tree: String,
        entries: Vec<TreeEntry>,
    },
    CreateCommit {
        message: String,
        tree: String,
        parents: Vec<String>,
    },
    CreateRef {
        branch: String,
        sha: String,
    },
    CreateIssue {
        title: String,
        body: String,
    },
    CreatePullRequest {
        title: String,
        head: String,
        base: String,
        body: String,
    },
    Comment {
        number: u64,
        body: String,
    },
}

impl Call {
    /// Short endpoint name used to program failures
    pub fn endpoint(&self) -> &'static str {
        match self {
            Call::GetRef { .. } => "get_ref",
            Call::CreateBlob { .. } => "blob",
            Call::CreateTree { .. } => "tree",
            Call::CreateCommit { .. } => "commit",
            Call::CreateRef { .. } => "create_ref",
            Call::CreateIssue { .. } => "issue",
            Call::CreatePullRequest { .. } => "pull",
            Call::Comment { .. } => "comment",
        }
    }
}

/// In-memory GitHub that answers with fixed shas
///
/// The base branch head is `base-sha`, blobs are `blob-sha-<path>`, the tree
/// is `tree-sha` and the commit `commit-sha`.
#[derive(Default)]
pub struct FakeGitHub {
    calls: Mutex<Vec<Call>>,
    remaining_failures: Mutex<HashMap<&'static str, u32>>,
    always_failing: Mutex<HashSet<&'static str>>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `times` calls to `endpoint`
    pub fn fail_times(self, endpoint: &'static str, times: u32) -> Self {
        self.remaining_failures
            .lock()
            .unwrap()
            .insert(endpoint, times);
        self
    }

    /// Fail every call to `endpoint`
    pub fn always_fail(self, endpoint: &'static str) -> Self {
        self.always_failing.lock().unwrap().insert(endpoint);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn endpoints(&self) -> Vec<&'static str> {
        self.calls().iter().map(Call::endpoint).collect()
    }

    pub fn count(&self, endpoint: &str) -> usize {
        self.endpoints().iter().filter(|e| **e == endpoint).count()
    }

    /// Record `call` and decide whether it fails
    fn record(&self, call: Call) -> bool {
        let endpoint = call.endpoint();
        self.calls.lock().unwrap().push(call);

        if self.always_failing.lock().unwrap().contains(endpoint) {
            return true;
        }
        let mut remaining = self.remaining_failures.lock().unwrap();
        match remaining.get_mut(endpoint) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }
}

fn object_failure(object: &'static str, path: Option<&str>) -> GitHubError {
    GitHubError::ObjectCreationFailed {
        object,
        path: path.map(str::to_string),
        status: 502,
        body: "Bad Gateway".to_string(),
    }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn get_branch_head_sha(&self, repo: &RepoId, branch: &str) -> Result<String, GitHubError> {
        if self.record(Call::GetRef {
            repo: repo.to_string(),
            branch: branch.to_string(),
        }) {
            return Err(GitHubError::ReferenceNotFound {
                branch: branch.to_string(),
                status: 404,
                body: "Not Found".to_string(),
            });
        }
        Ok("base-sha".to_string())
    }

    async fn create_blob(&self, _repo: &RepoId, path: &str, content: &str) -> Result<String, GitHubError> {
        if self.record(Call::CreateBlob {
            path: path.to_string(),
            content: content.to_string(),
        }) {
            return Err(object_failure("blob", Some(path)));
        }
        Ok(format!("blob-sha-{}", path))
    }

    async fn create_tree(
        &self,
        _repo: &RepoId,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<String, GitHubError> {
        if self.record(Call::CreateTree {
            base_tree: base_tree.to_string(),
            entries: entries.to_vec(),
        }) {
            return Err(object_failure("tree", None));
        }
        Ok("tree-sha".to_string())
    }

    async fn create_commit(
        &self,
        _repo: &RepoId,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> Result<String, GitHubError> {
        if self.record(Call::CreateCommit {
            message: message.to_string(),
            tree: tree.to_string(),
            parents: parents.to_vec(),
        }) {
            return Err(object_failure("commit", None));
        }
        Ok("commit-sha".to_string())
    }

    async fn create_ref(&self, _repo: &RepoId, branch: &str, sha: &str) -> Result<GitRef, GitHubError> {
        let ref_name = format!("refs/heads/{}", branch);
        if self.record(Call::CreateRef {
            branch: branch.to_string(),
            sha: sha.to_string(),
        }) {
            return Err(GitHubError::RefCreationFailed {
                ref_name,
                status: 422,
                body: "Reference already exists".to_string(),
            });
        }
        Ok(GitRef {
            ref_name,
            node_id: None,
            url: None,
            object: GitObject {
                sha: sha.to_string(),
                kind: Some("commit".to_string()),
                url: None,
            },
        })
    }

    async fn create_issue(&self, repo: &RepoId, title: &str, body: &str) -> Result<Issue, GitHubError> {
        if self.record(Call::CreateIssue {
            title: title.to_string(),
            body: body.to_string(),
        }) {
            return Err(GitHubError::RequestFailed {
                action: "create issue",
                status: 500,
                body: "Server Error".to_string(),
            });
        }
        Ok(Issue {
            html_url: format!("https://github.com/{}/issues/1", repo),
            number: 1,
            title: title.to_string(),
            extra: serde_json::json!({}),
        })
    }

    async fn create_pull_request(&self, params: PullRequestParams<'_>) -> Result<PullRequest, GitHubError> {
        if self.record(Call::CreatePullRequest {
            title: params.title.to_string(),
            head: params.head.to_string(),
            base: params.base.to_string(),
            body: params.body.to_string(),
        }) {
            return Err(GitHubError::RequestFailed {
                action: "create pull request",
                status: 422,
                body: "Validation Failed".to_string(),
            });
        }
        Ok(PullRequest {
            html_url: format!("https://github.com/{}/pull/1", params.repo),
            number: 1,
            id: 101,
            title: params.title.to_string(),
            state: "open".to_string(),
        })
    }

    async fn comment_on_pull_request(
        &self,
        repo: &RepoId,
        number: u64,
        body: &str,
    ) -> Result<IssueComment, GitHubError> {
        if self.record(Call::Comment {
            number,
            body: body.to_string(),
        }) {
            return Err(GitHubError::RequestFailed {
                action: "comment on pull request",
                status: 500,
                body: "Server Error".to_string(),
            });
        }
        Ok(IssueComment {
            id: 7,
            html_url: format!("https://github.com/{}/pull/{}#issuecomment-7", repo, number),
            body: body.to_string(),
        })
    }
}

/// Runner that records commands instead of executing them
pub struct FakeRunner {
    exit_code: i32,
    runs: Mutex<Vec<(String, PathBuf)>>,
}

impl FakeRunner {
    pub fn exiting_with(exit_code: i32) -> Self {
        Self {
            exit_code,
            runs: Mutex::new(Vec::new()),
        }
    }

    pub fn runs(&self) -> Vec<(String, PathBuf)> {
        self.runs.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &str, cwd: &Path) -> repo_automator::Result<i32> {
        self.runs
            .lock()
            .unwrap()
            .push((command.to_string(), cwd.to_path_buf()));
        Ok(self.exit_code)
    }
}

/// Millisecond backoff so retry paths stay fast
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(1))
}

pub fn test_repo() -> RepoId {
    RepoId::new("owner", "repo")
}

/// Settings with a token, an explicit repository and fast retries
pub fn settings_with_token(root: &Path) -> AgentSettings {
    AgentSettings::new(root)
        .with_repo(test_repo())
        .with_credential(Credential::new("ghp_testtoken"))
        .with_retry(fast_retry())
}

pub fn agent(settings: AgentSettings) -> RepoAgent<FakeGitHub, FakeRunner> {
    RepoAgent::new(settings, FakeGitHub::new(), FakeRunner::exiting_with(0))
}
