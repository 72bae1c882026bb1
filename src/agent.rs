//! Repository automation facade
//!
//! [`RepoAgent`] is the single entry point for GitHub operations and project
//! scripts. Every GitHub operation checks for a credential before anything
//! else, so a missing token never turns into a network call.

use crate::config::{AgentSettings, Credential};
use crate::constants;
use crate::error::{AutomationError, Result};
use crate::git;
use crate::github::{BranchRequest, BranchSynthesizer, RetryingClient};
use crate::logger::Logger;
use crate::runner::{CommandRunner, ShellRunner};
use automator_github::{
    GitHubApi, GitHubClient, GitRef, Issue, IssueComment, PullRequest, PullRequestParams, RepoId,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File and directory counts below the repository root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub files: usize,
    pub dirs: usize,
}

pub struct RepoAgent<A: GitHubApi = GitHubClient, R: CommandRunner = ShellRunner> {
    settings: AgentSettings,
    api: A,
    runner: R,
    logger: Logger,
}

impl RepoAgent {
    /// Agent backed by the real GitHub API and the system shell
    pub fn from_settings(settings: AgentSettings) -> Self {
        let token = settings
            .credential
            .as_ref()
            .map(|c| c.expose().to_string());
        Self::new(settings, GitHubClient::new(token), ShellRunner::new())
    }
}

impl<A: GitHubApi, R: CommandRunner> RepoAgent<A, R> {
    pub fn new(settings: AgentSettings, api: A, runner: R) -> Self {
        Self {
            settings,
            api,
            runner,
            logger: Logger,
        }
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn credential(&self) -> Result<&Credential> {
        self.settings
            .credential
            .as_ref()
            .ok_or(AutomationError::MissingCredential {
                var: constants::env::GITHUB_TOKEN,
            })
    }

    fn client(&self) -> RetryingClient<'_, A> {
        RetryingClient::new(&self.api, self.settings.retry)
    }

    /// Work out which repository to talk to.
    ///
    /// An explicit identity wins, then the one from the settings, then the
    /// URL of the `origin` remote of the local checkout.
    pub fn resolve_repo(&self, explicit: Option<&RepoId>) -> Result<RepoId> {
        if let Some(repo) = explicit.or(self.settings.repo.as_ref()) {
            return Ok(repo.clone());
        }

        let url = git::remote_url(&self.settings.repo_root, constants::github::DEFAULT_REMOTE)
            .map_err(|reason| AutomationError::RepositoryIdentityUnknown { reason })?;

        RepoId::from_remote_url(&url).map_err(|e| AutomationError::RepositoryIdentityUnknown {
            reason: e.to_string(),
        })
    }

    /// Open an issue and return GitHub's payload
    pub async fn create_github_issue(
        &self,
        title: &str,
        body: &str,
        repo: Option<&RepoId>,
    ) -> Result<Issue> {
        self.credential()?;
        let repo = self.resolve_repo(repo)?;

        let issue = self.client().create_issue(&repo, title, body).await?;
        self.logger.success(
            &repo.to_string(),
            &format!("Issue created: {}", issue.html_url),
        );
        Ok(issue)
    }

    pub async fn create_pull_request(
        &self,
        title: &str,
        head: &str,
        base: &str,
        body: &str,
        repo: Option<&RepoId>,
    ) -> Result<PullRequest> {
        self.credential()?;
        let repo = self.resolve_repo(repo)?;

        let params = PullRequestParams::new(&repo, title, head, base, body);
        let pr = self.client().create_pull_request(params).await?;
        self.logger.success(
            &repo.to_string(),
            &format!("Pull request created: {}", pr.html_url),
        );
        Ok(pr)
    }

    pub async fn comment_on_pull_request(
        &self,
        number: u64,
        body: &str,
        repo: Option<&RepoId>,
    ) -> Result<IssueComment> {
        self.credential()?;
        let repo = self.resolve_repo(repo)?;

        let comment = self
            .client()
            .comment_on_pull_request(&repo, number, body)
            .await?;
        self.logger.success(
            &repo.to_string(),
            &format!("Commented on #{}: {}", number, comment.html_url),
        );
        Ok(comment)
    }

    /// Create a branch holding `request.files` without touching the local
    /// checkout. See [`BranchSynthesizer::create_branch`].
    pub async fn create_branch_with_changes(
        &self,
        request: &BranchRequest,
        repo: Option<&RepoId>,
    ) -> Result<GitRef> {
        self.credential()?;
        let repo = self.resolve_repo(repo)?;

        let synthesizer = BranchSynthesizer::new(self.client());
        Ok(synthesizer.create_branch(&repo, request).await?)
    }

    /// Run a shell command, by default in the repository root.
    ///
    /// # Errors
    /// [`AutomationError::CommandFailed`] when `fail_on_non_zero` is set and
    /// the command exits with anything but 0. Commands are never retried.
    pub fn execute_command(
        &self,
        command: &str,
        working_dir: Option<&Path>,
        fail_on_non_zero: bool,
    ) -> Result<i32> {
        let cwd = working_dir.unwrap_or(self.settings.repo_root.as_path());
        let exit_code = self.runner.run(command, cwd)?;

        if fail_on_non_zero && exit_code != 0 {
            return Err(AutomationError::CommandFailed {
                exit_code,
                command: command.to_string(),
            });
        }

        Ok(exit_code)
    }

    pub fn run_backend_tests(&self) -> Result<i32> {
        self.run_in_project_dir(
            constants::project::BACKEND_DIR,
            constants::project::TEST_COMMAND,
        )
    }

    pub fn run_frontend_tests(&self) -> Result<i32> {
        self.run_in_project_dir(
            constants::project::FRONTEND_DIR,
            constants::project::TEST_COMMAND,
        )
    }

    pub fn generate_frontend_sitemap(&self) -> Result<i32> {
        self.run_in_project_dir(
            constants::project::FRONTEND_DIR,
            constants::project::SITEMAP_COMMAND,
        )
    }

    pub fn generate_backend_sitemap(&self) -> Result<i32> {
        self.run_in_project_dir(
            constants::project::BACKEND_DIR,
            constants::project::SITEMAP_COMMAND,
        )
    }

    pub fn populate_blog_slugs(&self) -> Result<i32> {
        self.run_in_project_dir(
            constants::project::BACKEND_DIR,
            constants::project::POPULATE_SLUGS_COMMAND,
        )
    }

    fn run_in_project_dir(&self, dir: &str, command: &str) -> Result<i32> {
        let path: PathBuf = self.settings.repo_root.join(dir);
        if !path.is_dir() {
            return Err(AutomationError::DirectoryNotFound { path });
        }
        self.execute_command(command, Some(&path), true)
    }

    /// Count files and directories below the repository root
    pub fn scan_repo(&self) -> Result<ScanSummary> {
        let mut summary = ScanSummary { files: 0, dirs: 0 };

        for entry in WalkDir::new(&self.settings.repo_root).min_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_dir() {
                summary.dirs += 1;
            } else {
                summary.files += 1;
            }
        }

        Ok(summary)
    }
}
