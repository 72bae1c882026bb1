//! GitHub commands: issues, pull requests, comments and API-built branches

use super::validators::FileSpec;
use super::{Command, CommandContext};
use crate::constants::github::{DEFAULT_BRANCH_PREFIX, UUID_LENGTH};
use crate::github::{BranchRequest, ContentMap};
use anyhow::{Context, Result};
use async_trait::async_trait;
use automator_github::RepoId;
use colored::*;
use std::path::Path;
use uuid::Uuid;

pub struct IssueCommand {
    pub title: String,
    pub body: String,
    pub repo: Option<RepoId>,
}

#[async_trait]
impl Command for IssueCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let issue = context
            .agent
            .create_github_issue(&self.title, &self.body, self.repo.as_ref())
            .await?;
        println!("{} {}", "Issue created:".green(), issue.html_url);
        Ok(())
    }
}

pub struct PrCommand {
    pub title: String,
    pub head: String,
    pub base: String,
    pub body: String,
    pub repo: Option<RepoId>,
}

#[async_trait]
impl Command for PrCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let pr = context
            .agent
            .create_pull_request(
                &self.title,
                &self.head,
                &self.base,
                &self.body,
                self.repo.as_ref(),
            )
            .await?;
        println!("{} {}", "Pull request created:".green(), pr.html_url);
        Ok(())
    }
}

pub struct CommentCommand {
    pub number: u64,
    pub body: String,
    pub repo: Option<RepoId>,
}

#[async_trait]
impl Command for CommentCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let comment = context
            .agent
            .comment_on_pull_request(self.number, &self.body, self.repo.as_ref())
            .await?;
        println!("{} {}", "Comment created:".green(), comment.html_url);
        Ok(())
    }
}

/// Build a branch from local files through the git-data API
pub struct BranchCommand {
    pub branch: Option<String>,
    pub files: Vec<FileSpec>,
    pub message: Option<String>,
    pub base: Option<String>,
    pub repo: Option<RepoId>,
}

impl BranchCommand {
    /// The given branch name, or `automated-changes-<6 hex chars>`
    pub fn branch_name(&self) -> String {
        self.branch.clone().unwrap_or_else(|| {
            format!(
                "{}-{}",
                DEFAULT_BRANCH_PREFIX,
                &Uuid::new_v4().simple().to_string()[..UUID_LENGTH]
            )
        })
    }

    /// Read every `--file` into a content map; relative local paths are
    /// resolved against `root`
    pub fn load_files(&self, root: &Path) -> Result<ContentMap> {
        let mut files = ContentMap::new();
        for spec in &self.files {
            let local = root.join(&spec.local_path);
            let content = std::fs::read_to_string(&local)
                .with_context(|| format!("Failed to read {}", local.display()))?;
            files.insert(&spec.repo_path, content);
        }
        Ok(files)
    }
}

#[async_trait]
impl Command for BranchCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let files = self.load_files(&context.agent.settings().repo_root)?;

        let mut request = BranchRequest::new(self.branch_name(), files);
        if let Some(message) = &self.message {
            request = request.with_commit_message(message);
        }
        if let Some(base) = &self.base {
            request = request.with_base_branch(base);
        }

        let git_ref = context
            .agent
            .create_branch_with_changes(&request, self.repo.as_ref())
            .await?;
        println!(
            "{} {} ({})",
            "Created branch:".green(),
            git_ref.ref_name,
            git_ref.object.sha
        );
        Ok(())
    }
}
