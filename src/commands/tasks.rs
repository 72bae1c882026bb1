//! Project script and repository scan commands

use super::{Command, CommandContext};
use anyhow::Result;
use async_trait::async_trait;

/// Project scripts runnable from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectTask {
    BackendTests,
    FrontendTests,
    FrontendSitemap,
    BackendSitemap,
    PopulateSlugs,
}

pub struct TaskCommand {
    pub task: ProjectTask,
}

#[async_trait]
impl Command for TaskCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let agent = &context.agent;
        match self.task {
            ProjectTask::BackendTests => agent.run_backend_tests()?,
            ProjectTask::FrontendTests => agent.run_frontend_tests()?,
            ProjectTask::FrontendSitemap => agent.generate_frontend_sitemap()?,
            ProjectTask::BackendSitemap => agent.generate_backend_sitemap()?,
            ProjectTask::PopulateSlugs => agent.populate_blog_slugs()?,
        };
        Ok(())
    }
}

/// Print file and directory counts as JSON
pub struct ScanCommand;

#[async_trait]
impl Command for ScanCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let summary = context.agent.scan_repo()?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}
