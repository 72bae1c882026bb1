//! Base types and traits for the command pattern

use crate::agent::RepoAgent;
use crate::config::AgentSettings;
use anyhow::Result;

/// Context passed to all commands
pub struct CommandContext {
    pub agent: RepoAgent,
}

impl CommandContext {
    pub fn new(settings: AgentSettings) -> Self {
        Self {
            agent: RepoAgent::from_settings(settings),
        }
    }
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command with the given context
    async fn execute(&self, context: &CommandContext) -> Result<()>;
}
