//! Automated pull request command
//!
//! Unlike the other commands this one reports an [`AutoPrOutcome`] instead of
//! an error, because each outcome maps to its own process exit status.

use super::CommandContext;
use crate::config::AutoPrSettings;
use crate::workflow::{AutoPrOutcome, AutoPrWorkflow};

pub struct AutoPrCommand {
    pub settings: AutoPrSettings,
}

impl AutoPrCommand {
    /// Run the workflow and report how it ended; the CLI exits with
    /// [`AutoPrOutcome::exit_code`]
    pub async fn run(&self, context: &CommandContext) -> AutoPrOutcome {
        let outcome = AutoPrWorkflow::new(&context.agent, self.settings.clone())
            .run()
            .await;
        if let AutoPrOutcome::Completed { pr_url, .. } = &outcome {
            println!("Created PR: {}", pr_url);
        }
        outcome
    }
}
