//! Command implementations behind the CLI

pub mod auto_pr;
pub mod base;
pub mod github;
pub mod tasks;
pub mod validators;

pub use auto_pr::AutoPrCommand;
pub use base::{Command, CommandContext};
pub use github::{BranchCommand, CommentCommand, IssueCommand, PrCommand};
pub use tasks::{ProjectTask, ScanCommand, TaskCommand};
