use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use repo_automator::commands::validators;
use repo_automator::commands::*;
use repo_automator::config::{AgentSettings, AutoPrSettings};
use repo_automator::constants;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repo-automator")]
#[command(about = "Run project scripts and automate GitHub issues, pull requests and branches")]
#[command(version)]
struct Cli {
    /// Repository root (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan repository and print file/dir counts
    Scan,

    /// Run Backend tests (npm test in Backend)
    BackendTest,

    /// Run frontend tests (npm test in frontend)
    FrontendTest,

    /// Run frontend sitemap generator script
    GenerateFrontendSitemap,

    /// Run backend sitemap generator script
    GenerateBackendSitemap,

    /// Run backend slug population script
    PopulateSlugs,

    /// Create a GitHub issue (requires GITHUB_TOKEN)
    CreateIssue {
        #[arg(long)]
        title: String,

        #[arg(long)]
        body: String,

        /// owner/repo (if not provided, inferred from git remote)
        #[arg(long)]
        repo: Option<String>,
    },

    /// Open a pull request (requires GITHUB_TOKEN)
    CreatePr {
        #[arg(long)]
        title: String,

        /// Branch holding the changes
        #[arg(long)]
        head: String,

        #[arg(long, default_value_t = constants::github::DEFAULT_BASE_BRANCH.to_string())]
        base: String,

        #[arg(long, default_value = "")]
        body: String,

        /// owner/repo (if not provided, inferred from git remote)
        #[arg(long)]
        repo: Option<String>,
    },

    /// Comment on a pull request (requires GITHUB_TOKEN)
    CommentPr {
        /// Pull request number
        #[arg(long)]
        number: u64,

        #[arg(long)]
        body: String,

        /// owner/repo (if not provided, inferred from git remote)
        #[arg(long)]
        repo: Option<String>,
    },

    /// Create a branch from local files through the GitHub API, without a local commit
    CreateBranch {
        /// Branch to create (generated when omitted)
        #[arg(long)]
        branch: Option<String>,

        /// File to include, as <repo path>=<local path> or <path> (repeatable;
        /// without any the branch matches its base)
        #[arg(long = "file", value_name = "SPEC")]
        files: Vec<String>,

        /// Commit message
        #[arg(long)]
        message: Option<String>,

        /// Base branch to build on
        #[arg(long)]
        base: Option<String>,

        /// owner/repo (if not provided, inferred from git remote)
        #[arg(long)]
        repo: Option<String>,
    },

    /// Open the automated agent-config pull request (requires AUTO_PR_ENABLE=true)
    AutoPr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = AgentSettings::from_env().context("Failed to determine current directory")?;
    if let Some(root) = cli.root {
        settings.repo_root = root;
    }
    let context = CommandContext::new(settings);

    match cli.command {
        Commands::Scan => ScanCommand.execute(&context).await?,
        Commands::BackendTest => run_task(ProjectTask::BackendTests, &context).await?,
        Commands::FrontendTest => run_task(ProjectTask::FrontendTests, &context).await?,
        Commands::GenerateFrontendSitemap => {
            run_task(ProjectTask::FrontendSitemap, &context).await?
        }
        Commands::GenerateBackendSitemap => run_task(ProjectTask::BackendSitemap, &context).await?,
        Commands::PopulateSlugs => run_task(ProjectTask::PopulateSlugs, &context).await?,
        Commands::CreateIssue { title, body, repo } => {
            let repo = validators::validate_repo_arg(&repo)?;
            IssueCommand { title, body, repo }.execute(&context).await?;
        }
        Commands::CreatePr {
            title,
            head,
            base,
            body,
            repo,
        } => {
            let repo = validators::validate_repo_arg(&repo)?;
            validators::validate_branch_name(&Some(head.clone()))?;
            validators::validate_branch_name(&Some(base.clone()))?;
            PrCommand {
                title,
                head,
                base,
                body,
                repo,
            }
            .execute(&context)
            .await?;
        }
        Commands::CommentPr { number, body, repo } => {
            let repo = validators::validate_repo_arg(&repo)?;
            CommentCommand { number, body, repo }
                .execute(&context)
                .await?;
        }
        Commands::CreateBranch {
            branch,
            files,
            message,
            base,
            repo,
        } => {
            let repo = validators::validate_repo_arg(&repo)?;
            validators::validate_branch_name(&branch)?;
            validators::validate_branch_name(&base)?;
            validators::validate_commit_message(&message)?;
            let files = validators::validate_file_specs(&files)?;

            BranchCommand {
                branch,
                files,
                message,
                base,
                repo,
            }
            .execute(&context)
            .await?;
        }
        Commands::AutoPr => {
            let outcome = AutoPrCommand {
                settings: AutoPrSettings::from_env(),
            }
            .run(&context)
            .await;
            std::process::exit(outcome.exit_code());
        }
    }

    Ok(())
}

async fn run_task(task: ProjectTask, context: &CommandContext) -> Result<()> {
    TaskCommand { task }.execute(context).await
}
