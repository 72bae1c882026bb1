//! Automated pull request workflow
//!
//! Gate-checks the enable flag and the credential, assembles the files to
//! propose (agent config, issue template and, when the document store has
//! posts without a slug, a slug mapping), builds a branch through the API and
//! opens a pull request for it.
//!
//! Branch creation and pull request creation are separate stages with their
//! own outcome. A branch that was created stays in place when the pull request
//! step fails.

use crate::agent::RepoAgent;
use crate::config::AutoPrSettings;
use crate::constants::auto_pr;
use crate::error::{AutomationError, Result};
use crate::github::{BranchRequest, ContentMap};
use crate::logger::Logger;
use crate::runner::CommandRunner;
use crate::slug::{self, SlugMapping};
use crate::store::{DocumentStore, open_store};
use automator_github::{GitHubApi, GitRef};

const SCOPE: &str = "auto-pr";

/// How a workflow run ended
#[derive(Debug)]
pub enum AutoPrOutcome {
    /// The enable flag is not set
    Skipped,
    /// No GitHub token; nothing was attempted
    MissingCredential,
    BranchFailed(AutomationError),
    PullRequestFailed {
        branch_ref: GitRef,
        error: AutomationError,
    },
    Completed {
        branch_ref: GitRef,
        pr_url: String,
        slug_records: usize,
    },
}

impl AutoPrOutcome {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            AutoPrOutcome::Skipped | AutoPrOutcome::Completed { .. } => 0,
            AutoPrOutcome::MissingCredential => 2,
            AutoPrOutcome::BranchFailed(_) => 3,
            AutoPrOutcome::PullRequestFailed { .. } => 4,
        }
    }
}

pub struct AutoPrWorkflow<'a, A: GitHubApi, R: CommandRunner> {
    agent: &'a RepoAgent<A, R>,
    settings: AutoPrSettings,
    store: Option<Box<dyn DocumentStore>>,
    logger: Logger,
}

impl<'a, A: GitHubApi, R: CommandRunner> AutoPrWorkflow<'a, A, R> {
    pub fn new(agent: &'a RepoAgent<A, R>, settings: AutoPrSettings) -> Self {
        Self {
            agent,
            settings,
            store: None,
            logger: Logger,
        }
    }

    /// Use `store` instead of opening `settings.store_uri`
    pub fn with_store(mut self, store: Box<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn run(&self) -> AutoPrOutcome {
        if !self.settings.enabled {
            self.logger
                .info(SCOPE, "AUTO_PR_ENABLE not true; skipping automated PR flow.");
            return AutoPrOutcome::Skipped;
        }

        if self.agent.settings().credential.is_none() {
            self.logger
                .error(SCOPE, "GITHUB_TOKEN not set; cannot create PR");
            return AutoPrOutcome::MissingCredential;
        }

        let mut files = self.base_files().await;
        let mappings = self.slug_mappings().await;
        if !mappings.is_empty() {
            match slug::mapping_file(&mappings) {
                Ok(content) => {
                    files.insert(auto_pr::SLUG_MAPPING_PATH, content);
                    self.logger.info(
                        SCOPE,
                        &format!(
                            "Found {} blogs missing slugs; added {} to PR files.",
                            mappings.len(),
                            auto_pr::SLUG_MAPPING_PATH
                        ),
                    );
                }
                Err(e) => self
                    .logger
                    .warn(SCOPE, &format!("Could not serialize slug mapping: {}", e)),
            }
        }
        let has_mapping = files.contains(auto_pr::SLUG_MAPPING_PATH);

        self.logger
            .info(SCOPE, "Creating branch and committing files via GitHub API...");
        let request = BranchRequest::new(&self.settings.branch, files)
            .with_commit_message(auto_pr::COMMIT_MSG)
            .with_base_branch(&self.settings.base_branch);

        let branch_ref = match self.agent.create_branch_with_changes(&request, None).await {
            Ok(branch_ref) => branch_ref,
            Err(e) => {
                self.logger
                    .error(SCOPE, &format!("Failed to create branch: {}", e));
                return AutoPrOutcome::BranchFailed(e);
            }
        };
        self.logger
            .success(SCOPE, &format!("Created branch: {}", branch_ref.ref_name));

        let body = pull_request_body(has_mapping);
        match self
            .agent
            .create_pull_request(
                auto_pr::PR_TITLE,
                &self.settings.branch,
                &self.settings.base_branch,
                &body,
                None,
            )
            .await
        {
            Ok(pr) => AutoPrOutcome::Completed {
                branch_ref,
                pr_url: pr.html_url,
                slug_records: mappings.len(),
            },
            Err(error) => {
                self.logger
                    .error(SCOPE, &format!("Failed to create PR: {}", error));
                AutoPrOutcome::PullRequestFailed { branch_ref, error }
            }
        }
    }

    /// Agent config plus the issue template, taken from the checkout when present
    async fn base_files(&self) -> ContentMap {
        let template_path = self
            .agent
            .settings()
            .repo_root
            .join(auto_pr::ISSUE_TEMPLATE_PATH);

        let template = match tokio::fs::read_to_string(&template_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                auto_pr::ISSUE_TEMPLATE_FALLBACK.to_string()
            }
            Err(e) => {
                self.logger.warn(
                    SCOPE,
                    &format!("Could not read {}: {}", template_path.display(), e),
                );
                auto_pr::ISSUE_TEMPLATE_FALLBACK.to_string()
            }
        };

        let mut files = ContentMap::new();
        files.insert(auto_pr::ISSUE_TEMPLATE_PATH, template);
        files.insert(auto_pr::AGENT_CONFIG_PATH, auto_pr::AGENT_CONFIG);
        files
    }

    /// Slug mappings for posts without a slug.
    ///
    /// Store problems only cost the mapping file, never the whole run.
    async fn slug_mappings(&self) -> Vec<SlugMapping> {
        let opened;
        let store: &dyn DocumentStore = match (&self.store, self.settings.store_uri.as_deref()) {
            (Some(store), _) => store.as_ref(),
            (None, Some(uri)) => match open_store(uri).await {
                Ok(store) => {
                    opened = store;
                    opened.as_ref()
                }
                Err(e) => {
                    self.logger.warn(SCOPE, &format!("Store check failed: {}", e));
                    return Vec::new();
                }
            },
            (None, None) => {
                self.logger
                    .info(SCOPE, "MONGODB_URI not set; skipping DB slug detection.");
                return Vec::new();
            }
        };

        match self.find_missing_slugs(store).await {
            Ok(mappings) => {
                if mappings.is_empty() {
                    self.logger
                        .info(SCOPE, "No blogs missing slugs detected in DB.");
                }
                mappings
            }
            Err(e) => {
                self.logger.warn(SCOPE, &format!("Store check failed: {}", e));
                Vec::new()
            }
        }
    }

    async fn find_missing_slugs(&self, store: &dyn DocumentStore) -> Result<Vec<SlugMapping>> {
        let records = store
            .find_missing_field(auto_pr::BLOG_COLLECTION, auto_pr::SLUG_FIELD)
            .await?;
        Ok(slug::build_mappings(&records))
    }
}

fn pull_request_body(has_mapping: bool) -> String {
    let mut lines = vec![
        "Adds agent config and issue template.".to_string(),
        String::new(),
        "---".to_string(),
        "This PR was created automatically by repo-automator.".to_string(),
    ];

    if has_mapping {
        let mapping_line = format!("- `{}`", auto_pr::SLUG_MAPPING_PATH);
        lines.extend(
            [
                "",
                "Detected missing blog slugs and included a mapping file:",
                mapping_line.as_str(),
                "",
                "To apply these mappings after merging, run the backend apply script with access to the database (requires `MONGODB_URI`):",
                "",
                "```sh",
                "cd Backend/scripts",
                "MONGODB_URI=\"<your_mongodb_uri>\" node apply-slugs-from-json.mjs auto_populate_slugs.json",
                "```",
            ]
            .iter()
            .map(|line| line.to_string()),
        );
    }

    lines.join("\n")
}
