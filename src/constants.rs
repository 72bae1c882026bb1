//! Central constants for the repo-automator application

/// Environment variable names
pub mod env {
    /// Bearer token used for every GitHub call
    pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";

    /// Must equal `true` (any case) for the automated PR flow to run
    pub const AUTO_PR_ENABLE: &str = "AUTO_PR_ENABLE";

    /// Connection string of the document store checked for missing slugs
    pub const MONGODB_URI: &str = "MONGODB_URI";
}

/// Default values for GitHub operations
pub mod github {
    /// Branch used as the base when none is given
    pub const DEFAULT_BASE_BRANCH: &str = "main";

    /// Default commit message for API-built branches
    pub const DEFAULT_COMMIT_MSG: &str = "chore: automated changes";

    /// Default prefix for generated branch names
    pub const DEFAULT_BRANCH_PREFIX: &str = "automated-changes";

    /// Length of UUID suffix used in generated branch names
    pub const UUID_LENGTH: usize = 6;

    /// Remote consulted when inferring the repository identity
    pub const DEFAULT_REMOTE: &str = "origin";
}

/// Retry defaults shared by every GitHub call
pub mod retry {
    use std::time::Duration;

    pub const MAX_ATTEMPTS: u32 = 3;

    pub const BASE_DELAY: Duration = Duration::from_millis(500);
}

/// Project layout the task helpers expect
pub mod project {
    pub const BACKEND_DIR: &str = "Backend";

    pub const FRONTEND_DIR: &str = "frontend";

    pub const TEST_COMMAND: &str = "npm test";

    pub const SITEMAP_COMMAND: &str = "npm run generate-sitemap";

    pub const POPULATE_SLUGS_COMMAND: &str = "npm run populate-slugs";
}

/// Automated pull request workflow
pub mod auto_pr {
    pub const BRANCH: &str = "automated/add-agent-config";

    pub const COMMIT_MSG: &str = "chore(agent): add automated issue template and agent config";

    pub const PR_TITLE: &str = "chore(agent): add automated issue template and config";

    pub const ISSUE_TEMPLATE_PATH: &str = ".github/ISSUE_TEMPLATE/automated_issue.md";

    pub const ISSUE_TEMPLATE_FALLBACK: &str = "# Automated Issue Template";

    pub const AGENT_CONFIG_PATH: &str = ".github/agents/agent.config.yml";

    pub const AGENT_CONFIG: &str = "enabled: true\nsource: repo-automator\n";

    /// Where the slug remediation mapping lands in the branch
    pub const SLUG_MAPPING_PATH: &str = "Backend/scripts/auto_populate_slugs.json";

    pub const BLOG_COLLECTION: &str = "blogs";

    pub const SLUG_FIELD: &str = "slug";
}
