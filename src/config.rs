//! Run configuration.

use anyhow::Result;
use std::path::PathBuf;

use crate::github::parse_repository;

/// Default working copy that holds the roster (the org's `.github` repo).
pub const DEFAULT_ADMIN_REPO: &str = ".github";

/// Default roster file name within the working copy.
pub const DEFAULT_ADMIN_FILE: &str = "admin-team.yml";

/// Configuration for one processing run.
#[derive(Debug, Clone)]
pub struct Config {
    /// API token for issue and identity lookups.
    pub token: String,
    /// Organization whose membership gates roster changes.
    pub organization: String,
    /// Repository owner of the issue being processed.
    pub owner: String,
    /// Repository name of the issue being processed.
    pub repo: String,
    /// Issue number to process.
    pub issue_number: u64,
    /// Path to the working copy holding the roster.
    pub admin_repo: PathBuf,
    /// Roster file name within the working copy.
    pub admin_file: String,
    /// API base override (`GITHUB_API_URL` in Actions, mock server in tests).
    pub api_base: Option<String>,
}

impl Config {
    /// Build a config, resolving the `owner/repo` reference.
    pub fn new(
        token: String,
        organization: String,
        repo_ref: &str,
        issue_number: u64,
        admin_repo: PathBuf,
        admin_file: String,
    ) -> Result<Self> {
        let (owner, repo) = parse_repository(repo_ref)?;

        Ok(Self {
            token,
            organization,
            owner,
            repo,
            issue_number,
            admin_repo,
            admin_file,
            api_base: std::env::var("GITHUB_API_URL").ok(),
        })
    }

    /// Full path to the roster file.
    #[must_use]
    pub fn roster_path(&self) -> PathBuf {
        self.admin_repo.join(&self.admin_file)
    }
}
