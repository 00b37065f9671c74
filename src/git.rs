//! Git operations using shell commands.
//!
//! Commits and pushes the roster file from the working copy that holds it.
//! All commands run with an explicit `current_dir`; the process working
//! directory is never changed.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::process::Command;

/// Default bot author name.
pub const DEFAULT_AUTHOR_NAME: &str = "Admin Team Manager";

/// Default bot author email.
pub const DEFAULT_AUTHOR_EMAIL: &str = "admin-team-manager@github.com";

/// Commits and pushes roster changes via shell git.
pub struct RosterPublisher {
    /// Git author name.
    author_name: String,
    /// Git author email.
    author_email: String,
}

impl RosterPublisher {
    /// Create a new publisher with the bot identity, overridable through
    /// `GIT_AUTHOR_NAME` / `GIT_AUTHOR_EMAIL`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            author_name: std::env::var("GIT_AUTHOR_NAME")
                .unwrap_or_else(|_| DEFAULT_AUTHOR_NAME.to_string()),
            author_email: std::env::var("GIT_AUTHOR_EMAIL")
                .unwrap_or_else(|_| DEFAULT_AUTHOR_EMAIL.to_string()),
        }
    }

    /// Stage one file, commit it, and push.
    pub async fn commit_and_push(&self, repo_dir: &Path, file: &str, message: &str) -> Result<()> {
        tracing::debug!(repo = %repo_dir.display(), file, "Committing roster change");

        self.configure_user(repo_dir).await?;

        let output = Command::new("git")
            .args(["add", file])
            .current_dir(repo_dir)
            .output()
            .await
            .context("Failed to stage roster file")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow::anyhow!("git add failed: {}", stderr));
        }

        // Confirm something is actually staged before committing.
        let status = Command::new("git")
            .args(["status", "--porcelain", "--", file])
            .current_dir(repo_dir)
            .output()
            .await
            .context("Failed to check git status")?;

        if status.stdout.is_empty() {
            return Err(anyhow::anyhow!("No changes to commit for {file}"));
        }

        let output = Command::new("git")
            .args(["commit", "-m", message])
            .current_dir(repo_dir)
            .output()
            .await
            .context("Failed to commit")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow::anyhow!("git commit failed: {}", stderr));
        }

        let output = Command::new("git")
            .args(["push", "-u", "origin", "HEAD"])
            .current_dir(repo_dir)
            .output()
            .await
            .context("Failed to push")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow::anyhow!("git push failed: {}", stderr));
        }

        tracing::info!(message, "Pushed roster change");
        Ok(())
    }

    /// Configure the git user for the repository (not globally).
    async fn configure_user(&self, repo_dir: &Path) -> Result<()> {
        let output = Command::new("git")
            .args(["config", "user.name", &self.author_name])
            .current_dir(repo_dir)
            .output()
            .await
            .context("Failed to set git user.name")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow::anyhow!("git config user.name failed: {}", stderr));
        }

        let output = Command::new("git")
            .args(["config", "user.email", &self.author_email])
            .current_dir(repo_dir)
            .output()
            .await
            .context("Failed to set git user.email")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow::anyhow!("git config user.email failed: {}", stderr));
        }

        Ok(())
    }
}

impl Default for RosterPublisher {
    fn default() -> Self {
        Self::new()
    }
}
