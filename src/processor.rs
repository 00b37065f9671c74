//! Issue processing - orchestrates the parse-validate-mutate-report flow.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::git::RosterPublisher;
use crate::github::GitHubClient;
use crate::parser::{parse_intent, Action};
use crate::roster::AdminRoster;

/// Terminal outcome of a processing run.
///
/// Every variant corresponds to exactly one comment on the issue. Mutation
/// outcomes ([`Added`](Self::Added) through [`NotPresent`](Self::NotPresent))
/// also close the issue; parse and validation failures leave it open for
/// resubmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No usable handle in the issue body.
    NoHandle,
    /// The requested login does not exist on GitHub.
    UnknownUser(String),
    /// The login exists but is not an org member.
    NotOrgMember(String),
    /// Added to the roster.
    Added(String),
    /// Already on the roster; nothing to do.
    AlreadyPresent(String),
    /// Removed from the roster.
    Removed(String),
    /// Not on the roster; nothing to remove.
    NotPresent(String),
}

impl Outcome {
    /// Whether the roster was mutated.
    #[must_use]
    pub fn changed(&self) -> bool {
        matches!(self, Self::Added(_) | Self::Removed(_))
    }
}

/// Processes one issue end to end.
pub struct Processor {
    config: Config,
    github: GitHubClient,
    publisher: RosterPublisher,
}

impl Processor {
    /// Create a processor for the configured issue.
    pub fn new(config: Config) -> Result<Self> {
        let github = GitHubClient::new(
            &config.token,
            &config.owner,
            &config.repo,
            config.api_base.as_deref(),
        )?;

        Ok(Self {
            config,
            github,
            publisher: RosterPublisher::new(),
        })
    }

    /// Run the full flow for the configured issue.
    ///
    /// Expected request problems (no handle, unknown user, non-member) are
    /// reported as comments and returned as outcomes. Persistence and API
    /// failures propagate as errors.
    pub async fn process(&self) -> Result<Outcome> {
        let issue = self.config.issue_number;
        tracing::info!(issue, "Starting admin team management run");

        let body = self.github.issue_body(issue).await?;

        let Some(intent) = parse_intent(&body) else {
            self.github
                .comment(
                    issue,
                    "❌ Could not find a valid GitHub username in the issue body. \
                     Please provide a GitHub Handle.",
                )
                .await?;
            return Ok(Outcome::NoHandle);
        };

        let login = intent.login.as_str();
        tracing::info!(login, action = intent.action.verb(), "Parsed request");

        let validation = self.github.validate(&self.config.organization, login).await;

        if !validation.exists {
            self.github
                .comment(issue, &format!("❌ User @{login} does not exist on GitHub."))
                .await?;
            return Ok(Outcome::UnknownUser(intent.login));
        }

        if !validation.is_member {
            self.github
                .comment(
                    issue,
                    &format!(
                        "❌ User @{login} is not a member of the {} organization.",
                        self.config.organization
                    ),
                )
                .await?;
            return Ok(Outcome::NotOrgMember(intent.login));
        }

        self.apply(intent.action, login).await
    }

    /// Mutate the roster, persist and publish it when it changed, then
    /// report and close the issue.
    async fn apply(&self, action: Action, login: &str) -> Result<Outcome> {
        let issue = self.config.issue_number;
        let path = self.config.roster_path();
        let mut roster = AdminRoster::load(&path)?;

        let changed = match action {
            Action::Add => roster.add(login),
            Action::Remove => roster.remove(login),
        };

        if changed {
            roster
                .save(&path)
                .with_context(|| format!("Failed to persist roster for {login}"))?;

            let commit_message = match action {
                Action::Add => format!("Add {login} to admin team via IssueOps"),
                Action::Remove => format!("Remove {login} from admin team via IssueOps"),
            };
            self.publisher
                .commit_and_push(&self.config.admin_repo, &self.config.admin_file, &commit_message)
                .await?;

            tracing::info!(login, action = action.verb(), "Roster updated");
        } else {
            tracing::info!(login, action = action.verb(), "Roster already in desired state");
        }

        let (comment, outcome) = match (action, changed) {
            (Action::Add, true) => (
                format!("✅ User @{login} has been successfully added to the admin team!"),
                Outcome::Added(login.to_string()),
            ),
            (Action::Add, false) => (
                format!("ℹ️ User @{login} is already in the admin team."),
                Outcome::AlreadyPresent(login.to_string()),
            ),
            (Action::Remove, true) => (
                format!("✅ User @{login} has been successfully removed from the admin team!"),
                Outcome::Removed(login.to_string()),
            ),
            (Action::Remove, false) => (
                format!("ℹ️ User @{login} is not in the admin team."),
                Outcome::NotPresent(login.to_string()),
            ),
        };

        self.github.comment(issue, &comment).await?;
        self.github.close(issue).await?;

        Ok(outcome)
    }

    /// Best-effort generic failure comment for the top-level error handler.
    pub async fn report_failure(&self, error: &anyhow::Error) {
        let message = format!("❌ Error processing request: {error}");
        if let Err(e) = self.github.comment(self.config.issue_number, &message).await {
            tracing::warn!(error = %e, "Could not post failure comment");
        }
    }
}
