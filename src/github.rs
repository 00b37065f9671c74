//! GitHub API access using octocrab.
//!
//! Issue operations (fetch body, comment, close) and the identity lookups
//! used for request validation. Identity lookups are status-driven probes of
//! the REST endpoints; a not-found or transport failure is an expected
//! outcome there, not an error.

use anyhow::{bail, Context, Result};
use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::json;

/// Result of validating a requested user.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validation {
    /// The login names an existing GitHub user.
    pub exists: bool,
    /// The user is a member of the organization (public or private).
    pub is_member: bool,
}

/// Minimal issue payload; only the body is needed.
#[derive(Debug, Deserialize)]
struct IssueDetails {
    body: Option<String>,
}

/// GitHub API client scoped to one repository.
pub struct GitHubClient {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Create a client with the given token.
    ///
    /// `api_base` overrides the API endpoint (GitHub Actions sets
    /// `GITHUB_API_URL`; tests point this at a mock server).
    pub fn new(token: &str, owner: &str, repo: &str, api_base: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(base) = api_base {
            builder = builder.base_uri(base).context("Invalid API base URI")?;
        }
        let client = builder.build().context("Failed to create GitHub client")?;

        Ok(Self {
            client,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Fetch the body of an issue. An issue with no body yields an empty string.
    pub async fn issue_body(&self, number: u64) -> Result<String> {
        let route = format!("/repos/{}/{}/issues/{number}", self.owner, self.repo);
        let issue: IssueDetails = self
            .client
            .get(&route, None::<&()>)
            .await
            .with_context(|| format!("Failed to fetch issue #{number}"))?;
        Ok(issue.body.unwrap_or_default())
    }

    /// Post a comment on an issue.
    pub async fn comment(&self, number: u64, body: &str) -> Result<()> {
        let route = format!(
            "/repos/{}/{}/issues/{number}/comments",
            self.owner, self.repo
        );
        let response = self
            .client
            ._post(route, Some(&json!({ "body": body })))
            .await
            .with_context(|| format!("Failed to comment on issue #{number}"))?;

        if !response.status().is_success() {
            bail!(
                "Commenting on issue #{number} returned {}",
                response.status()
            );
        }
        Ok(())
    }

    /// Close an issue.
    pub async fn close(&self, number: u64) -> Result<()> {
        let route = format!("/repos/{}/{}/issues/{number}", self.owner, self.repo);
        let response = self
            .client
            ._patch(route, Some(&json!({ "state": "closed" })))
            .await
            .with_context(|| format!("Failed to close issue #{number}"))?;

        if !response.status().is_success() {
            bail!("Closing issue #{number} returned {}", response.status());
        }
        tracing::info!(issue = number, "Closed issue");
        Ok(())
    }

    /// Validate a login against GitHub: existence first, then org membership.
    ///
    /// Membership is probed through the members endpoint (which sees private
    /// members when the token has scope) and falls back to the public-members
    /// endpoint. Every failure converts to a boolean; this never errors.
    pub async fn validate(&self, org: &str, login: &str) -> Validation {
        let mut result = Validation::default();

        if !self.user_exists(login).await {
            tracing::info!(login, "User does not exist on GitHub");
            return result;
        }
        result.exists = true;
        tracing::info!(login, "User exists on GitHub");

        if self.probe(&format!("/orgs/{org}/members/{login}")).await {
            tracing::info!(login, org, "User is an org member");
            result.is_member = true;
        } else if self.probe(&format!("/orgs/{org}/public_members/{login}")).await {
            tracing::info!(login, org, "User is a public org member");
            result.is_member = true;
        } else {
            tracing::info!(login, org, "User is not an org member or membership is private");
        }

        result
    }

    async fn user_exists(&self, login: &str) -> bool {
        let route = format!("/users/{login}");
        match self.client.get::<serde_json::Value, _, _>(&route, None::<&()>).await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(login, error = %e, "User lookup failed");
                false
            }
        }
    }

    /// Probe an endpoint that answers membership questions with its status
    /// code (204 when true, 302/404 otherwise).
    async fn probe(&self, route: &str) -> bool {
        match self.client._get(route.to_string()).await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(route, error = %e, "Membership probe failed");
                false
            }
        }
    }
}

/// Parse a repository reference into owner and repo name.
///
/// Supports formats like:
/// - `https://github.com/owner/repo`
/// - `git@github.com:owner/repo.git`
/// - `owner/repo`
pub fn parse_repository(repo_ref: &str) -> Result<(String, String)> {
    let cleaned = repo_ref
        .replace("git@github.com:", "https://github.com/")
        .replace("https://github.com/", "");
    // Strip a single .git suffix; a repo can legitimately be named "x.git".
    let cleaned = cleaned.strip_suffix(".git").unwrap_or(&cleaned);

    let parts: Vec<&str> = cleaned.trim_end_matches('/').split('/').collect();
    if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
        Ok((parts[0].to_string(), parts[1].to_string()))
    } else {
        bail!("Invalid repository reference: {repo_ref}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repository() {
        assert_eq!(
            parse_repository("https://github.com/owner/repo").unwrap(),
            ("owner".to_string(), "repo".to_string())
        );
        assert_eq!(
            parse_repository("git@github.com:owner/repo.git").unwrap(),
            ("owner".to_string(), "repo".to_string())
        );
        assert_eq!(
            parse_repository("owner/repo").unwrap(),
            ("owner".to_string(), "repo".to_string())
        );
        assert!(parse_repository("not-a-repo").is_err());
        assert!(parse_repository("/repo").is_err());
    }

    #[test]
    fn test_parse_repository_strips_one_git_suffix() {
        assert_eq!(
            parse_repository("owner/repo.git.git").unwrap(),
            ("owner".to_string(), "repo.git".to_string())
        );
    }

    #[test]
    fn test_parse_repository_rejects_extra_segments() {
        assert!(parse_repository("owner/repo/extra").is_err());
        assert!(parse_repository("https://github.com/owner/repo/pulls").is_err());
    }

    #[test]
    fn test_parse_repository_allows_trailing_slash() {
        assert_eq!(
            parse_repository("https://github.com/owner/repo/").unwrap(),
            ("owner".to_string(), "repo".to_string())
        );
    }
}
