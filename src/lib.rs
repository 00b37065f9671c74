//! IssueOps automation for the admin team roster.
//!
//! This crate provides:
//! - Issue-form parsing to extract the requested handle and action
//! - User and org-membership validation against the GitHub API
//! - A YAML-backed admin roster with idempotent add/remove mutations
//! - Commit-and-push of roster changes with a fixed bot identity
//! - A minimal HTTP server for health probes

pub mod config;
pub mod git;
pub mod github;
pub mod parser;
pub mod processor;
pub mod roster;
pub mod server;

// Re-export main types
pub use config::Config;
pub use git::RosterPublisher;
pub use github::{GitHubClient, Validation};
pub use parser::{Action, Intent};
pub use processor::{Outcome, Processor};
pub use roster::AdminRoster;
