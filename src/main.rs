//! IssueOps CLI - admin team roster automation.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use issueops::config::{Config, DEFAULT_ADMIN_FILE, DEFAULT_ADMIN_REPO};
use issueops::processor::{Outcome, Processor};
use issueops::server;

/// IssueOps CLI - manage the admin team roster through issues.
#[derive(Parser)]
#[command(name = "issueops")]
#[command(about = "Admin team roster automation driven by issues")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process one admin team request issue
    Process {
        /// Issue number to process
        #[arg(long)]
        issue: u64,

        /// Repository holding the issue (owner/repo)
        #[arg(long)]
        repo: String,

        /// Organization whose membership gates roster changes
        #[arg(long)]
        org: String,

        /// Path to the working copy holding the roster
        #[arg(long, default_value = DEFAULT_ADMIN_REPO)]
        admin_repo: PathBuf,

        /// Roster file name within the working copy
        #[arg(long, default_value = DEFAULT_ADMIN_FILE)]
        admin_file: String,

        /// API token for issue and identity lookups
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Run the health-check HTTP server
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value = "5000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("issueops=debug,info")
    } else {
        EnvFilter::new("issueops=info,warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Process {
            issue,
            repo,
            org,
            admin_repo,
            admin_file,
            token,
        } => {
            tracing::info!(issue, repo = %repo, org = %org, "Processing admin team request");
            run_process(token, org, &repo, issue, admin_repo, admin_file).await
        }
        Commands::Serve { port } => server::serve(port).await,
    }
}

async fn run_process(
    token: String,
    org: String,
    repo: &str,
    issue: u64,
    admin_repo: PathBuf,
    admin_file: String,
) -> Result<()> {
    let config = Config::new(token, org, repo, issue, admin_repo, admin_file)?;
    let processor = Processor::new(config)?;

    match processor.process().await {
        Ok(outcome) => {
            tracing::info!(changed = outcome.changed(), "Run complete");
            print_outcome(&outcome);
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            processor.report_failure(&e).await;
            Err(e)
        }
    }
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::NoHandle => println!("⚠️  No GitHub handle found in the issue body"),
        Outcome::UnknownUser(login) => println!("⚠️  User @{login} does not exist"),
        Outcome::NotOrgMember(login) => println!("⚠️  User @{login} is not an org member"),
        Outcome::Added(login) => println!("✅ Added @{login} to the admin team"),
        Outcome::AlreadyPresent(login) => println!("ℹ️  @{login} was already in the admin team"),
        Outcome::Removed(login) => println!("✅ Removed @{login} from the admin team"),
        Outcome::NotPresent(login) => println!("ℹ️  @{login} was not in the admin team"),
    }
}
