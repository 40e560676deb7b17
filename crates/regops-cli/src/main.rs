//! # regops CLI entry point
//!
//! Parses command-line arguments and dispatches to the command handlers
//! in `regops_cli::commands`. Uses clap derive macros; connection flags
//! are global so they may appear before or after the subcommand.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use regops_cli::commands;

/// RegOps GRC operator CLI
///
/// Drives the uniform per-resource REST contract of a RegOps backend:
/// list, inspect, create, patch, and walk records through the
/// soft-delete lifecycle, for any GRC module the server exposes.
#[derive(Parser, Debug)]
#[command(name = "regops", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Base URL of the RegOps API (falls back to REGOPS_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token (falls back to REGOPS_API_TOKEN).
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List a resource's active records.
    List { module: String, resource: String },

    /// List a resource's soft-deleted records.
    Deleted { module: String, resource: String },

    /// Show one record by id.
    Show {
        module: String,
        resource: String,
        id: String,
    },

    /// Create a record from an inline JSON payload.
    Create {
        module: String,
        resource: String,
        /// Record fields as a JSON object.
        #[arg(long)]
        data: String,
    },

    /// Shallow-merge a JSON patch into a record.
    Update {
        module: String,
        resource: String,
        id: String,
        /// Patch fields as a JSON object.
        #[arg(long)]
        data: String,
    },

    /// Soft-delete a record.
    Delete {
        module: String,
        resource: String,
        id: String,
    },

    /// Restore a soft-deleted record.
    Restore {
        module: String,
        resource: String,
        id: String,
    },

    /// Permanently remove a soft-deleted record. Irreversible.
    Purge {
        module: String,
        resource: String,
        id: String,
    },

    /// Print the known GRC module catalog.
    Modules,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Cli {
        api_url,
        token,
        command,
        verbose: _,
    } = cli;
    let connect = || commands::build_client(api_url.as_deref(), token.as_deref());

    match command {
        Commands::List { module, resource } => {
            commands::run_list(&connect()?, &module, &resource).await
        }
        Commands::Deleted { module, resource } => {
            commands::run_deleted(&connect()?, &module, &resource).await
        }
        Commands::Show {
            module,
            resource,
            id,
        } => commands::run_show(&connect()?, &module, &resource, &id).await,
        Commands::Create {
            module,
            resource,
            data,
        } => commands::run_create(&connect()?, &module, &resource, &data).await,
        Commands::Update {
            module,
            resource,
            id,
            data,
        } => commands::run_update(&connect()?, &module, &resource, &id, &data).await,
        Commands::Delete {
            module,
            resource,
            id,
        } => commands::run_delete(&connect()?, &module, &resource, &id).await,
        Commands::Restore {
            module,
            resource,
            id,
        } => commands::run_restore(&connect()?, &module, &resource, &id).await,
        Commands::Purge {
            module,
            resource,
            id,
        } => commands::run_purge(&connect()?, &module, &resource, &id).await,
        Commands::Modules => commands::run_modules(),
    }
}
