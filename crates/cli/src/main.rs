//! # Portal CLI
//!
//! Command-line interface for the student and employer portal.
//!
//! ## Usage
//!
//! ```bash
//! portal serve     # Start the API server (runs migrations and seeds first)
//! portal migrate   # Run database migrations
//! portal seed      # Insert the default super admin and sample data
//! portal validate  # Check the environment
//! portal --help    # Show help
//! ```

mod commands;
mod config;
mod server;

use clap::{CommandFactory as _, Parser};
use tracing::info;

use crate::commands::Commands;

/// Student and employer portal
#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "PORTAL_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Also write logs to this file, rotated hourly
    #[arg(long, env = "PORTAL_LOG_FILE")]
    pub log_file: Option<String>,

    /// Full database URL; overrides the PORTAL_DB_* parts
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let _log_guard = logging::init(&cli.log_level, &cli.log_format, cli.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!(target: "app", command = ?cli.command, "Portal CLI starting...");

    match cli.command {
        Commands::Serve(args) => {
            let database_url = config::resolve_database_url(cli.database_url.as_deref())?;
            server::serve(&database_url, &args).await?;
        },
        Commands::Migrate(args) => {
            let database_url = config::resolve_database_url(cli.database_url.as_deref())?;
            commands::migrate::migrate(&database_url, &args).await?;
        },
        Commands::Seed => {
            let database_url = config::resolve_database_url(cli.database_url.as_deref())?;
            commands::seed::seed(&database_url).await?;
        },
        Commands::Completions(args) => commands::completions::completions(args.shell, &mut Cli::command()),
        Commands::Validate => commands::validate::validate(cli.database_url.as_deref())?,
    }

    info!(target: "app", "Portal CLI completed successfully");
    Ok(())
}
