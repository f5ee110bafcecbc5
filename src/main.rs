// ABOUTME: CLI entry point for migration-backup-audit
// ABOUTME: Parses commands, resolves paths and routes to report handlers

use clap::{Parser, Subcommand};
use migration_backup_audit::commands;
use migration_backup_audit::config::{load_config_from_file, AuditConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "migration-backup-audit")]
#[command(about = "Reconcile a JSON database backup against schema migrations", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML file overriding default input and output locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    // Runs analyze then compare when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which backup tables are empty and which hold data
    Analyze {
        /// JSON backup dump to read
        #[arg(long)]
        backup: Option<PathBuf>,
        /// Report file to write
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compare backup tables with the tables declared by migrations
    Compare {
        /// JSON backup dump to read
        #[arg(long)]
        backup: Option<PathBuf>,
        /// Directory containing migration files
        #[arg(long)]
        migrations_dir: Option<PathBuf>,
        /// Report file to write
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Flag destructive operations in migration up() methods
    Audit {
        /// Directory containing migration files
        #[arg(long)]
        migrations_dir: Option<PathBuf>,
        /// Report file to write
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - default to INFO level if RUST_LOG not set
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from_file(path)?,
        None => AuditConfig::default(),
    };

    match cli.command {
        Some(Commands::Analyze { backup, output }) => {
            commands::analyze(
                &backup.unwrap_or(config.backup_path),
                &output.unwrap_or(config.analysis_output),
            )
            .await?;
        }
        Some(Commands::Compare {
            backup,
            migrations_dir,
            output,
        }) => {
            commands::compare(
                &backup.unwrap_or(config.backup_path),
                &migrations_dir.unwrap_or(config.migrations_dir),
                &config.migration_extension,
                &output.unwrap_or(config.comparison_output),
            )
            .await?;
        }
        Some(Commands::Audit {
            migrations_dir,
            output,
        }) => {
            commands::audit(
                &migrations_dir.unwrap_or(config.migrations_dir),
                &output.unwrap_or(config.audit_output),
            )
            .await?;
        }
        None => {
            commands::analyze(&config.backup_path, &config.analysis_output).await?;
            commands::compare(
                &config.backup_path,
                &config.migrations_dir,
                &config.migration_extension,
                &config.comparison_output,
            )
            .await?;
        }
    }

    Ok(())
}
