use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod narrative_client;

use commands::{AuditArgs, ExportArgs, GenerateArgs, LedgerArgs, NarrativeArgs, SummaryArgs};

#[derive(Parser)]
#[command(name = "bid-ledger")]
#[command(about = "Calibrated factory-discount ledger for network-equipment bids", long_about = None)]
struct Cli {
    /// Optional log file path (logs to file instead of stderr)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline statistics and chart groupings of the selected projects
    Summary(SummaryArgs),
    /// Project ledger, optionally expanded to every bid
    Ledger(LedgerArgs),
    /// Report data-quality findings
    Audit(AuditArgs),
    /// Export the bid-level reconciliation statement to CSV
    Export(ExportArgs),
    /// Write the seeded mock dataset to a file
    Generate(GenerateArgs),
    /// Generate an analysis narrative through the configured service
    Narrative(NarrativeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }

    match cli.command {
        Commands::Summary(args) => commands::run_summary(&args)?,
        Commands::Ledger(args) => commands::run_ledger(&args)?,
        Commands::Audit(args) => commands::run_audit(&args)?,
        Commands::Export(args) => commands::run_export(&args)?,
        Commands::Generate(args) => commands::run_generate(&args)?,
        Commands::Narrative(args) => commands::run_narrative(args).await?,
    }

    Ok(())
}
