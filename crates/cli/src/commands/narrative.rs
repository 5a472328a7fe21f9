//! Narrative report command.
//!
//! Builds the narrative payload for the selected projects and sends it to the
//! generative-text service. Service failures print a fallback message and
//! still exit successfully.

use anyhow::Result;
use bid_ledger_calibration::{aggregate_portfolio, NarrativeRequest};
use clap::Args;
use tracing::warn;

use super::dataset::DatasetArgs;
use crate::narrative_client::{NarrativeClient, FALLBACK_MESSAGE};

#[derive(Args, Debug, Clone)]
pub struct NarrativeArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Print the request payload instead of calling the service
    #[arg(long)]
    pub dry_run: bool,

    /// API key (overrides narrative.api_key from config)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Runs the narrative command.
///
/// # Errors
/// Returns an error if the config or dataset cannot be loaded.
pub async fn run_narrative(args: NarrativeArgs) -> Result<()> {
    let ledger = args.dataset.load()?;
    let stats = aggregate_portfolio(ledger.selected());
    let request = NarrativeRequest::build(&stats, &ledger.query, &ledger.config);

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    let mut config = ledger.config.narrative;
    if args.api_key.is_some() {
        config.api_key = args.api_key;
    }

    let text = match NarrativeClient::new(config) {
        Ok(client) => client.generate_or_fallback(&request).await,
        Err(e) => {
            warn!(error = %e, "Narrative client unavailable");
            FALLBACK_MESSAGE.to_string()
        }
    };
    println!("{text}");

    Ok(())
}
