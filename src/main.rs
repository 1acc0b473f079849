use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use smilewanted_adapter::core::models::context::BatchContext;
use smilewanted_adapter::core::models::item::BidRequestItem;
use smilewanted_adapter::core::observability;
use smilewanted_adapter::{AdapterConfig, SmileWantedAdapter};
use std::path::PathBuf;
use tracing::{info, warn};

const DEFAULT_CONFIG: &str = "smilewanted.yaml";

/// Translates one batch of bid items into endpoint messages
#[derive(Parser, Debug)]
#[command(name = "smilewanted-adapter", version, about, long_about = None)]
struct Args {
    /// YAML configuration, defaults apply when the default file is absent
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
    /// JSON file holding `{items, context}`
    batch: PathBuf,
}

/// One auction round as handed over by the orchestrator
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Batch {
    items: Vec<BidRequestItem>,
    context: BatchContext,
}

fn load_config(path: &PathBuf, explicit: bool) -> anyhow::Result<AdapterConfig> {
    if !explicit && !path.exists() {
        return Ok(AdapterConfig::default());
    }

    AdapterConfig::load(path).with_context(|| format!("Failed loading config {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let explicit = args.config.is_some();
    let config_path = args.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let batch_path = args.batch;

    let config = load_config(&config_path, explicit)?;
    let _guards = observability::init(&config.logging)?;

    let raw = std::fs::read_to_string(&batch_path)
        .with_context(|| format!("Failed reading batch {}", batch_path.display()))?;
    let batch: Batch = serde_json::from_str(&raw).context("Failed parsing batch")?;

    let adapter = SmileWantedAdapter::new(config);

    let total = batch.items.len();
    let items: Vec<BidRequestItem> = batch
        .items
        .into_iter()
        .filter(|item| adapter.is_bid_request_valid(item))
        .collect();

    if items.len() < total {
        warn!("Dropped {} invalid item(s)", total - items.len());
    }

    let messages = adapter.build(&items, &batch.context);
    info!(
        "Built {} message(s) for {} item(s) with {} encoding",
        messages.len(),
        items.len(),
        adapter.config().endpoint.encoding
    );

    println!("{}", serde_json::to_string_pretty(&messages)?);

    Ok(())
}
