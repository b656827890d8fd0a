use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use stockroom_cli::Session;
use stockroom_inventory::{DEFAULT_DATA_PATH, DEFAULT_LOW_ALERT_THRESHOLD, InventoryStore, StoreConfig};
use stockroom_observability::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(about = "Interactive inventory tracker backed by a JSON file")]
#[command(version)]
struct Args {
    /// Inventory data file
    #[arg(long, env = "STOCKROOM_DATA_FILE", default_value = DEFAULT_DATA_PATH)]
    data_file: PathBuf,

    /// Quantity at or below which a product counts as low stock
    #[arg(long, env = "STOCKROOM_LOW_THRESHOLD", default_value_t = DEFAULT_LOW_ALERT_THRESHOLD)]
    low_threshold: u64,

    /// Start with an empty inventory instead of asking to load the data file
    #[arg(long)]
    no_load: bool,

    /// Log format (pretty, json); filtering follows RUST_LOG
    #[arg(long, env = "STOCKROOM_LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    stockroom_observability::init(args.log_format);

    let config = StoreConfig::new(args.data_file).with_low_alert_threshold(args.low_threshold);
    tracing::info!(
        data_file = %config.data_path().display(),
        threshold = config.low_alert_threshold,
        "starting inventory session"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(InventoryStore::new(config), stdin.lock(), stdout.lock())
        .with_load_prompt(!args.no_load);

    session
        .run()
        .context("inventory session ended with an error")?;
    Ok(())
}
