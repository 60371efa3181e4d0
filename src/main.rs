//! Main entry point for the channel-harvester CLI

use channel_harvester::cli::{init_tracing, Cli};
use clap::Parser;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = cli.execute().await.map_err(|e| anyhow::anyhow!(e));

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
