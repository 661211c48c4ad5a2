use anyhow::Result;
use clap::Parser;
use morning::core::log::init_logging;

/// Refreshes the Notion morning dashboard from environment-supplied data.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = morning::run().await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Dashboard update failed");
    }
    result
}
