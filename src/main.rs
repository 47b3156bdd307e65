//! ReadHero - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;

use readhero::app;
use readhero::cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter())
        .with_target(false)
        .init();

    app::run(args).await
}
