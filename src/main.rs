// src/main.rs
use clap::Parser;

use seo_optimizer::config::Cli;
use seo_optimizer::lifecycle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    lifecycle::init_logging();

    let command = cli.command();
    lifecycle::run(command, cli.settings).await
}
