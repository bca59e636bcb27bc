//! Keyshelf CLI entry point.

use clap::Parser;
use keyshelf_cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `keyshelf get` output stays clean.
    let default_filter = match cli.verbose {
        0 => "keyshelf=info",
        1 => "keyshelf=debug,tower_http=debug",
        _ => "keyshelf=trace,tower_http=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(cli).await
}
