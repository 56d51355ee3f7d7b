//! DNA barcode command-line entry point.
use anyhow::Result;
use clap::Parser;
use dnabar_cli::{cli::Cli, config::AppConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    dnabar_cli::run(cli, config)
}
