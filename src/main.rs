use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tokenclone::cli::Cli;
use tokenclone::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_source) = Config::load(cli.config.as_deref())?;

    let log_level = cli
        .log_level
        .as_ref()
        .unwrap_or(&config.logging.level)
        .clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    config_source.log();

    tracing::debug!("Starting tokenclone v{}", env!("CARGO_PKG_VERSION"));

    // Required flags are checked before any key or network access
    let inputs = match cli.inputs() {
        Ok(inputs) => inputs,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = tokenclone::pipeline::run(&inputs, &config).await {
        tracing::error!(error = %e, "Clone failed");
        std::process::exit(1);
    }

    println!("Repository cloned successfully");
    Ok(())
}
