//! Product API service binary.
//!
//! Opens the database, installs the admission gate in front of the product
//! routes, serves until interrupted, then drains under the configured grace
//! period and exits.

use std::path::PathBuf;

use clap::Parser;

use product_api::config::{loader, validation, AppConfig};
use product_api::lifecycle::{App, Shutdown};
use product_api::observability;

/// Product catalog HTTP service with bounded admission and graceful shutdown.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the configuration file.
    #[arg(long)]
    bind: Option<String>,

    /// The duration in seconds for which the server gracefully waits for
    /// existing connections to finish.
    #[arg(long, value_name = "SECS")]
    graceful_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::logging::init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => AppConfig::default(),
    };
    loader::apply_env(&mut config);
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(secs) = cli.graceful_timeout {
        config.shutdown.grace_secs = secs;
    }

    if let Err(errors) = validation::validate_config(&config) {
        for error in &errors {
            tracing::error!(%error, "invalid configuration");
        }
        return Err("configuration validation failed".into());
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_concurrent = %config.admission.max_concurrent,
        grace_secs = config.shutdown.grace_secs,
        database = %config.database.path,
        "configuration loaded"
    );

    let app = App::initialize(config).await?;
    app.run(Shutdown::new()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
