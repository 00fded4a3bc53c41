//! CLI entry point for the addproject tool.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use addproject_core::config::{IngestConfig, load_default_file_config};
use addproject_core::{ConfigStore, HttpMetadataSource, Ingestor};

mod cli;

use cli::{Args, USAGE};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let Some((product, url)) = args.target() else {
        eprintln!("{USAGE}");
        return Ok(());
    };

    info!(product, "Product");
    info!(url, "Project");

    let loaded = load_default_file_config()?;
    if let Some(path) = loaded.config.as_ref().and(loaded.path.as_ref()) {
        debug!(path = %path.display(), "Loaded config file");
    }
    let config = IngestConfig::resolve(args.settings(), loaded.config.as_ref());
    debug!(config_dir = %config.config_dir.display(), endpoints = ?config.endpoints, "Resolved configuration");

    let metadata = HttpMetadataSource::new(&config.endpoints)
        .context("Failed to initialize HTTP client")?;
    let ingestor = Ingestor::new(ConfigStore::new(&config.config_dir), Box::new(metadata));

    let outcome = ingestor
        .ingest(product, url, args.id.as_deref(), &args.override_object())
        .await?;

    println!("{}", outcome.path.display());
    Ok(())
}
