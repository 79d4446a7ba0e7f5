mod auth;
mod cli;
mod config;
mod error;
mod model;
mod retry;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use config::Config;
use model::{DownloadRequest, ModelDownloader};
use std::path::Path;

fn load_env_file(explicit: Option<&Path>) -> anyhow::Result<()> {
    match explicit {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load environment file {:?}", path))?;
            tracing::debug!("Loaded environment from {:?}", path);
        }
        None => match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e).context("Failed to load .env"),
        },
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    load_env_file(cli.env_file.as_deref())?;

    let mut config = Config::from_env().context("Failed to load configuration")?;
    config.apply_cli(&cli);

    let downloader = ModelDownloader::new(&config)?;
    let request = DownloadRequest::new(cli.repo_id, config.save_path.clone(), config.retries)?
        .with_revision(cli.revision);

    let model_path = downloader.download(&request)?;
    println!("Model downloaded to: {}", model_path.display());

    Ok(())
}
