//! CLI for the APOD desktop-background tool.

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use apod_core::api::ApodClient;
use apod_core::config;
use apod_core::date::ApodDate;
use apod_core::pipeline::{self, PipelineOutcome};
use apod_core::wallpaper::DesktopWallpaper;

/// Fetch NASA's Astronomy Picture of the Day and set it as the desktop
/// background.
#[derive(Debug, Parser)]
#[command(name = "apod")]
#[command(about = "Fetch the Astronomy Picture of the Day and set it as the desktop background", long_about = None)]
pub struct Cli {
    /// Directory in which downloaded images (and the image index) are kept.
    /// Must already exist.
    pub image_dir: PathBuf,

    /// APOD date, format YYYY-MM-DD. Defaults to today.
    pub date: Option<ApodDate>,

    /// Override the configured API key for this invocation.
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,
}

pub async fn run_from_args() -> Result<()> {
    let cli = Cli::parse();

    // Validate inputs before touching the network or creating anything.
    if !cli.image_dir.is_dir() {
        bail!("{} is not an existing directory", cli.image_dir.display());
    }

    let mut cfg = config::load_or_init()?;
    if let Some(key) = cli.api_key {
        cfg.api_key = key;
    }
    tracing::debug!("metadata endpoint: {}", cfg.api_url);

    let date = cli.date.unwrap_or_else(ApodDate::today);
    let client = ApodClient::new(&cfg);
    let outcome = pipeline::run(&cli.image_dir, date, &client, &DesktopWallpaper).await?;
    print_summary(&outcome);
    Ok(())
}

fn print_summary(outcome: &PipelineOutcome) {
    println!("IMAGE INFO");
    println!("==========");
    println!("URL        {}", outcome.image_url);
    println!("LOCAL PATH {}", outcome.path.display());
    println!("SIZE       {} bytes", outcome.size);
    println!("SHA256     {}", outcome.sha256);
    if outcome.newly_stored {
        println!("New image: saved to disk and added to the index.");
    } else {
        println!("Image already in the index; nothing was written.");
    }
}

#[cfg(test)]
mod tests;
