//! Galleria - headless gallery driver
//!
//! Loads a feed, prints the derived gallery view, and applies user intents
//! typed on stdin.

mod app;
mod console;

use anyhow::{Context, Result};
use clap::Parser;
use gallery_core::{Feed, GalleryConfig, Image, PageSize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "galleria", version, about = "Browse an image feed from the terminal")]
struct Cli {
    /// Configuration file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Feed URL, or a path to a JSON file with an array of images
    #[arg(long)]
    feed: Option<String>,

    /// Results per page: 5, 10, 15 or 20
    #[arg(long)]
    page_size: Option<u32>,

    /// Write the effective configuration back to the config file and exit
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config
    fn apply(&self, config: &mut GalleryConfig) -> Result<()> {
        if let Some(feed) = &self.feed {
            config.feed = feed_from_arg(feed)?;
        }
        if let Some(size) = self.page_size {
            config.results_per_page = PageSize::try_from(size)?;
        }
        Ok(())
    }
}

fn feed_from_arg(arg: &str) -> Result<Feed> {
    if arg.starts_with("http://") || arg.starts_with("https://") {
        return Ok(Feed::Url(arg.to_string()));
    }

    let content = std::fs::read_to_string(arg).with_context(|| format!("reading feed file {}", arg))?;
    let images: Vec<Image> =
        serde_json::from_str(&content).with_context(|| format!("parsing feed file {}", arg))?;
    Ok(Feed::Inline(images))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging and panic hook first
    let _log_guard = gallery_log::init()?;

    // Clean up old logs (7 days)
    if let Err(e) = gallery_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("Galleria starting...");

    let mut config = match &cli.config {
        Some(path) => GalleryConfig::load_from(path)?,
        None => GalleryConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable configuration: {}", e);
            GalleryConfig::default()
        }),
    };
    cli.apply(&mut config)?;

    if cli.save_config {
        match &cli.config {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        return Ok(());
    }

    tracing::info!(
        "Using {} feed, {} per page",
        if config.feed.is_remote() { "remote" } else { "inline" },
        config.results_per_page.get()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run(config))
}
