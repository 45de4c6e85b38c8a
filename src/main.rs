//! Downloads the coin ticker feed and regenerates the symbol tables
//!
//! # Flow
//! - **rest**: fetch the ticker feed (or read a saved copy)
//! - **core**: filter serious coins, assign stable identifiers
//! - **store**: persist the symbol → identifier mapping
//! - **render**: write symbols.rs / symbols.ts

use std::time::Instant;
use update_coins::infrastructure::{config::Config, init_logging};
use update_coins::pipeline::Pipeline;
use update_coins::rest::{read_tickers, TickerClient};
use update_coins::{log_main, Result};

/// Main application state
pub struct UpdateApp {
    config: Config,
}

impl UpdateApp {
    /// Create new application instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetch, assign and render once
    pub async fn run(&self) -> Result<()> {
        let started = Instant::now();
        tracing::info!("Updating coin symbols...");

        // 1. Fetch the feed (all-or-nothing)
        let raw = match &self.config.feed.file {
            Some(path) => read_tickers(path)?,
            None => TickerClient::from_config(&self.config.feed).fetch().await?,
        };

        // 2. Filter, assign, persist, render
        let summary = Pipeline::new(&self.config).run(raw)?;

        log_main!(
            tracing::Level::INFO,
            "Wrote {} coins ({} new) in {:?}",
            summary.rendered,
            summary.newly_assigned,
            started.elapsed()
        );
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // Guards flush file logs on drop
    let _guards = init_logging(&config.logging)?;

    let app = UpdateApp::new(config);
    if let Err(e) = app.run().await {
        tracing::error!("Update failed: {}", e);
        return Err(e);
    }

    Ok(())
}
