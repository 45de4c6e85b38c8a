//! Coin symbol table generator
//!
//! Filters the coin ticker feed down to serious coins, assigns each one a
//! stable numeric identifier and renders the result into symbol tables.

pub mod core;
pub mod infrastructure;
pub mod pipeline;
pub mod render;
pub mod rest;
pub mod store;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use infrastructure::config::{Config, FeedConfig, FilterConfig, RegistryConfig};

use thiserror::Error;

/// Main error type for a generator run
///
/// Every variant is fatal: the run stops and the persisted mapping is left
/// as it was before the run.
#[derive(Error, Debug)]
pub enum CoinError {
    #[error("Feed error: {0}")]
    Feed(#[from] rest::FeedError),

    #[error("Filter error: {0}")]
    Filter(#[from] core::FilterError),

    #[error("Identifier store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Render error: {0}")]
    Render(#[from] render::RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] infrastructure::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CoinError>;
