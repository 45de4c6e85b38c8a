//! REST client for the coin ticker feed

pub mod ticker;

pub use ticker::{parse_tickers, read_tickers, FeedError, TickerClient};
