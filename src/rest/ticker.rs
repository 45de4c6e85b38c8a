//! Ticker feed retrieval
//!
//! One GET per run against the ticker endpoint. The feed is all-or-nothing:
//! any network, HTTP or decode failure aborts the run. No retries.

use crate::core::Asset;
use crate::infrastructure::config::FeedConfig;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Ticker feed client
pub struct TickerClient {
    client: reqwest::Client,
    url: Url,
}

impl TickerClient {
    /// Create client for `url` with a request timeout
    pub fn new(url: Url, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .user_agent("update-coins/0.1")
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            url,
        }
    }

    /// Create from feed configuration
    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.url.clone(), Duration::from_secs(config.timeout_secs))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch every coin the feed lists, in feed order
    pub async fn fetch(&self) -> Result<Vec<Asset>, FeedError> {
        tracing::info!("Fetching tickers from {}", self.url);

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::Http(response.status().as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let assets = parse_tickers(&body)?;
        tracing::info!("Received {} tickers", assets.len());

        Ok(assets)
    }
}

/// Decode a ticker feed body
pub fn parse_tickers(body: &[u8]) -> Result<Vec<Asset>, FeedError> {
    serde_json::from_slice(body).map_err(|e| FeedError::Parse(e.to_string()))
}

/// Read a previously saved ticker feed from disk
pub fn read_tickers(path: &Path) -> Result<Vec<Asset>, FeedError> {
    tracing::info!("Reading tickers from {}", path.display());
    let body = std::fs::read(path).map_err(|e| FeedError::File(e.to_string()))?;
    parse_tickers(&body)
}

/// Feed errors
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Http(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Feed file error: {0}")]
    File(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TickerClient::from_config(&FeedConfig::default());
        assert_eq!(client.url().path(), "/v1/ticker/");
        assert_eq!(client.url().query(), Some("limit=10000"));
    }

    #[test]
    fn test_parse_tickers() {
        let body = br#"[
            {"id":"bitcoin","name":"Bitcoin","symbol":"BTC","rank":"1","24h_volume_usd":"4113620000.0"},
            {"id":"ethereum","name":"Ethereum","symbol":"ETH","rank":"2","24h_volume_usd":null}
        ]"#;
        let assets = parse_tickers(body).unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].symbol, "BTC");
        assert_eq!(assets[1].volume_24h_usd, None);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_tickers(br#"{"error":"rate limited"}"#).unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_missing_symbol() {
        assert!(parse_tickers(br#"[{"name":"Nameless"}]"#).is_err());
    }

    #[test]
    fn test_read_tickers_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.json");
        std::fs::write(&path, r#"[{"symbol":"ADA","name":"Cardano"}]"#).unwrap();
        let assets = read_tickers(&path).unwrap();
        assert_eq!(assets[0].name, "Cardano");

        let missing = read_tickers(&dir.path().join("absent.json"));
        assert!(matches!(missing, Err(FeedError::File(_))));
    }
}
