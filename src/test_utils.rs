//! Test fixtures for feed records

use crate::core::{Asset, AssignedAsset};

/// Coin with the given symbol and 24h volume text
pub fn coin(symbol: &str, volume: &str) -> Asset {
    let mut asset = Asset::new(symbol, format!("{} coin", symbol)).with_volume(volume);
    asset.id = symbol.to_lowercase();
    asset
}

/// A small feed exercising every filter rule
pub fn sample_feed() -> Vec<Asset> {
    vec![
        coin("BTC", "4113620000.0"),
        coin("ETH", "1460000000.0"),
        coin("XYZ", "250000"),
        coin("XYZ", "900000"),
        coin("1ST", "2000000"),
        coin("BTG@", "3000000"),
        coin("DUST", "100000.0"),
        coin("ADA", "58000000"),
        coin("NEW", ""),
    ]
}

/// Assigned coins from `(id, symbol, name)` triples, in the given order
pub fn assigned(entries: &[(u32, &str, &str)]) -> Vec<AssignedAsset> {
    entries
        .iter()
        .map(|(id, symbol, name)| AssignedAsset::new(*id, Asset::new(*symbol, *name)))
        .collect()
}
