//! Coin records as delivered by the ticker feed
//!
//! Decimal fields stay as opaque text: nothing downstream does arithmetic on
//! prices or supplies, and the renderers copy them through verbatim.

use serde::{Deserialize, Serialize};

/// One coin from the ticker feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Asset {
    /// Feed slug, e.g. "bitcoin"
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub price_btc: Option<String>,
    #[serde(default, rename = "24h_volume_usd")]
    pub volume_24h_usd: Option<String>,
    #[serde(default)]
    pub market_cap_usd: Option<String>,
    #[serde(default)]
    pub available_supply: Option<String>,
    #[serde(default)]
    pub total_supply: Option<String>,
    #[serde(default)]
    pub percent_change_1h: Option<String>,
    #[serde(default)]
    pub percent_change_24h: Option<String>,
    #[serde(default)]
    pub percent_change_7d: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Asset {
    /// Create an asset with only a symbol and a display name
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the 24h USD volume text
    pub fn with_volume(mut self, volume: impl Into<String>) -> Self {
        self.volume_24h_usd = Some(volume.into());
        self
    }

    /// Market-cap rank, `None` when missing or not a whole number
    pub fn rank_number(&self) -> Option<u32> {
        self.rank.trim().parse().ok()
    }

    /// 24h volume text, `None` when the feed left it null or empty
    #[inline]
    pub fn volume_text(&self) -> Option<&str> {
        self.volume_24h_usd
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// An asset carrying its final identifier
///
/// Built by the assignment engine once the identifier is final for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedAsset {
    pub id: u32,
    pub asset: Asset,
}

impl AssignedAsset {
    pub(crate) fn new(id: u32, asset: Asset) -> Self {
        Self { id, asset }
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.asset.symbol
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.asset.name
    }
}
