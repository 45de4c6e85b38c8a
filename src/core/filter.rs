//! Serious-coin filter
//!
//! Drops coins that are illiquid, carry a malformed symbol or share their
//! symbol with another liquid coin. Rejections are logged and never stop the
//! run; only a volume field that is not a number does.

use crate::core::Asset;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Minimum 24h volume in USD; a coin must trade strictly more than this
pub const DEFAULT_MIN_VOLUME: u32 = 100_000;

/// Separator the feed appends to disambiguate clashing symbols ("BTG@...")
pub const DEFAULT_SEPARATOR: char = '@';

/// Symbol of the hand-curated coin that is always present
pub const CURATED_SYMBOL: &str = "NZDT";

/// Why a record was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Volume missing, empty or not above the threshold
    LowVolume { volume: Option<String> },
    /// Symbol contains the feed's collision separator
    ReservedSeparator,
    /// Symbol is empty or does not start with a letter
    NonAlphabeticStart,
    /// Symbol appears on more than one liquid record
    DuplicateSymbol,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::LowVolume { volume: Some(v) } => write!(f, "too low volume ({})", v),
            Rejection::LowVolume { volume: None } => write!(f, "no volume"),
            Rejection::ReservedSeparator => write!(f, "symbol contains separator"),
            Rejection::NonAlphabeticStart => write!(f, "symbol does not start with a letter"),
            Rejection::DuplicateSymbol => write!(f, "doubled symbol"),
        }
    }
}

/// A rejected record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub symbol: String,
    pub rejection: Rejection,
}

/// Filter result: accepted coins in feed order plus every rejection
#[derive(Debug, Clone, Default)]
pub struct FilterReport {
    pub accepted: Vec<Asset>,
    pub rejected: Vec<Rejected>,
}

/// Coin filter
pub struct AssetFilter {
    min_volume: Decimal,
    separator: char,
}

impl AssetFilter {
    /// Create filter with default threshold and separator
    pub fn new() -> Self {
        Self {
            min_volume: Decimal::from(DEFAULT_MIN_VOLUME),
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Create with custom minimum volume
    pub fn with_min_volume(min_volume: Decimal) -> Self {
        let mut filter = Self::new();
        filter.min_volume = min_volume;
        filter
    }

    /// Create with custom separator
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn min_volume(&self) -> Decimal {
        self.min_volume
    }

    /// Apply liquidity, symbol-shape and duplicate rules
    ///
    /// Duplicates are counted over liquid records only, so an illiquid twin
    /// does not knock out a liquid coin with the same symbol.
    ///
    /// # Errors
    /// Returns `FilterError::MalformedVolume` if any record has a non-empty
    /// volume that is not a number.
    pub fn filter(&self, raw: Vec<Asset>) -> Result<FilterReport, FilterError> {
        let liquid = raw
            .iter()
            .map(|asset| self.is_liquid(asset))
            .collect::<Result<Vec<bool>, FilterError>>()?;

        let verdicts: Vec<Option<Rejection>> = {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for (asset, _) in raw.iter().zip(&liquid).filter(|(_, liquid)| **liquid) {
                *counts.entry(asset.symbol.as_str()).or_default() += 1;
            }
            raw.iter()
                .zip(&liquid)
                .map(|(asset, &liquid)| self.verdict(asset, liquid, &counts))
                .collect()
        };

        let mut report = FilterReport::default();
        for (mut asset, verdict) in raw.into_iter().zip(verdicts) {
            match verdict {
                None => {
                    asset.name = asset.name.trim().to_string();
                    report.accepted.push(asset);
                }
                Some(rejection) => {
                    crate::log_filter!(
                        tracing::Level::WARN,
                        symbol = %asset.symbol,
                        "Rejected {:?}: {}",
                        asset.symbol,
                        rejection
                    );
                    report.rejected.push(Rejected {
                        symbol: asset.symbol,
                        rejection,
                    });
                }
            }
        }

        tracing::info!(
            "Filtered to {} serious coins ({} rejected, volume > {})",
            report.accepted.len(),
            report.rejected.len(),
            self.min_volume
        );

        Ok(report)
    }

    fn verdict(&self, asset: &Asset, liquid: bool, counts: &HashMap<&str, usize>) -> Option<Rejection> {
        if !liquid {
            return Some(Rejection::LowVolume {
                volume: asset.volume_text().map(str::to_string),
            });
        }
        if asset.symbol.contains(self.separator) {
            return Some(Rejection::ReservedSeparator);
        }
        if !asset.symbol.chars().next().is_some_and(char::is_alphabetic) {
            return Some(Rejection::NonAlphabeticStart);
        }
        if counts.get(asset.symbol.as_str()).copied().unwrap_or(0) > 1 {
            return Some(Rejection::DuplicateSymbol);
        }
        None
    }

    /// Volume strictly above the threshold; missing volume is illiquid
    fn is_liquid(&self, asset: &Asset) -> Result<bool, FilterError> {
        let Some(text) = asset.volume_text() else {
            return Ok(false);
        };
        exceeds(text, self.min_volume).ok_or_else(|| FilterError::MalformedVolume {
            symbol: asset.symbol.clone(),
            value: text.to_string(),
        })
    }
}

impl Default for AssetFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare volume text in plain ("123.45") or scientific ("1.2e5") notation
/// against `threshold`; `None` when the text is not a number
///
/// Exact decimal comparison where the value fits a `Decimal`. Numbers
/// outside its range ("1e30", "1e-400") are compared as finite `f64`.
fn exceeds(text: &str, threshold: Decimal) -> Option<bool> {
    if let Ok(volume) = Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
        return Some(volume > threshold);
    }
    let volume = text.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(volume > threshold.to_f64().unwrap_or(f64::MAX))
}

/// Append hand-curated coins after filtering
///
/// Each curated symbol ends up exactly once: a feed record with the same
/// symbol is replaced by the curated one.
pub fn append_curated(mut assets: Vec<Asset>, curated: &[Asset]) -> Vec<Asset> {
    let mut seen = std::collections::HashSet::new();
    let curated: Vec<&Asset> = curated
        .iter()
        .filter(|c| seen.insert(c.symbol.as_str()))
        .collect();

    assets.retain(|asset| !seen.contains(asset.symbol.as_str()));
    for asset in curated {
        let mut asset = asset.clone();
        asset.name = asset.name.trim().to_string();
        tracing::debug!("Adding curated coin {:?}", asset.symbol);
        assets.push(asset);
    }
    assets
}

/// Filter errors
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Malformed 24h volume {value:?} for symbol {symbol:?}")]
    MalformedVolume { symbol: String, value: String },
}
