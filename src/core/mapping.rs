//! Symbol → identifier mapping
//!
//! Identifiers handed out in an earlier run are kept forever, so this map is
//! the single source of truth between runs. Keys are ordered so the
//! persisted form is byte-stable.

use crate::core::AssignedAsset;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Number of low identifiers reserved for base currencies outside the feed:
/// 0 = EUR, 1 = USD, 2 = BTC. The engine never hands these out.
pub const RESERVED_BASE_IDS: u32 = 3;

/// Persistent symbol → identifier association
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct IdentifierMapping {
    entries: BTreeMap<String, u32>,
}

impl IdentifierMapping {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, symbol: &str) -> Option<u32> {
        self.entries.get(symbol).copied()
    }

    /// Add or overwrite the entry for `symbol`
    pub fn insert(&mut self, symbol: impl Into<String>, id: u32) {
        self.entries.insert(symbol.into(), id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in symbol order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(s, id)| (s.as_str(), *id))
    }

    /// Every identifier currently held by some symbol
    pub fn identifiers(&self) -> HashSet<u32> {
        self.entries.values().copied().collect()
    }

    /// Drop entries for symbols that are not in `assets`
    pub fn retain_symbols(&mut self, assets: &[AssignedAsset]) {
        let keep: HashSet<&str> = assets.iter().map(AssignedAsset::symbol).collect();
        self.entries.retain(|symbol, _| keep.contains(symbol.as_str()));
    }
}

impl FromIterator<(String, u32)> for IdentifierMapping {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
