//! Stable identifier assignment
//!
//! Coins already present in the loaded mapping keep their identifier no
//! matter what. New coins start from their position in symbol order (shifted
//! past the reserved base currencies) and probe upward until they find an
//! identifier nobody holds.
//!
//! Pure computation: no I/O, no errors.

use crate::core::{Asset, AssignedAsset, IdentifierMapping, RESERVED_BASE_IDS};
use std::collections::HashSet;

/// Result of one assignment pass
#[derive(Debug, Clone)]
pub struct Assignment {
    /// Coins ordered by identifier, ready for rendering
    pub assets: Vec<AssignedAsset>,
    /// Loaded mapping extended with every assignment of this run
    pub mapping: IdentifierMapping,
    /// Number of symbols that received a fresh identifier
    pub newly_assigned: usize,
}

/// Identifier assignment engine
#[derive(Debug, Clone, Copy)]
pub struct IdentifierAssigner {
    reserved: u32,
}

impl IdentifierAssigner {
    pub fn new() -> Self {
        Self {
            reserved: RESERVED_BASE_IDS,
        }
    }

    /// Create with a custom size for the reserved low range
    pub fn with_reserved(reserved: u32) -> Self {
        Self { reserved }
    }

    pub fn reserved(&self) -> u32 {
        self.reserved
    }

    /// Assign final identifiers to `assets`
    ///
    /// Every identifier in `mapping` counts as taken from the start, including
    /// those of symbols missing from this run, so a fresh symbol can never
    /// collide with a mapped one.
    pub fn assign(&self, mut assets: Vec<Asset>, mut mapping: IdentifierMapping) -> Assignment {
        assets.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        let mut taken: HashSet<u32> = mapping.identifiers();
        let mut assigned = Vec::with_capacity(assets.len());
        let mut newly_assigned = 0;

        for (position, asset) in assets.into_iter().enumerate() {
            let id = match mapping.get(&asset.symbol) {
                Some(id) => id,
                None => {
                    let candidate = self.candidate(position);
                    let id = next_free(candidate, self.reserved, &taken);
                    tracing::debug!(
                        "New symbol {:?} assigned {} (candidate {})",
                        asset.symbol,
                        id,
                        candidate
                    );
                    newly_assigned += 1;
                    id
                }
            };

            taken.insert(id);
            mapping.insert(asset.symbol.clone(), id);
            assigned.push(AssignedAsset::new(id, asset));
        }

        assigned.sort_by_key(|a| a.id);

        tracing::info!(
            "Assigned {} identifiers ({} new, mapping holds {})",
            assigned.len(),
            newly_assigned,
            mapping.len()
        );

        Assignment {
            assets: assigned,
            mapping,
            newly_assigned,
        }
    }

    /// Sort position shifted past the reserved range
    #[inline]
    fn candidate(&self, position: usize) -> u32 {
        let position = u32::try_from(position).unwrap_or(u32::MAX);
        position.saturating_add(self.reserved)
    }
}

impl Default for IdentifierAssigner {
    fn default() -> Self {
        Self::new()
    }
}

/// First identifier at or above `candidate` that is not taken
///
/// A stored `u32::MAX` is valid, so the scan wraps to `floor` instead of
/// overflowing. Every identifier from `floor` up being taken would need
/// billions of mapped symbols; `candidate` is returned in that case.
#[inline]
fn next_free(candidate: u32, floor: u32, taken: &HashSet<u32>) -> u32 {
    (candidate..=u32::MAX)
        .chain(floor..candidate)
        .find(|id| !taken.contains(id))
        .unwrap_or(candidate)
}
