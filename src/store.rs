//! Identifier store
//!
//! Loads and saves the symbol → identifier mapping as a flat JSON object.
//! A missing file is the first-run case; anything else that prevents a
//! clean read is fatal, since a partially loaded mapping would hand out
//! identifiers that already belong to someone.

use crate::core::{IdentifierMapping, RESERVED_BASE_IDS};
use crate::infrastructure::fs::write_atomic;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File-backed identifier mapping
pub struct IdentifierStore {
    path: PathBuf,
    reserved: u32,
}

impl IdentifierStore {
    /// Create store for `path` with the default reserved range
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            reserved: RESERVED_BASE_IDS,
        }
    }

    /// Create with a custom size for the reserved low range
    pub fn with_reserved(mut self, reserved: u32) -> Self {
        self.reserved = reserved;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted mapping
    ///
    /// Returns an empty mapping if the file does not exist.
    /// # Errors
    /// Returns `StoreError::Corrupt` if the file is not a JSON object of
    /// non-negative integers, if two symbols share an identifier, or if an
    /// identifier falls inside the reserved range.
    pub fn load(&self) -> Result<IdentifierMapping, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No identifier mapping at {}, starting empty", self.path.display());
                return Ok(IdentifierMapping::new());
            }
            Err(e) => return Err(StoreError::Read(self.path.clone(), e)),
        };

        let mapping: IdentifierMapping = serde_json::from_slice(&bytes)
            .map_err(|e| self.corrupt(e.to_string()))?;
        self.validate(&mapping)?;

        tracing::info!(
            "Loaded {} identifiers from {}",
            mapping.len(),
            self.path.display()
        );
        Ok(mapping)
    }

    /// Replace the persisted mapping with `mapping`
    pub fn save(&self, mapping: &IdentifierMapping) -> Result<(), StoreError> {
        let mut body = serde_json::to_vec_pretty(mapping)
            .map_err(|e| StoreError::Write(self.path.clone(), e.into()))?;
        body.push(b'\n');

        write_atomic(&self.path, &body).map_err(|e| StoreError::Write(self.path.clone(), e))?;

        tracing::info!("Saved {} identifiers to {}", mapping.len(), self.path.display());
        Ok(())
    }

    fn validate(&self, mapping: &IdentifierMapping) -> Result<(), StoreError> {
        let mut owners: HashMap<u32, &str> = HashMap::with_capacity(mapping.len());
        for (symbol, id) in mapping.iter() {
            if id < self.reserved {
                return Err(self.corrupt(format!(
                    "symbol {:?} holds reserved identifier {}",
                    symbol, id
                )));
            }
            if let Some(other) = owners.insert(id, symbol) {
                return Err(self.corrupt(format!(
                    "identifier {} held by both {:?} and {:?}",
                    id, other, symbol
                )));
            }
        }
        Ok(())
    }

    fn corrupt(&self, reason: String) -> StoreError {
        StoreError::Corrupt {
            path: self.path.clone(),
            reason,
        }
    }
}

/// Identifier store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read {}: {}", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Corrupt identifier mapping {}: {}", .path.display(), .reason)]
    Corrupt { path: PathBuf, reason: String },

    #[error("Failed to write {}: {}", .0.display(), .1)]
    Write(PathBuf, #[source] std::io::Error),
}
