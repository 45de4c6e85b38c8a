//! Core types and the identifier assignment engine
//!
//! - Asset: one coin from the ticker feed
//! - AssetFilter: keeps only serious coins
//! - IdentifierMapping: persisted symbol → identifier map
//! - IdentifierAssigner: stable identifier assignment

pub mod asset;
pub mod assign;
pub mod filter;
pub mod mapping;

pub use asset::{Asset, AssignedAsset};
pub use assign::{Assignment, IdentifierAssigner};
pub use filter::{append_curated, AssetFilter, FilterError, FilterReport, Rejected, Rejection};
pub use mapping::{IdentifierMapping, RESERVED_BASE_IDS};
