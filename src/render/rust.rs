//! Rust symbol table template

use crate::core::AssignedAsset;
use crate::render::{SymbolTemplate, GENERATED_HEADER};
use std::fmt::{self, Write};

/// Renders `symbols.rs`: a const table ordered by identifier plus lookups
pub struct RustSymbols;

impl SymbolTemplate for RustSymbols {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn render(&self, assets: &[AssignedAsset], out: &mut String) -> fmt::Result {
        writeln!(out, "{}", GENERATED_HEADER)?;
        writeln!(out)?;
        writeln!(out, "/// Coin known to the market")?;
        writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
        writeln!(out, "pub struct Coin {{")?;
        writeln!(out, "    pub id: u32,")?;
        writeln!(out, "    pub symbol: &'static str,")?;
        writeln!(out, "    pub name: &'static str,")?;
        writeln!(out, "    /// Market-cap rank at generation time")?;
        writeln!(out, "    pub rank: Option<u32>,")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        writeln!(out, "/// Coins ordered by identifier")?;
        writeln!(out, "pub const COINS: &[Coin] = &[")?;
        for asset in assets {
            // Debug formatting of str yields a valid, escaped Rust literal
            writeln!(
                out,
                "    Coin {{ id: {}, symbol: {:?}, name: {:?}, rank: {:?} }},",
                asset.id,
                asset.symbol(),
                asset.name(),
                asset.asset.rank_number()
            )?;
        }
        writeln!(out, "];")?;
        writeln!(out)?;
        writeln!(out, "/// Look up a coin by identifier")?;
        writeln!(out, "pub fn by_id(id: u32) -> Option<&'static Coin> {{")?;
        writeln!(out, "    COINS.binary_search_by_key(&id, |c| c.id).ok().map(|i| &COINS[i])")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        writeln!(out, "/// Look up a coin by symbol")?;
        writeln!(out, "pub fn by_symbol(symbol: &str) -> Option<&'static Coin> {{")?;
        writeln!(out, "    COINS.iter().find(|c| c.symbol == symbol)")?;
        writeln!(out, "}}")?;
        Ok(())
    }
}
