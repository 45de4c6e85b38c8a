//! TypeScript symbol table template

use crate::core::AssignedAsset;
use crate::render::{SymbolTemplate, GENERATED_HEADER};
use std::fmt::{self, Write};

/// Renders `symbols.ts`: an exported array plus an id index
pub struct TypeScriptSymbols;

impl SymbolTemplate for TypeScriptSymbols {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn render(&self, assets: &[AssignedAsset], out: &mut String) -> fmt::Result {
        writeln!(out, "{}", GENERATED_HEADER)?;
        writeln!(out)?;
        writeln!(out, "export interface Coin {{")?;
        writeln!(out, "  id: number;")?;
        writeln!(out, "  symbol: string;")?;
        writeln!(out, "  name: string;")?;
        writeln!(out, "  rank: number | null;")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        writeln!(out, "export const coins: Coin[] = [")?;
        for asset in assets {
            let rank = match asset.asset.rank_number() {
                Some(rank) => rank.to_string(),
                None => "null".to_string(),
            };
            writeln!(
                out,
                "  {{ id: {}, symbol: {}, name: {}, rank: {} }},",
                asset.id,
                js_string(asset.symbol()),
                js_string(asset.name()),
                rank
            )?;
        }
        writeln!(out, "];")?;
        writeln!(out)?;
        writeln!(out, "export const coinsById: {{ [id: number]: Coin }} = {{}};")?;
        writeln!(out, "for (const coin of coins) {{")?;
        writeln!(out, "  coinsById[coin.id] = coin;")?;
        writeln!(out, "}}")?;
        Ok(())
    }
}

/// Double-quoted string literal; JSON escaping is valid TypeScript
fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}
