//! Symbol table rendering
//!
//! Templates turn the final, identifier-ordered coin list into source text.
//! They never filter, sort or assign: whatever order they are handed is the
//! order they emit.

pub mod rust;
pub mod typescript;

use crate::core::AssignedAsset;
use crate::infrastructure::write_atomic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub use rust::RustSymbols;
pub use typescript::TypeScriptSymbols;

/// Header line every generated file starts with
pub const GENERATED_HEADER: &str = "// Code generated by update-coins. DO NOT EDIT.";

/// Source template for one kind of artifact
pub trait SymbolTemplate {
    /// Template name used in configuration
    fn name(&self) -> &'static str;

    /// Append the rendered artifact for `assets` to `out`
    fn render(&self, assets: &[AssignedAsset], out: &mut String) -> fmt::Result;
}

/// Named template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Rust,
    TypeScript,
}

impl Template {
    pub fn name(&self) -> &'static str {
        match self {
            Template::Rust => RustSymbols.name(),
            Template::TypeScript => TypeScriptSymbols.name(),
        }
    }

    /// Render `assets` to text
    pub fn render(&self, assets: &[AssignedAsset]) -> Result<String, RenderError> {
        let mut out = String::with_capacity(64 * assets.len() + 512);
        let result = match self {
            Template::Rust => RustSymbols.render(assets, &mut out),
            Template::TypeScript => TypeScriptSymbols.render(assets, &mut out),
        };
        result.map_err(|_| RenderError::Format(self.name()))?;
        Ok(out)
    }

    /// Render `assets` and replace `destination` with the result
    pub fn render_to(&self, assets: &[AssignedAsset], destination: &Path) -> Result<(), RenderError> {
        let text = self.render(assets)?;
        write_atomic(destination, text.as_bytes()).map_err(|source| RenderError::Write {
            destination: destination.to_path_buf(),
            source,
        })?;
        tracing::info!(
            "Rendered {} coins with {} template to {}",
            assets.len(),
            self.name(),
            destination.display()
        );
        Ok(())
    }
}

/// Render errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template {0} failed to format")]
    Format(&'static str),

    #[error("Failed to write {}: {}", .destination.display(), .source)]
    Write {
        destination: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assigned;

    #[test]
    fn test_template_names() {
        assert_eq!(Template::Rust.name(), "rust");
        assert_eq!(Template::TypeScript.name(), "typescript");
    }

    #[test]
    fn test_render_is_deterministic() {
        let assets = assigned(&[(3, "ADA", "Cardano"), (4, "ETH", "Ethereum")]);
        for template in [Template::Rust, Template::TypeScript] {
            let first = template.render(&assets).unwrap();
            assert_eq!(first, template.render(&assets).unwrap());
            assert!(first.starts_with(GENERATED_HEADER));
        }
    }

    #[test]
    fn test_render_to_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("market/src/symbols.rs");
        let assets = assigned(&[(3, "ADA", "Cardano")]);
        Template::Rust.render_to(&assets, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, Template::Rust.render(&assets).unwrap());
    }

    #[test]
    fn test_render_to_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        // A file where a directory is expected
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let err = Template::TypeScript
            .render_to(&assigned(&[(3, "ADA", "Cardano")]), &blocker.join("symbols.ts"))
            .unwrap_err();
        assert!(matches!(err, RenderError::Write { .. }));
    }
}
