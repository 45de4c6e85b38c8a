//! Generator pipeline
//!
//! filter → curated additions → load mapping → assign → save mapping → render.
//! Runs once, sequentially. The mapping is written only after assignment
//! has completed in memory, so a failure before that point leaves the
//! previous mapping untouched.

use crate::core::{append_curated, Asset, AssetFilter, AssignedAsset, IdentifierAssigner};
use crate::infrastructure::config::{Config, TargetConfig};
use crate::store::IdentifierStore;
use crate::Result;

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Records in the raw feed
    pub fetched: usize,
    /// Records that passed the filter
    pub accepted: usize,
    /// Records the filter rejected
    pub rejected: usize,
    /// Symbols that received a new identifier
    pub newly_assigned: usize,
    /// Coins handed to the renderers
    pub rendered: usize,
    /// Entries in the saved mapping
    pub mapped: usize,
}

/// Pipeline from raw feed to generated artifacts
pub struct Pipeline {
    filter: AssetFilter,
    curated: Vec<Asset>,
    assigner: IdentifierAssigner,
    store: IdentifierStore,
    retain_dropped: bool,
    targets: Vec<TargetConfig>,
}

impl Pipeline {
    /// Build the pipeline from configuration
    pub fn new(config: &Config) -> Self {
        let reserved = config.registry.reserved_ids;
        Self {
            filter: AssetFilter::with_min_volume(config.filter.min_volume_24h)
                .with_separator(config.filter.separator),
            curated: config.filter.curated_assets(),
            assigner: IdentifierAssigner::with_reserved(reserved),
            store: IdentifierStore::new(config.registry.mapping_path.clone()).with_reserved(reserved),
            retain_dropped: config.registry.retain_dropped,
            targets: config.targets.clone(),
        }
    }

    /// Assign identifiers without rendering
    ///
    /// Persists the updated mapping and returns the identifier-ordered coins.
    pub fn assign(&self, raw: Vec<Asset>) -> Result<(Vec<AssignedAsset>, RunSummary)> {
        let fetched = raw.len();

        let report = self.filter.filter(raw)?;
        let (accepted, rejected) = (report.accepted.len(), report.rejected.len());
        let assets = append_curated(report.accepted, &self.curated);

        let loaded = self.store.load()?;
        let mut assignment = self.assigner.assign(assets, loaded);
        if !self.retain_dropped {
            assignment.mapping.retain_symbols(&assignment.assets);
        }

        self.store.save(&assignment.mapping)?;

        let summary = RunSummary {
            fetched,
            accepted,
            rejected,
            newly_assigned: assignment.newly_assigned,
            rendered: assignment.assets.len(),
            mapped: assignment.mapping.len(),
        };
        Ok((assignment.assets, summary))
    }

    /// Run the whole pipeline on a fetched feed
    pub fn run(&self, raw: Vec<Asset>) -> Result<RunSummary> {
        let (assets, summary) = self.assign(raw)?;

        for target in &self.targets {
            target.template.render_to(&assets, &target.destination)?;
        }

        tracing::info!(
            "Run complete: {} fetched, {} accepted, {} rejected, {} new, {} rendered",
            summary.fetched,
            summary.accepted,
            summary.rejected,
            summary.newly_assigned,
            summary.rendered
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::IdentifierMapping;
    use crate::render::Template;
    use crate::test_utils::{coin, sample_feed};
    use crate::CoinError;
    use std::path::Path;

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.registry.mapping_path = dir.join("coins.json");
        config.targets = vec![
            TargetConfig {
                template: Template::Rust,
                destination: dir.join("market/src/symbols.rs"),
            },
            TargetConfig {
                template: Template::TypeScript,
                destination: dir.join("market-ts/src/symbols.ts"),
            },
        ];
        config
    }

    #[test]
    fn test_sample_feed_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let summary = Pipeline::new(&config).run(sample_feed()).unwrap();

        assert_eq!(summary.fetched, 9);
        // BTC, ETH, ADA survive
        assert_eq!(summary.accepted, 3);
        assert_eq!(summary.rejected, 6);
        // plus NZDT
        assert_eq!(summary.rendered, 4);
        assert_eq!(summary.newly_assigned, 4);

        let saved = IdentifierStore::new(&config.registry.mapping_path).load().unwrap();
        let expected: IdentifierMapping = [
            ("ADA".to_string(), 3),
            ("BTC".to_string(), 4),
            ("ETH".to_string(), 5),
            ("NZDT".to_string(), 6),
        ]
        .into_iter()
        .collect();
        assert_eq!(saved, expected);

        assert!(dir.path().join("market/src/symbols.rs").exists());
        assert!(dir.path().join("market-ts/src/symbols.ts").exists());
    }

    #[test]
    fn test_malformed_volume_leaves_mapping_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.registry.mapping_path, r#"{"ADA":3}"#).unwrap();

        let raw = vec![coin("ADA", "9000000"), coin("BAD", "n/a")];
        let err = Pipeline::new(&config).run(raw).unwrap_err();
        assert!(matches!(err, CoinError::Filter(_)));

        let text = std::fs::read_to_string(&config.registry.mapping_path).unwrap();
        assert_eq!(text, r#"{"ADA":3}"#);
        assert!(!dir.path().join("market/src/symbols.rs").exists());
    }

    #[test]
    fn test_corrupt_mapping_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.registry.mapping_path, "not json").unwrap();

        let err = Pipeline::new(&config).run(sample_feed()).unwrap_err();
        assert!(matches!(err, CoinError::Store(_)));
    }

    #[test]
    fn test_prune_dropped_symbols() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.registry.retain_dropped = false;
        std::fs::write(&config.registry.mapping_path, r#"{"GONE":3,"ADA":4}"#).unwrap();

        let (assets, summary) = Pipeline::new(&config)
            .assign(vec![coin("ADA", "9000000")])
            .unwrap();
        assert_eq!(summary.mapped, 2);

        let saved = IdentifierStore::new(&config.registry.mapping_path).load().unwrap();
        assert_eq!(saved.get("GONE"), None);
        assert_eq!(saved.get("ADA"), Some(4));
        // NZDT still skipped 3 since GONE held it when assigning
        assert_eq!(assets.iter().find(|a| a.symbol() == "NZDT").map(|a| a.id), Some(5));
    }
}
