// ============================================================
// Layer 2 - SplitUseCase
// ============================================================
// Orchestrates the full dataset split in order:
//
//   Step 1: Validate the training fraction       (Layer 4 - data)
//   Step 2: Load translation and book catalogs   (Layer 4 - data)
//   Step 3: Load each selected translation       (Layer 4 - data)
//   Step 4: Align shared verses                  (Layer 4 - data)
//   Step 5: Run preprocessing filters            (Layer 4 - data)
//   Step 6: Split test / training / validation   (Layer 4 - data)
//   Step 7: Zip partitions per translation       (Layer 4 - data)
//   Step 8: Persist the split directory          (Layer 6 - infra)
//
// An empty alignment or an empty filter result is not an error:
// the run stops early with three empty partitions and the
// reason attached to the report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::{
    aligner::align,
    catalog_loader::{load_catalog, load_translations, select_translations},
    loader::CsvVerseLoader,
    preprocessor::{build_filters, run_filters, FilterSpec},
    splitter::{partition, validate_fraction},
    zipper::zip_partitions,
};
use crate::domain::{
    catalog::{BookCatalog, Translation},
    error::CorpusError,
    partition::{Partition, ZippedDataset},
    traits::VerseSource,
    verse::VerseMap,
};
use crate::infra::{layout::DataLayout, split_store::SplitStore, timing::timed};

// ─── Split Configuration ─────────────────────────────────────────────────────
// Everything a split run needs. Serialisable so the split
// directory's manifest records how it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Directory with t_key.csv, the book catalogs and verse tables
    pub data_dir: String,

    /// Split directory, replaced on every write
    pub output_dir: String,

    /// Table codes to use; empty means the first `default_translation_count`
    pub translations: Vec<String>,

    pub default_translation_count: usize,

    /// Share of non-test verses that go to training, in [0, 1]
    pub training_fraction: f64,

    pub shuffle: bool,

    pub write_files: bool,

    /// Seed for sampling and shuffling; None draws from OS entropy
    pub seed: Option<u64>,

    /// Preprocessing stages, applied in this order
    pub filters: Vec<FilterSpec>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            data_dir:                  "data".to_string(),
            output_dir:                "data/split".to_string(),
            translations:              Vec::new(),
            default_translation_count: 7,
            training_fraction:         0.7,
            shuffle:                   true,
            write_files:               true,
            seed:                      None,
            filters:                   Vec::new(),
        }
    }
}

// ─── Split Report ────────────────────────────────────────────────────────────
/// Verse totals after each stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SplitCounts {
    pub shared:        usize,
    pub after_filters: usize,
    pub training:      usize,
    pub validation:    usize,
    pub test:          usize,
}

#[derive(Debug)]
pub struct SplitReport {
    pub translations: Vec<Translation>,
    pub dataset:      ZippedDataset,
    pub counts:       SplitCounts,

    /// Why the dataset is empty, for runs that stopped early
    pub diagnostic:   Option<CorpusError>,

    /// Where the split was written, if it was
    pub written_to:   Option<PathBuf>,
}

impl SplitReport {
    fn stopped(translations: Vec<Translation>, counts: SplitCounts, reason: CorpusError) -> Self {
        tracing::warn!("{}", reason);
        Self {
            translations,
            dataset: ZippedDataset::empty(),
            counts,
            diagnostic: Some(reason),
            written_to: None,
        }
    }
}

// ─── SplitUseCase ─────────────────────────────────────────────────────────────
pub struct SplitUseCase {
    config: CorpusConfig,
}

impl SplitUseCase {
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Run the split against the CSV tables in `data_dir`.
    pub fn execute<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SplitReport> {
        let cfg = &self.config;

        // ── Step 1: Reject a bad fraction before touching any file ───────────
        validate_fraction(cfg.training_fraction)?;

        // ── Step 2: Catalogs ──────────────────────────────────────────────────
        let layout  = DataLayout::new(&cfg.data_dir);
        let catalog = load_catalog(&layout.book_catalog(), &layout.genre_catalog())
            .context("Cannot load the book catalog")?;
        let all = load_translations(&layout.translation_catalog())
            .context("Cannot load the translation catalog")?;

        let translations = self.resolve_translations(&all)?;
        tracing::info!(
            "Using {} translations: {}",
            translations.len(),
            translations.iter().map(|t| t.table.as_str()).collect::<Vec<_>>().join(", ")
        );

        let source = CsvVerseLoader::new(layout.dir());
        self.run(&translations, &catalog, &source, rng)
    }

    /// Explicit table codes, or the first N rows of the catalog.
    fn resolve_translations(&self, all: &[Translation]) -> Result<Vec<Translation>> {
        if self.config.translations.is_empty() {
            return Ok(all
                .iter()
                .take(self.config.default_translation_count)
                .cloned()
                .collect());
        }
        Ok(select_translations(all, &self.config.translations)?)
    }

    /// The pipeline proper, independent of where verses come from.
    pub fn run<S, R>(
        &self,
        translations: &[Translation],
        catalog:      &BookCatalog,
        source:       &S,
        rng:          &mut R,
    ) -> Result<SplitReport>
    where
        S: VerseSource,
        R: Rng + ?Sized,
    {
        let cfg = &self.config;
        validate_fraction(cfg.training_fraction)?;
        let filters = build_filters(&cfg.filters)?;

        // ── Step 3: Load every translation ────────────────────────────────────
        let verse_maps: Vec<VerseMap> = translations
            .iter()
            .map(|t| {
                source
                    .load_verses(t)
                    .with_context(|| format!("Cannot load verses for '{}'", t.table))
            })
            .collect::<Result<_>>()?;

        // ── Step 4: Align ─────────────────────────────────────────────────────
        let shared = timed(
            &format!("Finding shared verses between {} translations", translations.len()),
            || align(&verse_maps),
        );
        drop(verse_maps);

        let mut counts = SplitCounts {
            shared: shared.len(),
            ..SplitCounts::default()
        };
        if shared.is_empty() {
            let reason = CorpusError::EmptyAlignment { translations: translations.len() };
            return Ok(SplitReport::stopped(translations.to_vec(), counts, reason));
        }

        // ── Step 5: Preprocess ────────────────────────────────────────────────
        let filtered = if filters.is_empty() {
            shared
        } else {
            timed("Running preprocessing filters", || run_filters(shared, &filters))
        };
        counts.after_filters = filtered.len();

        if filtered.is_empty() {
            let reason = CorpusError::EmptyAfterFilter { before: counts.shared };
            return Ok(SplitReport::stopped(translations.to_vec(), counts, reason));
        }
        if !filters.is_empty() {
            tracing::info!(
                "Verses before preprocessing: {:>7}, after: {:>7} ({:.0}%)",
                counts.shared,
                counts.after_filters,
                percent(counts.after_filters, counts.shared)
            );
        }

        // ── Step 6: Partition ─────────────────────────────────────────────────
        let partitioned = timed("Separating test and validation verses", || {
            partition(filtered, catalog, cfg.training_fraction, &mut *rng)
        })?;
        counts.training   = partitioned.training.len();
        counts.validation = partitioned.validation.len();
        counts.test       = partitioned.test.len();

        // ── Step 7: Zip ───────────────────────────────────────────────────────
        let tables: Vec<String> = translations.iter().map(|t| t.table.clone()).collect();
        let dataset = timed(&format!("Zipping verses (shuffle = {})", cfg.shuffle), || {
            zip_partitions(&tables, &partitioned, cfg.shuffle, &mut *rng)
        });

        // ── Step 8: Persist ───────────────────────────────────────────────────
        let written_to = if cfg.write_files {
            let store = SplitStore::new(&cfg.output_dir);
            timed("Storing datasets to files", || store.write(&dataset, Some(cfg)))
                .with_context(|| format!("Cannot write split to '{}'", cfg.output_dir))?;
            Some(store.dir().to_path_buf())
        } else {
            None
        };

        log_counts(&counts);

        Ok(SplitReport {
            translations: translations.to_vec(),
            dataset,
            counts,
            diagnostic: None,
            written_to,
        })
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

fn log_counts(counts: &SplitCounts) {
    let total = counts.after_filters;
    for (partition, n) in [
        (Partition::Training, counts.training),
        (Partition::Validation, counts.validation),
        (Partition::Test, counts.test),
    ] {
        tracing::info!("{:<11} verses: {:>7} ({:.0}%)", partition, n, percent(n, total));
    }
}
