// ============================================================
// Layer 2 - InspectUseCase
// ============================================================
// Loads a split directory written by `split` and reports what
// is in it: verse counts per partition and translation, and
// optionally how many aligned verses differ between two
// translations (close revisions often share most wording).

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::data::zipper::unique_verse_pairs;
use crate::domain::partition::{Partition, ZippedDataset};
use crate::infra::split_store::SplitStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionCounts {
    pub partition:    Partition,
    /// (translation table code, verse count), ordered by table code
    pub translations: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub partition: Partition,
    pub total:     usize,
    pub differing: usize,
}

#[derive(Debug, Clone)]
pub struct InspectReport {
    pub dataset:     ZippedDataset,
    pub counts:      Vec<PartitionCounts>,
    pub comparisons: Vec<Comparison>,
}

pub struct InspectUseCase {
    store: SplitStore,
}

impl InspectUseCase {
    pub fn new(split_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: SplitStore::new(split_dir),
        }
    }

    /// Load the split; `compare` names two table codes to diff.
    pub fn execute(&self, compare: Option<(&str, &str)>) -> Result<InspectReport> {
        let dataset = self
            .store
            .load()
            .with_context(|| format!("Cannot load split from '{}'", self.store.dir().display()))?;

        let counts = partition_counts(&dataset);
        let comparisons = match compare {
            Some((first, second)) => compare_translations(&dataset, first, second)?,
            None => Vec::new(),
        };

        Ok(InspectReport {
            dataset,
            counts,
            comparisons,
        })
    }
}

pub fn partition_counts(dataset: &ZippedDataset) -> Vec<PartitionCounts> {
    dataset
        .iter()
        .map(|(&partition, by_table)| PartitionCounts {
            partition,
            translations: by_table
                .iter()
                .map(|(table, verses)| (table.clone(), verses.len()))
                .collect(),
        })
        .collect()
}

/// Per partition, how many aligned verse pairs are not identical.
pub fn compare_translations(dataset: &ZippedDataset, first: &str, second: &str) -> Result<Vec<Comparison>> {
    let mut out = Vec::new();
    for (&partition, by_table) in dataset.iter() {
        let (Some(a), Some(b)) = (by_table.get(first), by_table.get(second)) else {
            if by_table.is_empty() {
                continue;
            }
            bail!("Partition '{partition}' has no '{first}' or no '{second}' translation");
        };
        out.push(Comparison {
            partition,
            total:     a.len().min(b.len()),
            differing: unique_verse_pairs(a, b).len(),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dataset() -> ZippedDataset {
        let mut d = ZippedDataset::empty();
        d.insert(Partition::Training, "t_asv", vec!["same".into(), "a".into(), "b".into()]);
        d.insert(Partition::Training, "t_web", vec!["same".into(), "A".into(), "b".into()]);
        d.insert(Partition::Test, "t_asv", vec!["x".into()]);
        d.insert(Partition::Test, "t_web", vec!["y".into()]);
        d
    }

    #[test]
    fn test_partition_counts() {
        let counts = partition_counts(&dataset());
        let training = counts.iter().find(|c| c.partition == Partition::Training).unwrap();
        assert_eq!(
            training.translations,
            vec![("t_asv".to_string(), 3), ("t_web".to_string(), 3)]
        );
    }

    #[test]
    fn test_compare_skips_empty_partitions() {
        let comparisons = compare_translations(&dataset(), "t_asv", "t_web").unwrap();
        assert_eq!(
            comparisons,
            vec![
                Comparison { partition: Partition::Training, total: 3, differing: 1 },
                Comparison { partition: Partition::Test, total: 1, differing: 1 },
            ]
        );
    }

    #[test]
    fn test_compare_unknown_translation_fails() {
        assert!(compare_translations(&dataset(), "t_asv", "t_kjv").is_err());
    }

    #[test]
    fn test_execute_loads_written_split() {
        let dir = TempDir::new().unwrap();
        SplitStore::new(dir.path()).write(&dataset(), None).unwrap();

        let report = InspectUseCase::new(dir.path())
            .execute(Some(("t_asv", "t_web")))
            .unwrap();
        assert_eq!(report.dataset, dataset());
        assert_eq!(report.comparisons.len(), 2);
    }
}
