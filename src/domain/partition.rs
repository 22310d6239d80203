// ============================================================
// Layer 3 - Partition Domain Types
// ============================================================
// After alignment the verses are split three ways:
//
//   training   - used to fit a model
//   validation - random hold-out from the non-test books
//   test       - every verse of the catalog's test books
//
// PartitionedVerses keeps the verse identifiers; ZippedDataset
// is the flattened form written to disk, where the identifiers
// are gone and only position lines translations up.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::verse::AlignedVerseSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Training,
    Validation,
    Test,
}

impl Partition {
    pub const ALL: [Partition; 3] = [Partition::Training, Partition::Validation, Partition::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Training => "training",
            Self::Validation => "validation",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Partition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "training" => Ok(Self::Training),
            "validation" => Ok(Self::Validation),
            "test" => Ok(Self::Test),
            other => Err(format!("unknown partition '{other}'")),
        }
    }
}

/// The aligned verse set split into three disjoint parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedVerses {
    pub training:   AlignedVerseSet,
    pub validation: AlignedVerseSet,
    pub test:       AlignedVerseSet,
}

impl PartitionedVerses {
    pub fn get(&self, partition: Partition) -> &AlignedVerseSet {
        match partition {
            Partition::Training => &self.training,
            Partition::Validation => &self.validation,
            Partition::Test => &self.test,
        }
    }

    pub fn total(&self) -> usize {
        self.training.len() + self.validation.len() + self.test.len()
    }
}

/// Partition -> translation table code -> verse texts.
///
/// Index `i` of every translation's list within one partition
/// refers to the same verse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZippedDataset {
    partitions: BTreeMap<Partition, BTreeMap<String, Vec<String>>>,
}

impl ZippedDataset {
    /// Three partitions, each with no translations.
    pub fn empty() -> Self {
        let partitions = Partition::ALL
            .iter()
            .map(|&p| (p, BTreeMap::new()))
            .collect();
        Self { partitions }
    }

    pub fn insert(&mut self, partition: Partition, table: impl Into<String>, verses: Vec<String>) {
        self.partitions
            .entry(partition)
            .or_default()
            .insert(table.into(), verses);
    }

    pub fn set_partition(&mut self, partition: Partition, by_table: BTreeMap<String, Vec<String>>) {
        self.partitions.insert(partition, by_table);
    }

    pub fn partition(&self, partition: Partition) -> Option<&BTreeMap<String, Vec<String>>> {
        self.partitions.get(&partition)
    }

    pub fn verses(&self, partition: Partition, table: &str) -> Option<&[String]> {
        self.partitions
            .get(&partition)
            .and_then(|by_table| by_table.get(table))
            .map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Partition, &BTreeMap<String, Vec<String>>)> {
        self.partitions.iter()
    }

    /// Number of verses in a partition (every translation has the same count).
    pub fn verse_count(&self, partition: Partition) -> usize {
        self.partitions
            .get(&partition)
            .and_then(|by_table| by_table.values().next())
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        Partition::ALL.iter().all(|&p| self.verse_count(p) == 0)
    }
}
