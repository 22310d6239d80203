// ============================================================
// Layer 4 - Verse Zipper
// ============================================================
// Turns verse-keyed partitions into translation-keyed lists:
//
//   { 1:1:1 -> [asv, bbe], 1:1:2 -> [asv, bbe] }
//       becomes
//   { t_asv -> [asv 1:1:1, asv 1:1:2],
//     t_bbe -> [bbe 1:1:1, bbe 1:1:2] }
//
// Position i of every translation's list is the same verse.
// When shuffling, ONE permutation is drawn per partition and
// applied to all translations together; shuffling each list on
// its own would break that alignment.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::partition::{Partition, PartitionedVerses, ZippedDataset};
use crate::domain::verse::AlignedVerseSet;

/// Flatten one partition into per-translation text lists.
///
/// `tables` are the translation table codes, in the same order as
/// the texts inside each aligned entry. Every table gets a list,
/// even if the partition is empty.
pub fn zip_verses<R>(
    tables:  &[String],
    verses:  &AlignedVerseSet,
    shuffle: bool,
    rng:     &mut R,
) -> BTreeMap<String, Vec<String>>
where
    R: Rng + ?Sized,
{
    let mut rows: Vec<&Vec<String>> = verses.values().collect();
    if shuffle {
        rows.shuffle(rng);
    }

    let mut by_table: Vec<Vec<String>> = vec![Vec::with_capacity(rows.len()); tables.len()];
    for texts in rows {
        for (column, text) in by_table.iter_mut().zip(texts) {
            column.push(text.clone());
        }
    }

    tables.iter().cloned().zip(by_table).collect()
}

/// Zip all three partitions, drawing a fresh permutation for each.
pub fn zip_partitions<R>(
    tables:      &[String],
    partitioned: &PartitionedVerses,
    shuffle:     bool,
    rng:         &mut R,
) -> ZippedDataset
where
    R: Rng + ?Sized,
{
    let mut dataset = ZippedDataset::empty();
    for partition in Partition::ALL {
        let zipped = zip_verses(tables, partitioned.get(partition), shuffle, rng);
        dataset.set_partition(partition, zipped);
    }
    dataset
}

/// Aligned text pairs from two translations, with identical pairs removed.
///
/// Useful for versions that share most of their wording.
pub fn unique_verse_pairs(first: &[String], second: &[String]) -> Vec<(String, String)> {
    first
        .iter()
        .zip(second)
        .filter(|(a, b)| a != b)
        .map(|(a, b)| (a.clone(), b.clone()))
        .collect()
}
