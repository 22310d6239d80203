// ============================================================
// Layer 4 - Verse Aligner
// ============================================================
// Lines translations up verse by verse.
//
// Only verses present in EVERY translation survive. A verse
// missing from a single translation is dropped rather than
// padded, so every surviving entry has exactly one text per
// translation, in the order the translations were given.
//
// Example:
//   T1 = { 1:1:1 "A", 1:1:2 "B" }
//   T2 = { 1:1:1 "a", 1:1:3 "c" }
//   align([T1, T2]) = { 1:1:1 ["A", "a"] }
//
// An empty result is not an error here. The pipeline checks the
// size and decides what to do.

use crate::domain::verse::{AlignedVerseSet, VerseMap};

/// Intersect the verse sets of all translations.
pub fn align(translations: &[VerseMap]) -> AlignedVerseSet {
    // Walking the smallest map keeps the number of lookups down.
    let Some(smallest) = translations.iter().min_by_key(|t| t.len()) else {
        return AlignedVerseSet::new();
    };

    smallest
        .keys()
        .filter_map(|id| {
            translations
                .iter()
                .map(|t| t.get(id).cloned())
                .collect::<Option<Vec<String>>>()
                .map(|texts| (*id, texts))
        })
        .collect()
}
