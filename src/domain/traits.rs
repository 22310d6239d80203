// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The pipeline is written against these two traits, not the
// concrete CSV loader or the concrete filters:
//
//   VerseSource - anything that can produce one translation's
//                 verses (CSV tables today, an in-memory map
//                 in tests)
//   VerseFilter - one preprocessing stage over aligned verses
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::catalog::Translation;
use crate::domain::error::Result;
use crate::domain::verse::{AlignedVerseSet, VerseMap};

// ─── VerseSource ──────────────────────────────────────────────────────────────
/// Loads the full verse table of one translation.
///
/// Implementations:
///   - CsvVerseLoader -> reads `<data_dir>/<table>.csv`
pub trait VerseSource {
    fn load_verses(&self, translation: &Translation) -> Result<VerseMap>;
}

// ─── VerseFilter ──────────────────────────────────────────────────────────────
/// A preprocessing stage applied to the aligned verse set before
/// it is partitioned. Filters either drop verse identifiers or
/// rewrite texts; they never add identifiers.
pub trait VerseFilter {
    fn apply(&self, verses: AlignedVerseSet) -> AlignedVerseSet;

    /// Label used in log output.
    fn describe(&self) -> String {
        "custom filter".to_string()
    }
}

/// Any plain function or closure over the verse set is a filter.
impl<F> VerseFilter for F
where
    F: Fn(AlignedVerseSet) -> AlignedVerseSet,
{
    fn apply(&self, verses: AlignedVerseSet) -> AlignedVerseSet {
        self(verses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::verse::VerseIdentifier;

    #[test]
    fn test_closure_is_a_filter() {
        let drop_book_one = |verses: AlignedVerseSet| -> AlignedVerseSet {
            verses.into_iter().filter(|(id, _)| id.book != 1).collect()
        };

        let mut verses = AlignedVerseSet::new();
        verses.insert(VerseIdentifier::new(1, 1, 1), vec!["a".into()]);
        verses.insert(VerseIdentifier::new(2, 1, 1), vec!["b".into()]);

        let out = drop_book_one.apply(verses);
        assert_eq!(out.len(), 1);
        assert!(out.contains_key(&VerseIdentifier::new(2, 1, 1)));
        assert_eq!(drop_book_one.describe(), "custom filter");
    }
}
