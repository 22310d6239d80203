// ============================================================
// Layer 4 - Training / Validation / Test Splitter
// ============================================================
// Splits the aligned verses in two steps:
//
//   1. Test split (deterministic)
//      Every verse whose book the catalog labels `test` goes to
//      the test partition. No randomness is involved.
//
//   2. Training / validation split (random)
//      From the remaining verses, floor(N * training_fraction)
//      identifiers are sampled without replacement for training.
//      The rest is validation.
//
// The random source is always passed in, so a seeded StdRng
// gives the same split on every run.
//
// Reference: rand crate documentation (rand::seq::index::sample)

use std::collections::{BTreeSet, HashSet};

use rand::Rng;

use crate::domain::catalog::BookCatalog;
use crate::domain::error::{CorpusError, Result};
use crate::domain::partition::PartitionedVerses;
use crate::domain::verse::{AlignedVerseSet, VerseIdentifier};

/// Reject fractions outside [0, 1] (NaN included).
pub fn validate_fraction(training_fraction: f64) -> Result<()> {
    if (0.0..=1.0).contains(&training_fraction) {
        Ok(())
    } else {
        Err(CorpusError::InvalidFraction(training_fraction))
    }
}

/// Number of training verses drawn from `total` candidates.
pub fn training_size(total: usize, training_fraction: f64) -> usize {
    ((total as f64) * training_fraction).floor() as usize
}

/// Move every verse of a test book out of `verses`.
///
/// Returns `(non_test, test)`.
pub fn split_test(
    verses:        AlignedVerseSet,
    test_book_ids: &BTreeSet<u32>,
) -> (AlignedVerseSet, AlignedVerseSet) {
    verses
        .into_iter()
        .partition(|(id, _)| !test_book_ids.contains(&id.book))
}

/// Randomly sample the training verses; the rest is validation.
///
/// Returns `(training, validation)`.
pub fn split_validation<R>(
    verses:            AlignedVerseSet,
    training_fraction: f64,
    rng:               &mut R,
) -> Result<(AlignedVerseSet, AlignedVerseSet)>
where
    R: Rng + ?Sized,
{
    validate_fraction(training_fraction)?;

    let total    = verses.len();
    let n_train  = training_size(total, training_fraction).min(total);
    let ids: Vec<VerseIdentifier> = verses.keys().copied().collect();

    let training_ids: HashSet<VerseIdentifier> = rand::seq::index::sample(rng, total, n_train)
        .into_iter()
        .map(|i| ids[i])
        .collect();

    let (training, validation): (AlignedVerseSet, AlignedVerseSet) = verses
        .into_iter()
        .partition(|(id, _)| training_ids.contains(id));

    tracing::debug!(
        "Validation split: {} training, {} validation ({}% / {}%)",
        training.len(),
        validation.len(),
        (training.len()   * 100) / total.max(1),
        (validation.len() * 100) / total.max(1),
    );

    Ok((training, validation))
}

/// Full split: test books first, then a random training/validation split.
pub fn partition<R>(
    verses:            AlignedVerseSet,
    catalog:           &BookCatalog,
    training_fraction: f64,
    rng:               &mut R,
) -> Result<PartitionedVerses>
where
    R: Rng + ?Sized,
{
    validate_fraction(training_fraction)?;

    let (non_test, test)       = split_test(verses, &catalog.test_book_ids());
    let (training, validation) = split_validation(non_test, training_fraction, rng)?;

    Ok(PartitionedVerses {
        training,
        validation,
        test,
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Book, DatasetLabel};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    fn verses(books: &[u32], per_book: u32) -> AlignedVerseSet {
        let mut out = AlignedVerseSet::new();
        for &b in books {
            for v in 1..=per_book {
                let id = VerseIdentifier::new(b, 1, v);
                out.insert(id, vec![format!("A {id}"), format!("B {id}")]);
            }
        }
        out
    }

    fn catalog(test_books: &[u32], all_books: &[u32]) -> BookCatalog {
        let books = all_books
            .iter()
            .map(|&b| {
                let dataset = if test_books.contains(&b) {
                    DatasetLabel::Test
                } else {
                    DatasetLabel::Train
                };
                let book = Book {
                    name:      format!("Book {b}"),
                    testament: "OT".to_string(),
                    genre_id:  1,
                    genre:     "Law".to_string(),
                    dataset,
                };
                (b, book)
            })
            .collect::<BTreeMap<_, _>>();
        BookCatalog::new(books, BTreeMap::new())
    }

    #[test]
    fn test_fraction_bounds() {
        assert!(validate_fraction(0.0).is_ok());
        assert!(validate_fraction(1.0).is_ok());
        assert!(validate_fraction(0.7).is_ok());
        assert!(matches!(validate_fraction(-0.1), Err(CorpusError::InvalidFraction(_))));
        assert!(matches!(validate_fraction(1.01), Err(CorpusError::InvalidFraction(_))));
        assert!(validate_fraction(f64::NAN).is_err());
    }

    #[test]
    fn test_test_split_is_by_book() {
        let input = verses(&[1, 2], 5);
        let test_books: BTreeSet<u32> = [1].into_iter().collect();

        let (non_test, test) = split_test(input, &test_books);
        assert_eq!(test.len(), 5);
        assert!(test.keys().all(|id| id.book == 1));
        assert_eq!(non_test.len(), 5);
        assert!(non_test.keys().all(|id| id.book == 2));
    }

    #[test]
    fn test_test_split_is_deterministic() {
        let test_books: BTreeSet<u32> = [2, 4].into_iter().collect();
        let (_, first)  = split_test(verses(&[1, 2, 3, 4], 3), &test_books);
        let (_, second) = split_test(verses(&[1, 2, 3, 4], 3), &test_books);
        assert_eq!(first, second);
    }

    #[test]
    fn test_training_size_follows_fraction() {
        for fraction in [0.0, 0.5, 0.7, 1.0] {
            let mut rng = StdRng::seed_from_u64(7);
            let input   = verses(&[2, 3], 10);
            let n       = input.len();

            let (training, validation) = split_validation(input, fraction, &mut rng).unwrap();
            assert_eq!(training.len(), ((n as f64) * fraction).floor() as usize);
            assert_eq!(training.len() + validation.len(), n);
        }
    }

    #[test]
    fn test_boundary_fractions() {
        let mut rng = StdRng::seed_from_u64(1);

        let (training, validation) = split_validation(verses(&[2], 4), 0.0, &mut rng).unwrap();
        assert!(training.is_empty());
        assert_eq!(validation.len(), 4);

        let (training, validation) = split_validation(verses(&[2], 4), 1.0, &mut rng).unwrap();
        assert_eq!(training.len(), 4);
        assert!(validation.is_empty());
    }

    #[test]
    fn test_same_seed_same_split() {
        let (a, _) = split_validation(verses(&[2, 3], 20), 0.5, &mut StdRng::seed_from_u64(42)).unwrap();
        let (b, _) = split_validation(verses(&[2, 3], 20), 0.5, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let input   = verses(&[1, 2, 3], 8);
        let catalog = catalog(&[1], &[1, 2, 3]);
        let mut rng = StdRng::seed_from_u64(3);

        let parts = partition(input.clone(), &catalog, 0.7, &mut rng).unwrap();

        assert_eq!(parts.total(), input.len());
        for id in input.keys() {
            let hits = [&parts.training, &parts.validation, &parts.test]
                .iter()
                .filter(|set| set.contains_key(id))
                .count();
            assert_eq!(hits, 1, "{id} must be in exactly one partition");
        }

        assert!(parts.test.keys().all(|id| id.book == 1));
        assert_eq!(parts.test.len(), 8);
        assert_eq!(parts.training.len(), 11);
        assert!(parts.training.keys().chain(parts.validation.keys()).all(|id| id.book != 1));
    }

    #[test]
    fn test_partition_rejects_bad_fraction() {
        let catalog = catalog(&[1], &[1, 2]);
        let mut rng = StdRng::seed_from_u64(0);
        let err = partition(verses(&[1, 2], 2), &catalog, 1.5, &mut rng).unwrap_err();
        assert!(matches!(err, CorpusError::InvalidFraction(f) if f == 1.5));
    }
}
