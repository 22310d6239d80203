// ============================================================
// Layer 2 - SummaryUseCase
// ============================================================
// Describes the raw corpus before any split is made:
//
//   versions    - every catalog translation and the catalog
//                 books its verse table does not contain
//   genres      - how many books fall in each genre
//   testaments  - how many books are in each testament
//
// Scraped translations are often incomplete, so "missing
// books" is the column worth looking at first.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::{
    catalog_loader::{load_catalog, load_translations},
    loader::{books_in_translation, CsvVerseLoader},
};
use crate::domain::{
    catalog::{testament_name, BookCatalog, Translation},
    traits::VerseSource,
};
use crate::infra::layout::DataLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRow {
    pub id:            u32,
    pub abbreviation:  String,
    pub version:       String,
    pub missing_books: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreRow {
    pub id:    u32,
    pub name:  String,
    pub books: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestamentRow {
    pub label: String,
    pub name:  String,
    pub books: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CorpusSummary {
    pub versions:   Vec<VersionRow>,
    pub genres:     Vec<GenreRow>,
    pub testaments: Vec<TestamentRow>,
}

/// Catalog books absent from a translation, sorted.
pub fn missing_books(catalog: &BookCatalog, present: &BTreeSet<u32>) -> Vec<u32> {
    catalog
        .books()
        .keys()
        .filter(|id| !present.contains(id))
        .copied()
        .collect()
}

/// Book count per genre, ordered by genre id. Genres without books are listed with 0.
pub fn genre_summary(catalog: &BookCatalog) -> Vec<GenreRow> {
    catalog
        .genres()
        .iter()
        .map(|(&id, name)| GenreRow {
            id,
            name:  name.clone(),
            books: catalog.books().values().filter(|b| b.genre_id == id).count(),
        })
        .collect()
}

/// Book count per testament label, ordered by label.
pub fn testament_summary(catalog: &BookCatalog) -> Vec<TestamentRow> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for book in catalog.books().values() {
        *counts.entry(book.testament.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(label, books)| TestamentRow {
            label: label.to_string(),
            name:  testament_name(label).to_string(),
            books,
        })
        .collect()
}

pub struct SummaryUseCase {
    layout: DataLayout,
}

impl SummaryUseCase {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            layout: DataLayout::new(data_dir),
        }
    }

    pub fn execute(&self) -> Result<CorpusSummary> {
        let catalog = load_catalog(&self.layout.book_catalog(), &self.layout.genre_catalog())
            .context("Cannot load the book catalog")?;
        let translations = load_translations(&self.layout.translation_catalog())
            .context("Cannot load the translation catalog")?;

        let source = CsvVerseLoader::new(self.layout.dir());
        summarize(&catalog, &translations, &source)
    }
}

/// Build the summary from an already loaded catalog.
pub fn summarize<S: VerseSource>(
    catalog:      &BookCatalog,
    translations: &[Translation],
    source:       &S,
) -> Result<CorpusSummary> {
    let mut versions = Vec::with_capacity(translations.len());

    for translation in translations {
        let verses = source
            .load_verses(translation)
            .with_context(|| format!("Cannot load verses for '{}'", translation.table))?;

        versions.push(VersionRow {
            id:            translation.id,
            abbreviation:  translation.abbreviation.clone(),
            version:       translation.version.clone(),
            missing_books: missing_books(catalog, &books_in_translation(&verses)),
        });
    }

    Ok(CorpusSummary {
        versions,
        genres:     genre_summary(catalog),
        testaments: testament_summary(catalog),
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Book, DatasetLabel};
    use crate::domain::error::{CorpusError, Result as CorpusResult};
    use crate::domain::verse::{VerseIdentifier, VerseMap};

    fn catalog() -> BookCatalog {
        let book = |name: &str, testament: &str, genre_id| Book {
            name:      name.to_string(),
            testament: testament.to_string(),
            genre_id,
            genre:     String::new(),
            dataset:   DatasetLabel::Train,
        };
        let books = BTreeMap::from([
            (1, book("Genesis", "OT", 1)),
            (2, book("Exodus", "OT", 1)),
            (6, book("Joshua", "OT", 2)),
            (40, book("Matthew", "NT", 5)),
        ]);
        let genres = BTreeMap::from([
            (1, "Law".to_string()),
            (2, "History".to_string()),
            (5, "Gospels".to_string()),
            (8, "Apocalyptic".to_string()),
        ]);
        BookCatalog::new(books, genres)
    }

    struct OnlyBooks(Vec<u32>);

    impl VerseSource for OnlyBooks {
        fn load_verses(&self, translation: &Translation) -> CorpusResult<VerseMap> {
            if translation.table == "t_missing" {
                return Err(CorpusError::UnknownTranslation(translation.table.clone()));
            }
            Ok(self
                .0
                .iter()
                .map(|&b| (VerseIdentifier::new(b, 1, 1), "text".to_string()))
                .collect())
        }
    }

    fn translation(table: &str) -> Translation {
        Translation {
            id:           1,
            table:        table.to_string(),
            abbreviation: "WEB".to_string(),
            language:     "english".to_string(),
            version:      "World English".to_string(),
        }
    }

    #[test]
    fn test_missing_books() {
        let present: BTreeSet<u32> = [1, 6].into_iter().collect();
        assert_eq!(missing_books(&catalog(), &present), vec![2, 40]);
    }

    #[test]
    fn test_genre_summary_counts_books() {
        let rows = genre_summary(&catalog());
        let counts: Vec<(u32, usize)> = rows.iter().map(|r| (r.id, r.books)).collect();
        assert_eq!(counts, vec![(1, 2), (2, 1), (5, 1), (8, 0)]);
    }

    #[test]
    fn test_testament_summary() {
        let rows = testament_summary(&catalog());
        assert_eq!(
            rows,
            vec![
                TestamentRow { label: "NT".into(), name: "New Testament".into(), books: 1 },
                TestamentRow { label: "OT".into(), name: "Old Testament".into(), books: 3 },
            ]
        );
    }

    #[test]
    fn test_summarize_reports_missing_books_per_version() {
        let summary = summarize(&catalog(), &[translation("t_web")], &OnlyBooks(vec![1, 2, 6])).unwrap();
        assert_eq!(summary.versions.len(), 1);
        assert_eq!(summary.versions[0].missing_books, vec![40]);
    }

    #[test]
    fn test_summarize_fails_on_unreadable_translation() {
        let result = summarize(&catalog(), &[translation("t_missing")], &OnlyBooks(vec![]));
        assert!(result.is_err());
    }
}
