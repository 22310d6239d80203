// ============================================================
// Layer 3 - Catalog Domain Types
// ============================================================
// Static reference data describing what exists in the corpus:
//
//   Translation  - one row of t_key.csv (a Bible version)
//   Book         - one row of key_english.csv, genre resolved
//   BookCatalog  - every book plus the genre table
//
// The catalog is built once by the catalog loader and then
// passed around by reference. Nothing in here touches disk.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single Bible version as listed in the translation catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Numeric catalog id
    pub id: u32,

    /// Table code, also the verse file stem, e.g. `t_asv`
    pub table: String,

    /// Short code, e.g. `ASV`
    pub abbreviation: String,

    pub language: String,

    /// Display name, e.g. `American Standard`
    pub version: String,
}

/// Which dataset a book is reserved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetLabel {
    Train,
    Test,
}

impl DatasetLabel {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "train" => Some(Self::Train),
            "test" => Some(Self::Test),
            _ => None,
        }
    }
}

impl fmt::Display for DatasetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Train => f.write_str("train"),
            Self::Test => f.write_str("test"),
        }
    }
}

/// Metadata for one book of the Bible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub name: String,

    /// `OT` or `NT` in the reference catalog
    pub testament: String,

    pub genre_id: u32,

    /// Genre name resolved from the genre table
    pub genre: String,

    pub dataset: DatasetLabel,
}

/// Long form of a testament label, falling back to the label itself.
pub fn testament_name(label: &str) -> &str {
    match label {
        "OT" => "Old Testament",
        "NT" => "New Testament",
        other => other,
    }
}

/// Every book keyed by book number, plus the genre table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookCatalog {
    books:  BTreeMap<u32, Book>,
    genres: BTreeMap<u32, String>,
}

impl BookCatalog {
    pub fn new(books: BTreeMap<u32, Book>, genres: BTreeMap<u32, String>) -> Self {
        Self { books, genres }
    }

    pub fn books(&self) -> &BTreeMap<u32, Book> {
        &self.books
    }

    pub fn genres(&self) -> &BTreeMap<u32, String> {
        &self.genres
    }

    pub fn book(&self, id: u32) -> Option<&Book> {
        self.books.get(&id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Book numbers whose every verse belongs to the test partition.
    pub fn test_book_ids(&self) -> BTreeSet<u32> {
        self.books
            .iter()
            .filter(|(_, book)| book.dataset == DatasetLabel::Test)
            .map(|(&id, _)| id)
            .collect()
    }

    /// Lowercased book name to book number, e.g. `"genesis" -> 1`.
    pub fn book_id_by_name(&self) -> HashMap<String, u32> {
        self.books
            .iter()
            .map(|(&id, book)| (book.name.to_lowercase(), id))
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn book(name: &str, dataset: DatasetLabel) -> Book {
        Book {
            name:      name.to_string(),
            testament: "OT".to_string(),
            genre_id:  1,
            genre:     "Law".to_string(),
            dataset,
        }
    }

    #[test]
    fn test_test_book_ids_follow_dataset_label() {
        let mut books = BTreeMap::new();
        books.insert(1, book("Genesis", DatasetLabel::Test));
        books.insert(2, book("Exodus", DatasetLabel::Train));
        books.insert(5, book("Deuteronomy", DatasetLabel::Test));
        let catalog = BookCatalog::new(books, BTreeMap::new());

        let ids: Vec<u32> = catalog.test_book_ids().into_iter().collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[test]
    fn test_book_id_by_name_is_lowercase() {
        let mut books = BTreeMap::new();
        books.insert(1, book("Genesis", DatasetLabel::Test));
        let catalog = BookCatalog::new(books, BTreeMap::new());

        assert_eq!(catalog.book_id_by_name().get("genesis"), Some(&1));
    }

    #[test]
    fn test_dataset_label_parse() {
        assert_eq!(DatasetLabel::parse("test"), Some(DatasetLabel::Test));
        assert_eq!(DatasetLabel::parse(" Train "), Some(DatasetLabel::Train));
        assert_eq!(DatasetLabel::parse("holdout"), None);
    }

    #[test]
    fn test_testament_name() {
        assert_eq!(testament_name("OT"), "Old Testament");
        assert_eq!(testament_name("NT"), "New Testament");
        assert_eq!(testament_name("AP"), "AP");
    }
}
