// ============================================================
// Layer 4 - Catalog Loader
// ============================================================
// Reads the three reference tables into memory:
//
//   t_key.csv              -> Vec<Translation>
//   key_genre_english.csv  -> genre id -> genre name
//   key_english.csv        -> BookCatalog (genre names resolved)
//
// Any missing file or broken row aborts the load; there is no
// partial catalog.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use csv::ByteRecord;

use crate::data::table::CsvTable;
use crate::domain::catalog::{Book, BookCatalog, DatasetLabel, Translation};
use crate::domain::error::{CorpusError, Result};

/// Read every row of the translation catalog, in file order.
pub fn load_translations(path: &Path) -> Result<Vec<Translation>> {
    let mut table = CsvTable::open(path)?;

    let id_col       = table.column("id")?;
    let table_col    = table.column("table")?;
    let abbr_col     = table.column("abbreviation")?;
    let language_col = table.column("language")?;
    let version_col  = table.column("version")?;

    let mut translations = Vec::new();
    let mut record       = ByteRecord::new();

    while table.next_record(&mut record)? {
        translations.push(Translation {
            id:           table.number(&record, id_col)?,
            table:        table.text(&record, table_col)?.trim().to_string(),
            abbreviation: table.text(&record, abbr_col)?.trim().to_string(),
            language:     table.text(&record, language_col)?.trim().to_string(),
            version:      table.text(&record, version_col)?.trim().to_string(),
        });
    }

    tracing::debug!("Loaded {} translations from '{}'", translations.len(), path.display());
    Ok(translations)
}

/// Genre id -> genre name, e.g. `1 -> "Law"`.
pub fn load_genres(path: &Path) -> Result<BTreeMap<u32, String>> {
    let mut table = CsvTable::open(path)?;

    let genre_col = table.column("g")?;
    let name_col  = table.column("n")?;

    let mut genres = BTreeMap::new();
    let mut record = ByteRecord::new();

    while table.next_record(&mut record)? {
        let id   = table.number(&record, genre_col)?;
        let name = table.text(&record, name_col)?.trim().to_string();
        genres.insert(id, name);
    }

    Ok(genres)
}

/// Build the book catalog, resolving each book's genre name.
pub fn load_books(path: &Path, genres: BTreeMap<u32, String>) -> Result<BookCatalog> {
    let mut table = CsvTable::open(path)?;

    let book_col      = table.column("b")?;
    let name_col      = table.column("n")?;
    let testament_col = table.column("t")?;
    let genre_col     = table.column("g")?;
    let dataset_col   = table.column("dataset")?;

    let mut books  = BTreeMap::new();
    let mut record = ByteRecord::new();

    while table.next_record(&mut record)? {
        let id       = table.number(&record, book_col)?;
        let genre_id = table.number(&record, genre_col)?;

        let genre = genres
            .get(&genre_id)
            .cloned()
            .ok_or(CorpusError::UnknownGenre { book: id, genre: genre_id })?;

        let label   = table.text(&record, dataset_col)?;
        let dataset = DatasetLabel::parse(&label).ok_or_else(|| {
            CorpusError::malformed(
                path,
                format!("book {id}: dataset label must be 'train' or 'test', found '{label}'"),
            )
        })?;

        books.insert(
            id,
            Book {
                name:      table.text(&record, name_col)?.trim().to_string(),
                testament: table.text(&record, testament_col)?.trim().to_string(),
                genre_id,
                genre,
                dataset,
            },
        );
    }

    tracing::debug!("Loaded {} books from '{}'", books.len(), path.display());
    Ok(BookCatalog::new(books, genres))
}

/// Load the genre table, then the book table on top of it.
pub fn load_catalog(books_path: &Path, genres_path: &Path) -> Result<BookCatalog> {
    let genres = load_genres(genres_path)?;
    load_books(books_path, genres)
}

/// Pick catalog rows by table code, keeping catalog order.
///
/// Every requested code must exist in the catalog.
pub fn select_translations(all: &[Translation], tables: &[String]) -> Result<Vec<Translation>> {
    let known: HashSet<&str> = all.iter().map(|t| t.table.as_str()).collect();
    if let Some(unknown) = tables.iter().find(|t| !known.contains(t.as_str())) {
        return Err(CorpusError::UnknownTranslation(unknown.clone()));
    }

    let wanted: HashSet<&str> = tables.iter().map(String::as_str).collect();
    Ok(all
        .iter()
        .filter(|t| wanted.contains(t.table.as_str()))
        .cloned()
        .collect())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const T_KEY: &str = "\
id,table,abbreviation,language,version,info_text,info_url,publisher,copyright,copyright_info
1,t_asv,ASV,english,American Standard-ASV1901,,http://en.wikipedia.org/wiki/American_Standard_Version,,Public Domain,
2,t_bbe,BBE,english,Bible in Basic English,,http://en.wikipedia.org/wiki/Bible_in_Basic_English,,Public Domain,
3,t_dby,DARBY,english,Darby English Bible,,,,Public Domain,
";

    const GENRES: &str = "g,n\n1,Law\n2,History\n";

    const BOOKS: &str = "b,n,t,g,dataset\n1,Genesis,OT,1,test\n2,Exodus,OT,1,train\n6,Joshua,OT,2,train\n";

    fn write(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_translations_ignores_extra_columns() {
        let dir  = TempDir::new().unwrap();
        let path = write(&dir, "t_key.csv", T_KEY);

        let translations = load_translations(&path).unwrap();
        assert_eq!(translations.len(), 3);
        assert_eq!(translations[0].id, 1);
        assert_eq!(translations[0].table, "t_asv");
        assert_eq!(translations[1].abbreviation, "BBE");
        assert_eq!(translations[2].version, "Darby English Bible");
    }

    #[test]
    fn test_load_catalog_resolves_genres() {
        let dir     = TempDir::new().unwrap();
        let genres  = write(&dir, "key_genre_english.csv", GENRES);
        let books   = write(&dir, "key_english.csv", BOOKS);
        let catalog = load_catalog(&books, &genres).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.book(6).unwrap().genre, "History");
        assert_eq!(catalog.book(1).unwrap().dataset, DatasetLabel::Test);
        assert_eq!(catalog.test_book_ids().into_iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_unknown_genre_is_fatal() {
        let dir    = TempDir::new().unwrap();
        let genres = write(&dir, "g.csv", "g,n\n1,Law\n");
        let books  = write(&dir, "b.csv", "b,n,t,g,dataset\n1,Genesis,OT,9,test\n");

        let err = load_catalog(&books, &genres).unwrap_err();
        assert!(matches!(err, CorpusError::UnknownGenre { book: 1, genre: 9 }));
    }

    #[test]
    fn test_bad_dataset_label_is_malformed() {
        let dir    = TempDir::new().unwrap();
        let genres = write(&dir, "g.csv", GENRES);
        let books  = write(&dir, "b.csv", "b,n,t,g,dataset\n1,Genesis,OT,1,holdout\n");

        let err = load_catalog(&books, &genres).unwrap_err();
        assert!(matches!(err, CorpusError::MalformedTable { .. }));
    }

    #[test]
    fn test_missing_catalog_is_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = load_translations(&dir.path().join("t_key.csv")).unwrap_err();
        assert!(matches!(err, CorpusError::MissingSource { .. }));
    }

    #[test]
    fn test_select_translations_keeps_catalog_order() {
        let dir = TempDir::new().unwrap();
        let all = load_translations(&write(&dir, "t_key.csv", T_KEY)).unwrap();

        let picked = select_translations(&all, &["t_dby".to_string(), "t_asv".to_string()]).unwrap();
        let tables: Vec<&str> = picked.iter().map(|t| t.table.as_str()).collect();
        assert_eq!(tables, vec!["t_asv", "t_dby"]);
    }

    #[test]
    fn test_select_unknown_translation_fails() {
        let dir = TempDir::new().unwrap();
        let all = load_translations(&write(&dir, "t_key.csv", T_KEY)).unwrap();

        let err = select_translations(&all, &["t_kjv".to_string()]).unwrap_err();
        assert!(matches!(err, CorpusError::UnknownTranslation(ref t) if t == "t_kjv"));
    }
}
