// ============================================================
// Layer 4 - Verse Loader
// ============================================================
// Loads one translation's verse table from the data directory.
//
// A translation whose table code is `t_asv` lives in
// `<data_dir>/t_asv.csv` with (at least) these columns:
//
//   b  book number
//   c  chapter number
//   v  verse number
//   t  verse text
//
// Each load is independent: it reads exactly one file and
// returns a fresh map. Duplicate (b, c, v) rows keep the last
// text seen.
//
// Verse text is flattened to a single line here. The split
// files store one verse per line, so an embedded line break
// would shift every later verse out of alignment.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use csv::ByteRecord;

use crate::data::table::CsvTable;
use crate::domain::catalog::Translation;
use crate::domain::error::Result;
use crate::domain::traits::VerseSource;
use crate::domain::verse::{VerseIdentifier, VerseMap};
use crate::infra::layout::table_file_name;

/// Loads verse tables from a directory of CSV files.
/// Implements the VerseSource trait from Layer 3.
pub struct CsvVerseLoader {
    dir: PathBuf,
}

impl CsvVerseLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn table_path(&self, translation: &Translation) -> PathBuf {
        self.dir.join(table_file_name(&translation.table))
    }
}

impl VerseSource for CsvVerseLoader {
    fn load_verses(&self, translation: &Translation) -> Result<VerseMap> {
        let path   = self.table_path(translation);
        let verses = load_verse_table(&path)?;

        tracing::debug!(
            "Loaded {} verses for {} from '{}'",
            verses.len(),
            translation.table,
            path.display()
        );
        Ok(verses)
    }
}

/// Read a verse table at an explicit path.
pub fn load_verse_table(path: &Path) -> Result<VerseMap> {
    let mut table = CsvTable::open(path)?;

    let book_col    = table.column("b")?;
    let chapter_col = table.column("c")?;
    let verse_col   = table.column("v")?;
    let text_col    = table.column("t")?;

    let mut verses = VerseMap::new();
    let mut record = ByteRecord::new();

    while table.next_record(&mut record)? {
        let id = VerseIdentifier::new(
            table.number(&record, book_col)?,
            table.number(&record, chapter_col)?,
            table.number(&record, verse_col)?,
        );
        let text = single_line(&table.text(&record, text_col)?);
        verses.insert(id, text);
    }

    Ok(verses)
}

/// Replace line breaks (and the whitespace around them) with one space.
fn single_line(text: &str) -> String {
    if !text.contains(['\n', '\r']) {
        return text.to_string();
    }
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sorted book numbers that have at least one verse.
pub fn books_in_translation(verses: &VerseMap) -> BTreeSet<u32> {
    verses.keys().map(|id| id.book).collect()
}
