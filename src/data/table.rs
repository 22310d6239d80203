// ============================================================
// Layer 4 - CSV Table Reader
// ============================================================
// Every input of the corpus is a CSV file with a header row:
//
//   t_key.csv              id,table,abbreviation,language,version,...
//   key_english.csv        b,n,t,g,dataset
//   key_genre_english.csv  g,n
//   t_<version>.csv        id,b,c,v,t
//
// Columns are looked up by header name, never by position, so
// extra or reordered columns do not matter.
//
// The reference verse tables are Latin-1 encoded while the
// catalogs are plain ASCII. Records are read as raw bytes and
// decoded field by field: valid UTF-8 is kept as is, anything
// else is treated as Latin-1 (each byte is its own code point).

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, Reader, ReaderBuilder};

use crate::domain::error::{CorpusError, Result};

/// An open CSV table positioned after its header row.
pub struct CsvTable {
    path:    PathBuf,
    headers: Vec<String>,
    reader:  Reader<File>,
}

impl CsvTable {
    /// Open a table and read its header row.
    ///
    /// A missing file is a `MissingSource` error, a file without a
    /// readable header row is a `MalformedTable` error.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| CorpusError::MissingSource {
            path: path.to_path_buf(),
            source,
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = reader
            .byte_headers()
            .map_err(|e| CorpusError::malformed(path, e.to_string()))?
            .iter()
            .map(|h| decode_field(h).trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            reader,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Position of a named column in every record.
    pub fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CorpusError::malformed(&self.path, format!("missing column '{name}'")))
    }

    /// Read the next record into `record`. Returns false at end of file.
    pub fn next_record(&mut self, record: &mut ByteRecord) -> Result<bool> {
        self.reader
            .read_byte_record(record)
            .map_err(|e| CorpusError::malformed(&self.path, e.to_string()))
    }

    /// Decoded text of one field.
    pub fn text(&self, record: &ByteRecord, column: usize) -> Result<String> {
        record
            .get(column)
            .map(decode_field)
            .ok_or_else(|| self.short_row(record, column))
    }

    /// One field parsed as an unsigned number.
    pub fn number(&self, record: &ByteRecord, column: usize) -> Result<u32> {
        let raw = self.text(record, column)?;
        raw.trim().parse::<u32>().map_err(|_| {
            CorpusError::malformed(
                &self.path,
                format!("line {}: expected a number, found '{}'", line_of(record), raw),
            )
        })
    }

    fn short_row(&self, record: &ByteRecord, column: usize) -> CorpusError {
        CorpusError::malformed(
            &self.path,
            format!(
                "line {}: row has {} fields, column {} is missing",
                line_of(record),
                record.len(),
                column
            ),
        )
    }
}

fn line_of(record: &ByteRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

/// UTF-8 where possible, Latin-1 otherwise.
pub fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}
