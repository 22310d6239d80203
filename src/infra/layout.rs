// ============================================================
// Layer 6 - File Layout
// ============================================================
// Every file name the corpus reads or writes:
//
//   data/
//     t_key.csv               translation catalog
//     key_english.csv         book catalog
//     key_genre_english.csv   genre catalog
//     t_asv.csv, t_bbe.csv    one verse table per translation
//     split/
//       t_asv_training.txt    one verse per line
//       t_asv_validation.txt
//       t_asv_test.txt
//       ...
//       manifest.json         what is in the split directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::partition::Partition;

pub const TRANSLATION_CATALOG: &str = "t_key.csv";
pub const BOOK_CATALOG: &str = "key_english.csv";
pub const GENRE_CATALOG: &str = "key_genre_english.csv";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const SPLIT_EXTENSION: &str = "txt";

/// Verse table of a translation, e.g. `t_asv.csv`.
pub fn table_file_name(table: &str) -> String {
    format!("{table}.csv")
}

/// Split file of one translation in one partition, e.g. `t_asv_training.txt`.
pub fn split_file_name(table: &str, partition: Partition) -> String {
    format!("{table}_{partition}.{SPLIT_EXTENSION}")
}

fn split_stem_pattern() -> &'static Regex {
    static STEM: OnceLock<Regex> = OnceLock::new();
    STEM.get_or_init(|| {
        Regex::new(r"^(.+)_(training|validation|test)$").expect("split file pattern")
    })
}

/// Recover `(table, partition)` from a split file name.
///
/// Table codes may contain underscores themselves; only the last
/// `_<partition>` is taken as the partition.
pub fn parse_split_file_name(file_name: &str) -> Option<(String, Partition)> {
    let stem = file_name.strip_suffix(&format!(".{SPLIT_EXTENSION}"))?;
    let caps = split_stem_pattern().captures(stem)?;
    let partition = caps[2].parse::<Partition>().ok()?;
    Some((caps[1].to_string(), partition))
}

/// Paths of the input tables under one data directory.
#[derive(Debug, Clone)]
pub struct DataLayout {
    dir: PathBuf,
}

impl DataLayout {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn translation_catalog(&self) -> PathBuf {
        self.dir.join(TRANSLATION_CATALOG)
    }

    pub fn book_catalog(&self) -> PathBuf {
        self.dir.join(BOOK_CATALOG)
    }

    pub fn genre_catalog(&self) -> PathBuf {
        self.dir.join(GENRE_CATALOG)
    }
}
