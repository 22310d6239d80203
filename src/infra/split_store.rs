// ============================================================
// Layer 6 - Split Store
// ============================================================
// Persists a ZippedDataset as flat text files and reads it back.
//
// What gets written per run:
//   1. <table>_<partition>.txt - verse texts joined by '\n'
//   2. manifest.json           - every file with its partition,
//                                translation and verse count,
//                                plus the config of the run
//
// Writing removes the whole directory first, so nothing from a
// previous run survives.
//
// Loading prefers the manifest. Directories written before the
// manifest existed are still readable: every `*.txt` file whose
// name matches `<table>_<partition>.txt` is picked up.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::split_use_case::CorpusConfig;
use crate::domain::error::{CorpusError, Result};
use crate::domain::partition::{Partition, ZippedDataset};
use crate::infra::layout::{parse_split_file_name, split_file_name, MANIFEST_FILE, SPLIT_EXTENSION};

const MANIFEST_FORMAT: u32 = 1;

/// One split file as recorded in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub partition:   Partition,
    pub translation: String,
    pub file:        String,
    pub verses:      usize,
}

/// Index of a split directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitManifest {
    pub format:  u32,
    pub entries: Vec<ManifestEntry>,

    /// Config the split was created with, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<CorpusConfig>,
}

/// Reads and writes one split directory.
pub struct SplitStore {
    dir: PathBuf,
}

impl SplitStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn exists(&self) -> bool {
        self.dir.exists()
    }

    /// Replace the directory with the contents of `dataset`.
    pub fn write(&self, dataset: &ZippedDataset, config: Option<&CorpusConfig>) -> Result<SplitManifest> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir).map_err(|e| {
                CorpusError::io(format!("cannot remove '{}'", self.dir.display()), e)
            })?;
        }
        fs::create_dir_all(&self.dir)
            .map_err(|e| CorpusError::io(format!("cannot create '{}'", self.dir.display()), e))?;

        let mut entries = Vec::new();
        for (&partition, by_table) in dataset.iter() {
            for (table, verses) in by_table {
                let file = split_file_name(table, partition);
                let path = self.dir.join(&file);

                fs::write(&path, verses.join("\n"))
                    .map_err(|e| CorpusError::io(format!("cannot write '{}'", path.display()), e))?;

                entries.push(ManifestEntry {
                    partition,
                    translation: table.clone(),
                    file,
                    verses: verses.len(),
                });
            }
        }

        let manifest = SplitManifest {
            format: MANIFEST_FORMAT,
            entries,
            config: config.cloned(),
        };
        self.write_manifest(&manifest)?;

        tracing::info!(
            "Wrote {} split files to '{}'",
            manifest.entries.len(),
            self.dir.display()
        );
        Ok(manifest)
    }

    /// Read the directory back into a dataset.
    pub fn load(&self) -> Result<ZippedDataset> {
        if !self.dir.is_dir() {
            return Err(CorpusError::MissingSource {
                path:   self.dir.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "split directory not found"),
            });
        }

        match self.read_manifest()? {
            Some(manifest) => self.load_from_manifest(&manifest),
            None => self.load_from_file_names(),
        }
    }

    /// The manifest, if this directory has one.
    pub fn read_manifest(&self) -> Result<Option<SplitManifest>> {
        let path = self.dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(|source| CorpusError::MissingSource {
            path: path.clone(),
            source,
        })?;
        let manifest = serde_json::from_str(&json)
            .map_err(|e| CorpusError::CorruptSplit(format!("{}: {e}", path.display())))?;
        Ok(Some(manifest))
    }

    fn write_manifest(&self, manifest: &SplitManifest) -> Result<()> {
        let path = self.dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(manifest)
            .map_err(|e| CorpusError::CorruptSplit(format!("cannot encode manifest: {e}")))?;
        fs::write(&path, json)
            .map_err(|e| CorpusError::io(format!("cannot write '{}'", path.display()), e))
    }

    fn load_from_manifest(&self, manifest: &SplitManifest) -> Result<ZippedDataset> {
        let mut dataset = ZippedDataset::empty();

        for entry in &manifest.entries {
            let content = self.read_split_file(&entry.file)?;

            // n verses joined by '\n' split back into n pieces, except that
            // zero verses and one empty verse are both written as ""
            let verses: Vec<String> = if content.is_empty() && entry.verses == 0 {
                Vec::new()
            } else {
                content.split('\n').map(str::to_string).collect()
            };

            if verses.len() != entry.verses {
                return Err(CorpusError::CorruptSplit(format!(
                    "'{}' holds {} verses, manifest says {}",
                    entry.file,
                    verses.len(),
                    entry.verses
                )));
            }

            dataset.insert(entry.partition, entry.translation.clone(), verses);
        }

        tracing::debug!("Loaded {} split files via manifest", manifest.entries.len());
        Ok(dataset)
    }

    fn load_from_file_names(&self) -> Result<ZippedDataset> {
        let mut dataset = ZippedDataset::empty();
        let mut loaded  = 0usize;

        let entries = fs::read_dir(&self.dir)
            .map_err(|e| CorpusError::io(format!("cannot read '{}'", self.dir.display()), e))?;

        for entry in entries {
            let entry = entry
                .map_err(|e| CorpusError::io(format!("cannot read '{}'", self.dir.display()), e))?;
            let path  = entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some(SPLIT_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some((table, partition)) = parse_split_file_name(name) else {
                tracing::warn!("Skipping '{}': not a <table>_<partition>.txt file", path.display());
                continue;
            };

            let content = self.read_split_file(name)?;
            let verses  = content.lines().map(str::to_string).collect();
            dataset.insert(partition, table, verses);
            loaded += 1;
        }

        tracing::debug!("Loaded {} split files by file name", loaded);
        Ok(dataset)
    }

    fn read_split_file(&self, file: &str) -> Result<String> {
        let path = self.dir.join(file);
        fs::read_to_string(&path).map_err(|source| CorpusError::MissingSource { path, source })
    }
}
