// ============================================================
// Layer 3 - Corpus Errors
// ============================================================
// Two kinds of failure exist in the pipeline:
//
//   soft  - the run produced no verses (nothing shared between
//           translations, or filters removed everything). The
//           pipeline logs a warning and returns empty partitions.
//   fatal - a source table is missing or broken, or an argument
//           is out of range. The run stops immediately.
//
// The application layer wraps these in anyhow for context,
// the same way it wraps every other error.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    // ── Soft: reported, never propagated as Err by the pipeline ──────────────
    #[error("there were no shared verses between the {translations} given translations")]
    EmptyAlignment { translations: usize },

    #[error("no verses matched the preprocessing criteria ({before} verses before filtering)")]
    EmptyAfterFilter { before: usize },

    // ── Fatal: bad input ─────────────────────────────────────────────────────
    #[error("cannot open '{}'", path.display())]
    MissingSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table '{}': {message}", path.display())]
    MalformedTable { path: PathBuf, message: String },

    #[error("book {book} refers to unknown genre {genre}")]
    UnknownGenre { book: u32, genre: u32 },

    #[error("translation '{0}' is not in the translation catalog")]
    UnknownTranslation(String),

    #[error("training fraction must be within [0, 1], got {0}")]
    InvalidFraction(f64),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("split directory is inconsistent: {0}")]
    CorruptSplit(String),

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl CorpusError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedTable {
            path:    path.into(),
            message: message.into(),
        }
    }

    /// Soft conditions end the run with empty partitions instead of an error.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::EmptyAlignment { .. } | Self::EmptyAfterFilter { .. })
    }
}

pub type Result<T> = std::result::Result<T, CorpusError>;
