// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing the corpus:
// verses, translations, books, partitions and the errors that
// can occur while building a split.
//
// Rules for this layer:
//   - NO file I/O
//   - NO randomness
//   - Only data types and the traits other layers implement

/// Verse identifiers and verse maps
pub mod verse;

/// Translations, books and genres
pub mod catalog;

/// Training / validation / test partitions and the zipped dataset
pub mod partition;

/// Error taxonomy for the whole corpus pipeline
pub mod error;

/// VerseSource and VerseFilter
pub mod traits;
