// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything from raw CSV tables to flattened text lists.
//
// The pipeline flows in this order:
//
//   t_key.csv / key_english.csv / key_genre_english.csv
//       │
//       ▼
//   catalog_loader   → translations and the book catalog
//       │
//       ▼
//   loader           → one VerseMap per selected translation
//       │
//       ▼
//   aligner          → verses shared by every translation
//       │
//       ▼
//   preprocessor     → optional word / sentence / contraction filters
//       │
//       ▼
//   splitter         → training / validation / test
//       │
//       ▼
//   zipper           → per-translation text lists, optionally shuffled
//
// Each module is responsible for exactly one step.

/// Header-addressed CSV reading with Latin-1 fallback
pub mod table;

/// Reads the translation, book and genre catalogs
pub mod catalog_loader;

/// Reads one translation's verse table
pub mod loader;

/// Intersects verses across translations
pub mod aligner;

/// Pluggable preprocessing filters
pub mod preprocessor;

/// Test / training / validation split
pub mod splitter;

/// Flattens partitions into per-translation lists
pub mod zipper;
