// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Each use case coordinates the data and infra layers for one
// CLI command. No printing happens here (that is Layer 1) and
// no file parsing either (Layers 4 and 6).
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Catalog -> align -> filter -> partition -> zip -> write
pub mod split_use_case;

// Load an existing split directory and count what is in it
pub mod inspect_use_case;

// Per-version missing books, genre and testament tables
pub mod summary_use_case;
