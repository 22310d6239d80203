// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by several other layers:
//
//   layout.rs      - every input and output file name in one
//                    place, plus parsing split file names back
//                    into (translation, partition)
//
//   split_store.rs - writes a zipped dataset to a split
//                    directory (replacing it) together with a
//                    manifest.json, and loads it back
//
//   timing.rs      - logs how long each pipeline stage took
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling)

/// Input and output file names
pub mod layout;

/// Split directory persistence
pub mod split_store;

/// Stage timing
pub mod timing;
