// ============================================================
// Layer 3 - Verse Domain Types
// ============================================================
// A verse is located by the same (book, chapter, verse) triple
// in every translation, which is what lets us line translations
// up against each other.
//
// Both verse maps are BTreeMaps rather than HashMaps so that
// iteration always walks verses in canonical Bible order.
// Every later stage (splitting, zipping) relies on that order
// being identical from run to run.
//
// Reference: Rust Book §8 (Collections)

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Locates one verse, e.g. Genesis 1:1 is `(1, 1, 1)`.
///
/// Field order matters: the derived `Ord` compares book first,
/// then chapter, then verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VerseIdentifier {
    pub book:    u32,
    pub chapter: u32,
    pub verse:   u32,
}

impl VerseIdentifier {
    pub fn new(book: u32, chapter: u32, verse: u32) -> Self {
        Self { book, chapter, verse }
    }
}

impl fmt::Display for VerseIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.book, self.chapter, self.verse)
    }
}

/// All verses of a single translation.
pub type VerseMap = BTreeMap<VerseIdentifier, String>;

/// Verses shared by every requested translation.
///
/// Each value holds one text per translation, in the order the
/// translations were requested.
pub type AlignedVerseSet = BTreeMap<VerseIdentifier, Vec<String>>;
