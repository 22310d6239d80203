// ============================================================
// Layer 4 - Verse Preprocessing Filters
// ============================================================
// Optional stages run over the aligned verse set before it is
// partitioned. Each stage is a VerseFilter and they run in the
// order the caller lists them.
//
//   WordCountFilter      keep a verse only if EVERY translation
//                        has between min and max words
//   SentenceCountFilter  keep a verse only if EVERY translation
//                        has between min and max sentences
//   ContractionExpander  rewrite "can't" -> "cannot" and friends
//
// Word and sentence bounds are inclusive. A verse is judged as
// a whole: if one translation fails the bound, the verse is
// dropped for all translations so alignment is preserved.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            regex crate documentation

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::domain::error::{CorpusError, Result};
use crate::domain::traits::VerseFilter;
use crate::domain::verse::AlignedVerseSet;

// ─── Filter Configuration ─────────────────────────────────────────────────────
/// Serialisable description of one filter stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterSpec {
    WordCount { min: usize, max: usize },
    SentenceCount { min: usize, max: usize },
    ExpandContractions,
}

impl FilterSpec {
    /// Build the runnable filter, rejecting empty ranges.
    pub fn build(&self) -> Result<Box<dyn VerseFilter>> {
        let filter: Box<dyn VerseFilter> = match *self {
            Self::WordCount { min, max } => Box::new(WordCountFilter::new(min, max)?),
            Self::SentenceCount { min, max } => Box::new(SentenceCountFilter::new(min, max)?),
            Self::ExpandContractions => Box::new(ContractionExpander),
        };
        Ok(filter)
    }
}

/// Build every filter in order.
pub fn build_filters(specs: &[FilterSpec]) -> Result<Vec<Box<dyn VerseFilter>>> {
    specs.iter().map(FilterSpec::build).collect()
}

/// Apply filters in order, logging how many verses each one keeps.
pub fn run_filters(mut verses: AlignedVerseSet, filters: &[Box<dyn VerseFilter>]) -> AlignedVerseSet {
    for filter in filters {
        let before = verses.len();
        verses = filter.apply(verses);
        tracing::debug!("{}: kept {} of {} verses", filter.describe(), verses.len(), before);
    }
    verses
}

fn check_range(what: &str, min: usize, max: usize) -> Result<()> {
    if min > max {
        return Err(CorpusError::InvalidFilter(format!(
            "{what}: minimum ({min}) is greater than maximum ({max})"
        )));
    }
    Ok(())
}

// ─── Word Count ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy)]
pub struct WordCountFilter {
    min: usize,
    max: usize,
}

impl WordCountFilter {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        check_range("word count", min, max)?;
        Ok(Self { min, max })
    }

    fn accepts(&self, text: &str) -> bool {
        (self.min..=self.max).contains(&word_count(text))
    }
}

impl VerseFilter for WordCountFilter {
    fn apply(&self, verses: AlignedVerseSet) -> AlignedVerseSet {
        verses
            .into_iter()
            .filter(|(_, texts)| texts.iter().all(|t| self.accepts(t)))
            .collect()
    }

    fn describe(&self) -> String {
        format!("word count in [{}, {}]", self.min, self.max)
    }
}

/// Whitespace separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

// ─── Sentence Count ───────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy)]
pub struct SentenceCountFilter {
    min: usize,
    max: usize,
}

impl SentenceCountFilter {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        check_range("sentence count", min, max)?;
        Ok(Self { min, max })
    }

    fn accepts(&self, text: &str) -> bool {
        (self.min..=self.max).contains(&sentence_count(text))
    }
}

impl VerseFilter for SentenceCountFilter {
    fn apply(&self, verses: AlignedVerseSet) -> AlignedVerseSet {
        verses
            .into_iter()
            .filter(|(_, texts)| texts.iter().all(|t| self.accepts(t)))
            .collect()
    }

    fn describe(&self) -> String {
        format!("sentence count in [{}, {}]", self.min, self.max)
    }
}

fn sentence_delimiter() -> &'static Regex {
    static DELIM: OnceLock<Regex> = OnceLock::new();
    // terminal punctuation followed by any character; a final '.' does
    // not open another sentence
    DELIM.get_or_init(|| Regex::new(r"[.!?].").expect("sentence delimiter pattern"))
}

/// Number of segments left after splitting on sentence-terminal punctuation.
pub fn sentence_count(text: &str) -> usize {
    sentence_delimiter().split(text).count()
}

// ─── Contraction Expansion ────────────────────────────────────────────────────
/// Best-effort lexical contraction expansion. Output is not
/// case-preserving and verse identifiers are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractionExpander;

// Forms whose expansion is not just "stem + suffix word".
const IRREGULAR: &[(&str, &str)] = &[
    ("can't", "cannot"),
    ("won't", "will not"),
    ("shan't", "shall not"),
    ("ain't", "am not"),
    ("let's", "let us"),
    ("i'm", "I am"),
    ("i'll", "I will"),
    ("i've", "I have"),
    ("i'd", "I would"),
    ("it's", "it is"),
    ("he's", "he is"),
    ("she's", "she is"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("here's", "here is"),
    ("what's", "what is"),
    ("where's", "where is"),
    ("who's", "who is"),
    ("how's", "how is"),
    ("y'all", "you all"),
    ("o'clock", "of the clock"),
    ("ma'am", "madam"),
    ("'tis", "it is"),
    ("'twas", "it was"),
];

const SUFFIXES: &[(&str, &str)] = &[
    ("n't", " not"),
    ("'re", " are"),
    ("'ll", " will"),
    ("'ve", " have"),
    ("'d", " would"),
    ("'m", " am"),
];

fn contraction_word() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| {
        Regex::new(r"(?i)['’]?\b[a-z]+(?:['’][a-z]+)*").expect("contraction word pattern")
    })
}

/// Expansion of a single word, or None when it is not a known contraction.
pub fn expand_word(word: &str) -> Option<String> {
    let lower = word.to_lowercase().replace('’', "'");
    if !lower.contains('\'') {
        return None;
    }

    if let Some((_, expanded)) = IRREGULAR.iter().find(|(form, _)| *form == lower) {
        return Some((*expanded).to_string());
    }

    // leading-apostrophe words that are not in the table are quotes, not contractions
    if lower.starts_with('\'') {
        return None;
    }

    SUFFIXES.iter().find_map(|(suffix, replacement)| {
        let stem = lower.strip_suffix(suffix)?;
        (!stem.is_empty() && !stem.contains('\'')).then(|| format!("{stem}{replacement}"))
    })
}

/// Expand every contraction found in `text`.
pub fn expand_contractions(text: &str) -> String {
    contraction_word()
        .replace_all(text, |caps: &Captures| {
            expand_word(&caps[0]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

impl VerseFilter for ContractionExpander {
    fn apply(&self, verses: AlignedVerseSet) -> AlignedVerseSet {
        verses
            .into_iter()
            .map(|(id, texts)| (id, texts.iter().map(|t| expand_contractions(t)).collect()))
            .collect()
    }

    fn describe(&self) -> String {
        "expand contractions".to_string()
    }
}
