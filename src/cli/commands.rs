// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the three subcommands and their flags:
//
//   split    build training / validation / test files
//   inspect  count what an existing split directory holds
//   summary  describe the raw corpus
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::split_use_case::CorpusConfig;
use crate::data::preprocessor::FilterSpec;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Align translations and write the partitioned split files
    Split(SplitArgs),

    /// Print verse counts of an existing split directory
    Inspect(InspectArgs),

    /// Print versions (with missing books), genres and testaments
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Directory containing t_key.csv, the book keys and verse tables
    #[arg(long, default_value = "data")]
    pub data_dir: String,

    /// Split directory; its previous contents are removed
    #[arg(long, default_value = "data/split")]
    pub output_dir: String,

    /// Comma-separated table codes, e.g. t_asv,t_kjv (default: first 7 in t_key.csv)
    #[arg(long, value_delimiter = ',')]
    pub versions: Vec<String>,

    /// Share of non-test verses that go to training
    #[arg(long, default_value_t = 70, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub training_percent: u8,

    /// Keep canonical verse order inside each partition
    #[arg(long)]
    pub no_shuffle: bool,

    /// Build the split but do not write any files
    #[arg(long)]
    pub no_write: bool,

    /// Seed for the validation sample and shuffling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Drop verses with fewer words than this in any translation
    #[arg(long)]
    pub min_words: Option<usize>,

    #[arg(long)]
    pub max_words: Option<usize>,

    /// Drop verses with fewer sentences than this in any translation
    #[arg(long)]
    pub min_sentences: Option<usize>,

    #[arg(long)]
    pub max_sentences: Option<usize>,

    /// Rewrite contractions (can't -> cannot) before counting
    #[arg(long)]
    pub expand_contractions: bool,
}

impl SplitArgs {
    /// Filter stages implied by the flags. Contractions are expanded first
    /// so word counts see the expanded text.
    fn filters(&self) -> Vec<FilterSpec> {
        let mut filters = Vec::new();
        if self.expand_contractions {
            filters.push(FilterSpec::ExpandContractions);
        }
        if self.min_words.is_some() || self.max_words.is_some() {
            filters.push(FilterSpec::WordCount {
                min: self.min_words.unwrap_or(1),
                max: self.max_words.unwrap_or(usize::MAX),
            });
        }
        if self.min_sentences.is_some() || self.max_sentences.is_some() {
            filters.push(FilterSpec::SentenceCount {
                min: self.min_sentences.unwrap_or(1),
                max: self.max_sentences.unwrap_or(usize::MAX),
            });
        }
        filters
    }
}

impl From<SplitArgs> for CorpusConfig {
    fn from(a: SplitArgs) -> Self {
        let filters = a.filters();
        CorpusConfig {
            data_dir:          a.data_dir,
            output_dir:        a.output_dir,
            translations:      a.versions,
            training_fraction: f64::from(a.training_percent) / 100.0,
            shuffle:           !a.no_shuffle,
            write_files:       !a.no_write,
            seed:              a.seed,
            filters,
            ..CorpusConfig::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Split directory written by `split`
    #[arg(long, default_value = "data/split")]
    pub split_dir: String,

    /// Two table codes to compare, e.g. t_asv,t_web
    #[arg(long, value_delimiter = ',')]
    pub compare: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[arg(long, default_value = "data")]
    pub data_dir: String,
}
