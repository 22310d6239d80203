// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, hands the work to Layer 2 and
// prints the results as plain aligned text.
//
//   1. `split`   - build and write the partitioned corpus
//   2. `inspect` - count what a split directory contains
//   3. `summary` - versions, genres and testaments of the raw data
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{bail, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use commands::{Commands, InspectArgs, SplitArgs, SummaryArgs};

#[derive(Parser, Debug)]
#[command(
    name = "bible-corpus",
    version,
    about = "Build aligned training, validation and test sets from multiple Bible translations."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Split(args)   => run_split(args),
            Commands::Inspect(args) => run_inspect(args),
            Commands::Summary(args) => run_summary(args),
        }
    }
}

fn run_split(args: SplitArgs) -> Result<()> {
    use crate::application::split_use_case::SplitUseCase;

    let use_case = SplitUseCase::new(args.into());
    let mut rng = match use_case.config().seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::info!("Reading corpus from: {}", use_case.config().data_dir);
    let report = use_case.execute(&mut rng)?;

    if let Some(reason) = &report.diagnostic {
        println!("No dataset produced: {reason}");
        return Ok(());
    }

    let c = report.counts;
    println!("{:<14}{:>8}", "shared", c.shared);
    println!("{:<14}{:>8}", "after filters", c.after_filters);
    println!("{:<14}{:>8}", "training", c.training);
    println!("{:<14}{:>8}", "validation", c.validation);
    println!("{:<14}{:>8}", "test", c.test);

    match &report.written_to {
        Some(dir) => println!("\nSplit written to {}", dir.display()),
        None => println!("\nNothing written (--no-write)"),
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::application::inspect_use_case::InspectUseCase;

    let compare = match args.compare.as_slice() {
        [] => None,
        [a, b] => Some((a.as_str(), b.as_str())),
        other => bail!("--compare takes exactly two table codes, got {}", other.len()),
    };

    let report = InspectUseCase::new(args.split_dir).execute(compare)?;

    println!("{:<12}{:<16}{:>8}", "partition", "translation", "verses");
    for entry in &report.counts {
        for (table, n) in &entry.translations {
            println!("{:<12}{:<16}{:>8}", entry.partition, table, n);
        }
    }

    if let Some((a, b)) = compare {
        println!("\n{a} vs {b}");
        for cmp in &report.comparisons {
            println!("{:<12}{:>8} of {:>8} differ", cmp.partition, cmp.differing, cmp.total);
        }
    }
    Ok(())
}

fn run_summary(args: SummaryArgs) -> Result<()> {
    use crate::application::summary_use_case::SummaryUseCase;

    let summary = SummaryUseCase::new(args.data_dir).execute()?;

    println!("{:>4}  {:<8}{:<36}{}", "id", "abbr", "version", "missing books");
    for row in &summary.versions {
        let missing = if row.missing_books.is_empty() {
            "-".to_string()
        } else {
            row.missing_books.iter().map(u32::to_string).collect::<Vec<_>>().join(",")
        };
        println!("{:>4}  {:<8}{:<36}{}", row.id, row.abbreviation, row.version, missing);
    }

    println!("\n{:>4}  {:<24}{:>6}", "id", "genre", "books");
    for row in &summary.genres {
        println!("{:>4}  {:<24}{:>6}", row.id, row.name, row.books);
    }

    println!("\n{:<6}{:<18}{:>6}", "label", "testament", "books");
    for row in &summary.testaments {
        println!("{:<6}{:<18}{:>6}", row.label, row.name, row.books);
    }
    Ok(())
}
