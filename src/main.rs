use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};
use subworder::{learn, MergeApplier, MergeList, Stop};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "subworder")]
#[command(about = "Learn and apply byte-pair-encoding subword merges", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn a merge list from a corpus and segment the corpus with it
    Learn(LearnArgs),
    /// Segment text with a previously learned merge list
    Apply(ApplyArgs),
}

#[derive(Parser)]
struct LearnArgs {
    /// Path to the training corpus
    #[arg(long)]
    inpath: PathBuf,
    /// Path to write the segmented corpus to
    #[arg(long)]
    outpath: PathBuf,
    /// Path to write the merge list to
    #[arg(long)]
    vocab: PathBuf,
    /// Maximum number of merge operations
    #[arg(long, alias = "vocab_size", default_value_t = 10_000)]
    vocab_size: usize,
}

#[derive(Parser)]
struct ApplyArgs {
    /// Path to the text to segment
    #[arg(long)]
    inpath: PathBuf,
    /// Path to write the segmented text to
    #[arg(long)]
    outpath: PathBuf,
    /// Path of a learned merge list
    #[arg(long)]
    vocab: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.verbose {
        0 => tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init(),
        1 => tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init(),
        _ => tracing_subscriber::fmt().with_max_level(tracing::Level::TRACE).init(),
    }
    debug!("Verbosity level: {}", cli.verbose);

    match cli.command {
        Commands::Learn(args) => run_learn(args),
        Commands::Apply(args) => run_apply(args),
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

fn run_learn(args: LearnArgs) -> Result<()> {
    debug!("Input file: {}", args.inpath.display());
    debug!("Merge steps: {}", args.vocab_size);
    let text = read(&args.inpath)?;

    let start = Instant::now();
    let training = learn(&text, args.vocab_size);
    info!(
        "Learned {} merges in {:.2}s",
        training.merges().len(),
        start.elapsed().as_secs_f64()
    );
    if let Stop::Exhausted { performed } = training.stop() {
        info!("Stopped after {performed} of {} merges", args.vocab_size);
    }

    training.merges().save(&args.vocab)?;
    write(&args.outpath, &training.segment_text(&text)?)?;
    info!("Merge list saved to {}", args.vocab.display());
    Ok(())
}

fn run_apply(args: ApplyArgs) -> Result<()> {
    debug!("Input file: {}", args.inpath.display());
    debug!("Merge list: {}", args.vocab.display());
    let merges = MergeList::load(&args.vocab)?;
    let text = read(&args.inpath)?;

    let start = Instant::now();
    let applier = MergeApplier::new(merges);
    let output = applier.segment_text(&text)?;
    info!(
        "Applied {} merges in {:.2}s",
        applier.merges().len(),
        start.elapsed().as_secs_f64()
    );

    write(&args.outpath, &output)?;
    info!("Segmented text saved to {}", args.outpath.display());
    Ok(())
}
