use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use jsoncorpus::corpus::DEFAULT_OUT_DIR;
use jsoncorpus::stats::{self, DEFAULT_TOP, StopWords};

#[derive(Parser)]
#[command(
    name = "jsoncorpus",
    about = "Generate a synthetic JSON text corpus with deliberately broken files",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write text_NNNNN.json files, a small share of them malformed
    Generate {
        /// Output directory (created if missing)
        #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
        out: PathBuf,

        /// Fix the RNG seed for a reproducible corpus
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Classify every file of an existing corpus
    Check {
        /// Corpus directory
        #[arg(default_value = DEFAULT_OUT_DIR)]
        dir: PathBuf,

        /// Also print the path of every malformed file
        #[arg(short, long)]
        list: bool,

        /// Number of most frequent words to print
        #[arg(long, default_value_t = DEFAULT_TOP)]
        top: usize,

        /// JSON list of stop words; adds a second table without them
        #[arg(long)]
        stops: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate { out, seed } => generate(out, seed),
        Command::Check {
            dir,
            list,
            top,
            stops,
        } => check(dir, list, top, stops),
    }
}

fn generate(out: PathBuf, seed: Option<u64>) -> Result<()> {
    let mut rng = jsoncorpus::corpus::make_rng(seed);
    let config = jsoncorpus::CorpusConfig::with_out_dir(out);
    let summary = jsoncorpus::write_corpus(&config, &mut rng)
        .with_context(|| format!("failed to generate corpus in {}", config.out_dir.display()))?;
    println!(
        "Generated {} JSON files in {}",
        summary.total(),
        summary.out_dir.display()
    );
    Ok(())
}

fn check(dir: PathBuf, list: bool, top: usize, stops: Option<PathBuf>) -> Result<()> {
    let stopwords = match &stops {
        Some(path) => Some(stats::load_stopwords(path)?),
        None => None,
    };
    let report = jsoncorpus::check_dir(&dir)?;

    let stdout = io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    write_report(&mut out, &report, top, stopwords.as_ref(), list)?;
    out.flush()?;
    Ok(())
}

fn write_report(
    out: &mut impl Write,
    report: &jsoncorpus::CheckReport,
    top: usize,
    stopwords: Option<&StopWords>,
    list: bool,
) -> io::Result<()> {
    let text = &report.stats;
    writeln!(out, "files:        {}", report.files)?;
    writeln!(out, "valid:        {}", report.valid)?;
    writeln!(out, "syntax:       {}", report.syntax)?;
    writeln!(out, "missing text: {}", report.missing_text)?;
    writeln!(
        out,
        "malformed:    {} ({:.2}%)",
        report.malformed(),
        report.malformed_ratio() * 100.0
    )?;
    writeln!(out, "words:        {}", text.total_words)?;
    writeln!(out, "sentences:    {}", text.total_sentences)?;
    writeln!(out, "unique words: {}", text.unique_words())?;
    writeln!(out)?;

    stats::write_top_table(out, &format!("top {top} words:"), &text.top(top))?;
    if let Some(stops) = stopwords {
        writeln!(out)?;
        stats::write_top_table(
            out,
            &format!("top {top} words (without stop words):"),
            &text.top_excluding(top, stops),
        )?;
    }
    writeln!(out)?;
    stats::write_length_table(out, text)?;

    if list {
        writeln!(out)?;
        for path in &report.malformed_paths {
            writeln!(out, "{}", path.display())?;
        }
    }
    Ok(())
}
