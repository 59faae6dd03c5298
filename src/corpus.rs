//! Corpus writer.
//!
//! Writes `total_files` documents named `text_NNNNN.json` into one directory.
//! Roughly `error_ratio` of them are deliberately malformed, split evenly
//! between a syntax error and a well-formed object without the `text` key.

use anyhow::{Context, Result, bail};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::text::random_paragraph;

/// Files written per run.
pub const TOTAL_FILES: usize = 100_000;
/// Share of files that are deliberately malformed.
pub const ERROR_RATIO: f64 = 0.01;
/// Output directory when none is given.
pub const DEFAULT_OUT_DIR: &str = "data/generated";

/// Unterminated object: fails to parse.
pub const BROKEN_SYNTAX_DOC: &str = r#"{ "text": "broken json without closing brace" "#;
const MISSING_TEXT_TITLE: &str = "no text field here";

#[derive(Serialize)]
struct TextDoc<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct TitleDoc<'a> {
    title: &'a str,
}

/// Compact JSON with `", "` and `": "` separators: `{"text": "..."}`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

fn to_json<T: Serialize>(doc: &T) -> Result<String> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    doc.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// What the writer decided to emit for one index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `{"text": <paragraph>}`.
    Valid,
    /// Truncated JSON.
    BrokenSyntax,
    /// Valid JSON object with no `text` key.
    MissingText,
}

impl FileKind {
    pub fn is_malformed(self) -> bool {
        self != FileKind::Valid
    }
}

/// Where and how much to write.
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    pub out_dir: PathBuf,
    pub total_files: usize,
    pub error_ratio: f64,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            total_files: TOTAL_FILES,
            error_ratio: ERROR_RATIO,
        }
    }
}

impl CorpusConfig {
    /// Default counts, written under `out_dir`.
    pub fn with_out_dir(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.error_ratio) {
            bail!(
                "error ratio must be within [0, 1], got {}",
                self.error_ratio
            );
        }
        Ok(())
    }
}

/// Per-kind counts of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusSummary {
    pub out_dir: PathBuf,
    pub valid: usize,
    pub broken_syntax: usize,
    pub missing_text: usize,
}

impl CorpusSummary {
    fn new(out_dir: &Path) -> Self {
        Self {
            out_dir: out_dir.to_path_buf(),
            valid: 0,
            broken_syntax: 0,
            missing_text: 0,
        }
    }

    fn record(&mut self, kind: FileKind) {
        match kind {
            FileKind::Valid => self.valid += 1,
            FileKind::BrokenSyntax => self.broken_syntax += 1,
            FileKind::MissingText => self.missing_text += 1,
        }
    }

    pub fn malformed(&self) -> usize {
        self.broken_syntax + self.missing_text
    }

    pub fn total(&self) -> usize {
        self.valid + self.malformed()
    }
}

/// File name for `index`, zero-padded to five digits.
pub fn file_name(index: usize) -> String {
    format!("text_{index:05}.json")
}

/// `StdRng` from `seed`, or from the OS when there is none.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Draw the kind of one file. Below `error_ratio` the file is malformed,
/// with a second fair draw picking which way.
pub fn choose_kind<R: Rng + ?Sized>(rng: &mut R, error_ratio: f64) -> FileKind {
    if rng.random::<f64>() < error_ratio {
        if rng.random::<f64>() < 0.5 {
            FileKind::BrokenSyntax
        } else {
            FileKind::MissingText
        }
    } else {
        FileKind::Valid
    }
}

/// File contents for `kind`. Only `Valid` consumes randomness.
pub fn render<R: Rng + ?Sized>(kind: FileKind, rng: &mut R) -> Result<String> {
    let content = match kind {
        FileKind::Valid => {
            let paragraph = random_paragraph(rng);
            to_json(&TextDoc { text: &paragraph })?
        }
        FileKind::BrokenSyntax => BROKEN_SYNTAX_DOC.to_string(),
        FileKind::MissingText => to_json(&TitleDoc {
            title: MISSING_TEXT_TITLE,
        })?,
    };
    Ok(content)
}

/// Write the whole corpus, creating `config.out_dir` if needed. Existing
/// files with the same names are overwritten.
pub fn write_corpus<R: Rng + ?Sized>(
    config: &CorpusConfig,
    rng: &mut R,
) -> Result<CorpusSummary> {
    config.validate()?;
    let dir = &config.out_dir;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    info!(
        dir = %dir.display(),
        total_files = config.total_files,
        error_ratio = config.error_ratio,
        "generating corpus"
    );

    let mut summary = CorpusSummary::new(dir);
    for index in 0..config.total_files {
        let kind = choose_kind(rng, config.error_ratio);
        let content = render(kind, rng)?;
        let path = dir.join(file_name(index));
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write file: {}", path.display()))?;
        if kind.is_malformed() {
            debug!(path = %path.display(), ?kind, "wrote malformed file");
        }
        summary.record(kind);
    }

    info!(
        valid = summary.valid,
        broken_syntax = summary.broken_syntax,
        missing_text = summary.missing_text,
        "corpus written"
    );
    Ok(summary)
}
