//! Read a generated corpus back and classify each file the way a consumer
//! expecting `{"text": "..."}` would.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::stats::TextStats;

/// How a consumer sees one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// A JSON object with a string `text` member.
    Valid,
    /// Not parseable as JSON at all.
    Syntax,
    /// Parseable, but no string `text` member.
    MissingText,
}

/// Why a file has no usable `text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Syntax,
    MissingText,
}

impl From<Fault> for Verdict {
    fn from(fault: Fault) -> Self {
        match fault {
            Fault::Syntax => Verdict::Syntax,
            Fault::MissingText => Verdict::MissingText,
        }
    }
}

/// Totals for one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub files: usize,
    pub valid: usize,
    pub syntax: usize,
    pub missing_text: usize,
    /// Word statistics across all valid `text` values.
    pub stats: TextStats,
    pub malformed_paths: Vec<PathBuf>,
}

impl CheckReport {
    pub fn malformed(&self) -> usize {
        self.syntax + self.missing_text
    }

    pub fn malformed_ratio(&self) -> f64 {
        if self.files == 0 {
            0.0
        } else {
            self.malformed() as f64 / self.files as f64
        }
    }
}

/// Extract the `text` value, or the fault explaining why there is none.
pub fn extract_text(bytes: &[u8]) -> std::result::Result<String, Fault> {
    let Ok(value) = serde_json::from_slice::<Value>(bytes) else {
        return Err(Fault::Syntax);
    };
    match value {
        Value::Object(mut map) => match map.remove("text") {
            Some(Value::String(text)) => Ok(text),
            _ => Err(Fault::MissingText),
        },
        _ => Err(Fault::MissingText),
    }
}

pub fn classify(bytes: &[u8]) -> Verdict {
    match extract_text(bytes) {
        Ok(_) => Verdict::Valid,
        Err(fault) => fault.into(),
    }
}

/// Classify every `*.json` file in `dir`, in file-name order.
pub fn check_dir(dir: &Path) -> Result<CheckReport> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read directory entry in: {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut report = CheckReport::default();
    for path in paths {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("failed to read file: {}", path.display()))?;
        report.files += 1;
        match extract_text(&bytes) {
            Ok(text) => {
                report.valid += 1;
                report.stats.add_text(&text);
            }
            Err(fault) => {
                debug!(path = %path.display(), ?fault, "malformed file");
                match fault {
                    Fault::Syntax => report.syntax += 1,
                    Fault::MissingText => report.missing_text += 1,
                }
                report.malformed_paths.push(path);
            }
        }
    }
    Ok(report)
}
