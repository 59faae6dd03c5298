//! Word statistics over the `text` values of a corpus.

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::path::Path;

/// Rows printed by `check` when `--top` is not given.
pub const DEFAULT_TOP: usize = 20;

/// Stop words, lowercased.
pub type StopWords = BTreeSet<String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStats {
    pub total_words: usize,
    pub total_sentences: usize,
    /// Lowercased word -> occurrences.
    pub word_freq: BTreeMap<String, usize>,
    /// Word length in bytes -> occurrences.
    pub length_distribution: BTreeMap<usize, usize>,
}

/// Maximal runs of ASCII letters, digits and apostrophes.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '\''))
        .filter(|w| !w.is_empty())
}

pub fn count_words(text: &str) -> usize {
    words(text).count()
}

pub fn count_sentences(text: &str) -> usize {
    memchr::memchr3_iter(b'.', b'!', b'?', text.as_bytes()).count()
}

impl TextStats {
    pub fn add_text(&mut self, text: &str) {
        self.total_sentences += count_sentences(text);
        for word in words(text) {
            self.total_words += 1;
            *self
                .word_freq
                .entry(word.to_ascii_lowercase())
                .or_default() += 1;
            *self.length_distribution.entry(word.len()).or_default() += 1;
        }
    }

    pub fn unique_words(&self) -> usize {
        self.word_freq.len()
    }

    /// The `n` most frequent words: count descending, then word ascending.
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        self.top_excluding(n, &StopWords::new())
    }

    /// Like [`TextStats::top`], skipping `stops`.
    pub fn top_excluding(&self, n: usize, stops: &StopWords) -> Vec<(&str, usize)> {
        let mut rows: Vec<(&str, usize)> = self
            .word_freq
            .iter()
            .filter(|(word, _)| !stops.contains(*word))
            .map(|(word, &count)| (word.as_str(), count))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows.truncate(n);
        rows
    }
}

/// Stop words from a JSON array whose items are strings or `{"stop": "..."}`
/// objects. Other items, or a non-array document, contribute nothing.
pub fn parse_stopwords(bytes: &[u8]) -> Result<StopWords> {
    let value: Value = serde_json::from_slice(bytes).context("stop words are not valid JSON")?;
    let mut stops = StopWords::new();
    if let Value::Array(items) = value {
        for item in items {
            let word = match &item {
                Value::String(s) => Some(s.as_str()),
                Value::Object(map) => map.get("stop").and_then(Value::as_str),
                _ => None,
            };
            if let Some(word) = word {
                stops.insert(word.to_lowercase());
            }
        }
    }
    Ok(stops)
}

pub fn load_stopwords(path: &Path) -> Result<StopWords> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read stop words: {}", path.display()))?;
    parse_stopwords(&bytes).with_context(|| format!("in {}", path.display()))
}

/// `word | count` table, words padded to 22 columns.
pub fn write_top_table(
    out: &mut impl Write,
    title: &str,
    rows: &[(&str, usize)],
) -> io::Result<()> {
    let rule = "-".repeat(40);
    writeln!(out, "{title}")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{:<22}| count", "word")?;
    writeln!(out, "{rule}")?;
    for (word, count) in rows {
        writeln!(out, "{word:<22}| {count}")?;
    }
    writeln!(out, "{rule}")
}

pub fn write_length_table(out: &mut impl Write, stats: &TextStats) -> io::Result<()> {
    let rule = "-".repeat(29);
    writeln!(out, "word lengths:")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "length | words")?;
    writeln!(out, "{rule}")?;
    for (len, count) in &stats.length_distribution {
        writeln!(out, "{len:<7}| {count}")?;
    }
    writeln!(out, "{rule}")
}
