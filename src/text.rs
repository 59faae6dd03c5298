//! Random filler text: words, sentences, paragraphs.
//!
//! Every function takes the RNG explicitly so callers decide how it is
//! seeded. Builders append into a caller-owned `String` to avoid an
//! intermediate allocation per word.

use rand::Rng;
use std::ops::RangeInclusive;

/// Letters per word.
pub const WORD_LEN: RangeInclusive<usize> = 3..=10;
/// Words per sentence.
pub const SENTENCE_WORDS: RangeInclusive<usize> = 5..=15;
/// Sentences per paragraph.
pub const PARAGRAPH_SENTENCES: RangeInclusive<usize> = 2..=5;
/// Sentence terminators, drawn uniformly.
pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// A random lowercase ASCII word.
pub fn random_word<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut out = String::with_capacity(*WORD_LEN.end());
    push_word(rng, &mut out);
    out
}

/// A capitalized sentence of random words, ending in `.`, `!` or `?`.
pub fn random_sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut out = String::new();
    push_sentence(rng, &mut out);
    out
}

/// Two to five sentences joined by single spaces.
pub fn random_paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut out = String::new();
    let sentences = rng.random_range(PARAGRAPH_SENTENCES);
    for i in 0..sentences {
        if i > 0 {
            out.push(' ');
        }
        push_sentence(rng, &mut out);
    }
    out
}

fn push_word<R: Rng + ?Sized>(rng: &mut R, out: &mut String) {
    let len = rng.random_range(WORD_LEN);
    for _ in 0..len {
        out.push(char::from(rng.random_range(b'a'..=b'z')));
    }
}

fn push_sentence<R: Rng + ?Sized>(rng: &mut R, out: &mut String) {
    let start = out.len();
    let words = rng.random_range(SENTENCE_WORDS);
    for i in 0..words {
        if i > 0 {
            out.push(' ');
        }
        push_word(rng, out);
    }
    // Words are ASCII, so the first byte is a whole char.
    if let Some(first) = out.get_mut(start..start + 1) {
        first.make_ascii_uppercase();
    }
    out.push(TERMINATORS[rng.random_range(0..TERMINATORS.len())]);
}
