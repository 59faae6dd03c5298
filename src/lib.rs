//! Synthetic JSON text corpus with deliberate faults, for exercising the
//! error paths of `{"text": "..."}` consumers.

pub mod check;
pub mod corpus;
pub mod stats;
pub mod text;

pub use check::{CheckReport, Fault, Verdict, check_dir, classify};
pub use corpus::{CorpusConfig, CorpusSummary, FileKind, write_corpus};
pub use stats::TextStats;
