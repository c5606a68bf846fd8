//! Guideline recommendation corpus

mod record;

pub use record::{CorpusSource, Recommendation};

#[cfg(test)]
pub use record::mock::StaticCorpus;
