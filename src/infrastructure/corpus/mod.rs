//! Corpus source implementations

mod csv_loader;

pub use csv_loader::{CsvCorpus, DEFAULT_SOURCE_COLUMN, DEFAULT_TEXT_COLUMN};
