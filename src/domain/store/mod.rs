//! Embedded document store domain models and traits

mod document;
mod provider;

pub use document::{Document, SOURCE_META_KEY};
pub use provider::DocumentStore;
