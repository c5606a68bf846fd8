//! Infrastructure services

mod indexing_service;

pub use indexing_service::{IndexOrigin, IndexingService};
