//! Document store implementations

mod in_memory;
mod snapshot;

pub use in_memory::InMemoryDocumentStore;
pub use snapshot::{StoreSnapshot, SNAPSHOT_VERSION};
