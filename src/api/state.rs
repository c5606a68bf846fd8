//! Application state shared by handlers

use std::sync::Arc;

use crate::domain::{DocumentStore, QueryService};

/// Services handed to every request; read-only after startup
#[derive(Clone)]
pub struct AppState {
    pub query_service: Arc<dyn QueryService>,
    pub document_store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(
        query_service: Arc<dyn QueryService>,
        document_store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            query_service,
            document_store,
        }
    }
}
