//! Infrastructure layer - External service implementations

pub mod corpus;
pub mod credentials;
pub mod embedding;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod services;
pub mod store;
