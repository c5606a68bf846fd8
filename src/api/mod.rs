//! API layer - HTTP endpoints, web form and middleware

pub mod health;
pub mod middleware;
pub mod query;
pub mod router;
pub mod state;
pub mod types;
pub mod ui;

pub use router::{create_router, create_router_with_metrics};
pub use state::AppState;
