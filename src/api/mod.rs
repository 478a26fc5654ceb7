//! HTTP API layer
//!
//! Thin plumbing around the answering service: request validation, route
//! definitions and the interaction history endpoint. The service itself is
//! constructed at startup and handed in as shared state.

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use handlers::AppState;
pub use routes::api_routes;
pub use server::serve_api;
