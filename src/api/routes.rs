//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers;
use super::handlers::AppState;
use crate::embeddings::Embedder;
use crate::llm::Generator;

/// Create the API router
pub fn api_routes<E, G>(state: AppState<E, G>) -> Router
where
    E: Embedder + 'static,
    G: Generator + 'static,
{
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Question answering
        .route("/ask", post(handlers::ask::<E, G>))
        // Interaction history
        .route("/history", get(handlers::history::<E, G>))
        // Raw retrieval for evaluation tooling
        .route("/retrieve", post(handlers::retrieve::<E, G>))
        .with_state(state)
}
