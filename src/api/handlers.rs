//! API request handlers

use std::sync::Arc;

use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;

use crate::api::types::*;
use crate::embeddings::Embedder;
use crate::history::InteractionLog;
use crate::llm::Generator;
use crate::rag::AnsweringService;
use crate::rag::RetrievalStrategy;

/// Shared application state
pub struct AppState<E: Embedder, G: Generator> {
    pub service: Arc<AnsweringService<E, G>>,
    pub history: Arc<InteractionLog>,
}

// Manual impl: derive(Clone) would require E: Clone and G: Clone
impl<E: Embedder, G: Generator> Clone for AppState<E, G> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            history: Arc::clone(&self.history),
        }
    }
}

/// Health check handler
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Answer a question and log the interaction
pub async fn ask<E: Embedder, G: Generator>(
    State(state): State<AppState<E, G>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, StatusCode> {
    info!("POST /ask: {}", req.question);

    if req.question.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let strategy = parse_strategy(req.strategy.as_deref())?;

    let answer = match strategy {
        Some(strategy) => {
            state
                .service
                .answer_with_strategy(&req.question, strategy)
                .await
        }
        None => state.service.answer(&req.question).await,
    };

    // The log is best-effort plumbing: a write failure must not lose the answer
    if let Err(e) = state.history.append(&req.question, &answer) {
        error!("Failed to log interaction: {e}");
    }

    Ok(Json(AskResponse { answer }))
}

/// List the most recent interactions, newest first
pub async fn history<E: Embedder, G: Generator>(
    State(state): State<AppState<E, G>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<InteractionOut>>, StatusCode> {
    info!("GET /history?limit={}", params.limit);

    match state.history.recent(params.limit) {
        Ok(interactions) => Ok(Json(
            interactions
                .into_iter()
                .map(|i| InteractionOut {
                    question: i.question,
                    answer: i.answer,
                    ts: i.ts,
                })
                .collect(),
        )),
        Err(e) => {
            error!("Error reading history: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Raw retrieval without generation, for evaluation tooling
pub async fn retrieve<E: Embedder, G: Generator>(
    State(state): State<AppState<E, G>>,
    Json(req): Json<RetrieveRequest>,
) -> Result<Json<Vec<RetrievedRecord>>, StatusCode> {
    info!("POST /retrieve: {}", req.query);

    if req.query.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let strategy = parse_strategy(req.strategy.as_deref())?;

    let results = match strategy {
        Some(strategy) => {
            state
                .service
                .retrieve_with_strategy(&req.query, strategy)
                .await
        }
        None => state.service.retrieve(&req.query).await,
    };

    match results {
        Ok(results) => Ok(Json(
            results
                .into_iter()
                .map(|r| RetrievedRecord {
                    question: r.record.question.clone(),
                    body: r.record.body.clone(),
                    score: r.score,
                    source: format!("{:?}", r.source).to_lowercase(),
                })
                .collect(),
        )),
        Err(e) => {
            error!("Error retrieving records: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn parse_strategy(name: Option<&str>) -> Result<Option<RetrievalStrategy>, StatusCode> {
    match name {
        None => Ok(None),
        Some(name) => RetrievalStrategy::parse(name)
            .map(Some)
            .ok_or(StatusCode::UNPROCESSABLE_ENTITY),
    }
}
