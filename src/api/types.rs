//! API request and response types

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Question-answering request
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    /// Optional strategy override: "fusion", "semantic", "lexical", "inject"
    #[serde(default)]
    pub strategy: Option<String>,
}

/// Question-answering response
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// History listing parameters
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    10
}

/// One logged interaction
#[derive(Debug, Serialize)]
pub struct InteractionOut {
    pub question: String,
    pub answer: String,
    pub ts: DateTime<Utc>,
}

/// Raw-retrieval inspection request
#[derive(Debug, Deserialize)]
pub struct RetrieveRequest {
    pub query: String,
    #[serde(default)]
    pub strategy: Option<String>,
}

/// One retrieved record with its ranking score
#[derive(Debug, Serialize)]
pub struct RetrievedRecord {
    pub question: String,
    pub body: String,
    pub score: f32,
    pub source: String,
}
