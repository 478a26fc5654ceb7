//! Embeddings generation module
//!
//! Provides the [`Embedder`] capability used by the semantic index and an HTTP
//! [`EmbeddingClient`] implementation for Ollama and `OpenAI` providers.
//!
//! The same client (same model, same configuration) must be used for both the
//! corpus build and query-time embedding: mixing embedding spaces silently
//! corrupts similarity ranking.

pub mod client;

pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;

use std::future::Future;

use crate::errors::Result;

/// Default embedding dimension for nomic-embed-text
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

/// Maximum concurrent embedding requests during index build
pub const BUILD_CONCURRENCY: usize = 8;

/// Capability for turning text into a fixed-length vector
pub trait Embedder: Send + Sync {
    /// Embed a single text
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>>> + Send;
}

/// Configuration for embedding generation
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub dimension: usize,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl EmbeddingConfig {
    pub fn from_app_config(config: &crate::config::AppConfig) -> Self {
        // Priority: llm_key > endpoint domain; unknown remote endpoints are
        // treated as OpenAI-compatible
        let provider = if config.llm_key() == "ollama" {
            EmbeddingProvider::Ollama
        } else if config.llm_endpoint().contains("api.openai.com") {
            EmbeddingProvider::OpenAi
        } else if config.llm_endpoint().contains("localhost") {
            EmbeddingProvider::Ollama
        } else {
            EmbeddingProvider::OpenAi
        };

        Self {
            provider,
            model: config.embedding_model().to_string(),
            dimension: config.embedding_dimension(),
            endpoint: config.llm_endpoint().to_string(),
            api_key: if provider == EmbeddingProvider::OpenAi {
                Some(config.llm_key().to_string())
            } else {
                None
            },
            timeout_secs: config.timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_provider_detection_ollama() {
        let config = AppConfig::default();
        let embedding_config = EmbeddingConfig::from_app_config(&config);
        assert_eq!(embedding_config.provider, EmbeddingProvider::Ollama);
        assert!(embedding_config.api_key.is_none());
    }

    #[test]
    fn test_provider_detection_openai() {
        let mut config = AppConfig::default();
        config.llm.llm_endpoint = "https://api.openai.com/v1".to_string();
        config.llm.llm_key = "sk-test".to_string();
        let embedding_config = EmbeddingConfig::from_app_config(&config);
        assert_eq!(embedding_config.provider, EmbeddingProvider::OpenAi);
        assert_eq!(embedding_config.api_key.as_deref(), Some("sk-test"));
    }
}
