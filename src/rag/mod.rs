//! RAG (Retrieval-Augmented Generation) module
//!
//! End-to-end FAQ answering over a static Q/A corpus:
//! - Lexical (BM25) and semantic (embedding) indexes built once at startup
//! - Weighted rank fusion of both signals into a single ranked list
//! - Context assembly from retrieved records (or the whole corpus)
//! - Grounded, verbatim-constrained answer generation
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use faqrag::config::AppConfig;
//! use faqrag::embeddings::{EmbeddingClient, EmbeddingConfig};
//! use faqrag::knowledge::load_knowledge;
//! use faqrag::llm::LlmClient;
//! use faqrag::rag::{AnsweringOptions, AnsweringService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let records = load_knowledge(config.knowledge_path())?;
//!     let embedder = Arc::new(EmbeddingClient::new(&EmbeddingConfig::from_app_config(&config))?);
//!     let generator = Arc::new(LlmClient::from_config(&config)?);
//!
//!     let options = AnsweringOptions::from_config(&config);
//!     let service = AnsweringService::build(records, embedder, generator, options).await?;
//!     println!("{}", service.answer("What is the refund policy?").await);
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod fusion;
pub mod lexical;
pub mod prompts;
pub mod semantic;
pub mod service;

pub use context::assemble_context;
pub use context::inject_full_corpus;
pub use fusion::FusionRetriever;
pub use fusion::FusionWeights;
pub use lexical::LexicalIndex;
pub use semantic::SemanticIndex;
pub use service::AnsweringOptions;
pub use service::AnsweringService;

use std::sync::Arc;

use crate::models::Record;

/// Search result with relevance score
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub record: Arc<Record>,
    pub score: f32,
    pub source: RankSource,
}

/// Which ranking signal produced the candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankSource {
    /// Vector similarity match
    Semantic,
    /// BM25 keyword match
    Lexical,
    /// Combined semantic and lexical match
    Fused,
}

/// Retrieval strategy selectable per call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetrievalStrategy {
    /// Weighted rank fusion of semantic and lexical results (deployed default)
    #[default]
    Fusion,
    /// Semantic search only
    Semantic,
    /// BM25 keyword search only
    Lexical,
    /// Skip ranking entirely and use the whole corpus as context
    ContextInjection,
}

impl RetrievalStrategy {
    /// Parse a strategy name as used by the API and CLI
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "fusion" | "hybrid" => Some(Self::Fusion),
            "semantic" => Some(Self::Semantic),
            "lexical" | "keyword" | "bm25" => Some(Self::Lexical),
            "inject" | "context_injection" | "full" => Some(Self::ContextInjection),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fusion => "fusion",
            Self::Semantic => "semantic",
            Self::Lexical => "lexical",
            Self::ContextInjection => "inject",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse_round_trip() {
        for strategy in [
            RetrievalStrategy::Fusion,
            RetrievalStrategy::Semantic,
            RetrievalStrategy::Lexical,
            RetrievalStrategy::ContextInjection,
        ] {
            assert_eq!(RetrievalStrategy::parse(strategy.as_str()), Some(strategy));
        }
        assert_eq!(RetrievalStrategy::parse("hybrid"), Some(RetrievalStrategy::Fusion));
        assert_eq!(RetrievalStrategy::parse("nonsense"), None);
    }
}
