//! Answering service: retrieve, assemble context, generate
//!
//! Composes the fusion retriever (or the context-injection path) with the
//! prompted answerer behind one `answer(question)` call. All indexes are
//! built once, before any query traffic; after construction everything is
//! read-only, so a single instance is safe to share across concurrent calls.

use std::sync::Arc;

use tracing::debug;
use tracing::error;
use tracing::info;

use crate::config::AppConfig;
use crate::embeddings::Embedder;
use crate::errors::Result;
use crate::llm::Generator;
use crate::models::Record;
use crate::rag::assemble_context;
use crate::rag::inject_full_corpus;
use crate::rag::prompts;
use crate::rag::FusionRetriever;
use crate::rag::FusionWeights;
use crate::rag::LexicalIndex;
use crate::rag::RankSource;
use crate::rag::RetrievalStrategy;
use crate::rag::SearchResult;
use crate::rag::SemanticIndex;

/// Service construction and answering options
#[derive(Debug, Clone, Copy)]
pub struct AnsweringOptions {
    pub strategy: RetrievalStrategy,
    pub semantic_k: usize,
    pub lexical_k: usize,
    pub weights: FusionWeights,
    pub temperature: f32,
    pub max_tokens: usize,
}

impl Default for AnsweringOptions {
    fn default() -> Self {
        Self {
            strategy: RetrievalStrategy::Fusion,
            semantic_k: 3,
            lexical_k: 3,
            weights: FusionWeights::default(),
            temperature: 0.3,
            max_tokens: 512,
        }
    }
}

impl AnsweringOptions {
    /// Derive options from the application config
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            strategy: RetrievalStrategy::parse(&config.retrieval.strategy)
                .unwrap_or(RetrievalStrategy::Fusion),
            semantic_k: config.retrieval.semantic_k,
            lexical_k: config.retrieval.lexical_k,
            weights: FusionWeights {
                semantic: config.retrieval.semantic_weight,
                lexical: config.retrieval.lexical_weight,
            },
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
        }
    }
}

/// FAQ answering service over a static corpus
pub struct AnsweringService<E: Embedder, G: Generator> {
    records: Vec<Arc<Record>>,
    retriever: FusionRetriever<E>,
    /// Whole corpus pre-joined for the context-injection strategy
    full_context: String,
    generator: Arc<G>,
    options: AnsweringOptions,
}

impl<E: Embedder, G: Generator> AnsweringService<E, G> {
    /// Build both indexes from the corpus and assemble the service.
    ///
    /// Runs once at startup, before any queries. An empty corpus is valid
    /// (every answer degrades to the refusal/fallback path); an embedding
    /// failure here is fatal because the service cannot serve without a
    /// complete semantic index.
    pub async fn build(
        records: Vec<Record>,
        embedder: Arc<E>,
        generator: Arc<G>,
        options: AnsweringOptions,
    ) -> Result<Self> {
        info!("Building answering service with {} records", records.len());
        let records: Vec<Arc<Record>> = records.into_iter().map(Arc::new).collect();

        let lexical = LexicalIndex::build(&records);
        let semantic = SemanticIndex::build(&records, embedder.as_ref()).await?;
        let full_context = inject_full_corpus(&records);

        let retriever = FusionRetriever::new(
            semantic,
            lexical,
            embedder,
            options.weights,
            options.semantic_k,
            options.lexical_k,
        );

        Ok(Self {
            records,
            retriever,
            full_context,
            generator,
            options,
        })
    }

    /// Answer a question with the configured default strategy.
    ///
    /// Never fails: retrieval or generation errors are logged and converted
    /// to the fixed fallback string at this boundary.
    pub async fn answer(&self, question: &str) -> String {
        self.answer_with_strategy(question, self.options.strategy).await
    }

    /// Answer a question with an explicit retrieval strategy
    pub async fn answer_with_strategy(
        &self,
        question: &str,
        strategy: RetrievalStrategy,
    ) -> String {
        match self.try_answer(question, strategy).await {
            Ok(answer) => answer,
            Err(e) => {
                error!("Answering failed ({}): {}", strategy.as_str(), e);
                prompts::FALLBACK_ANSWER.to_string()
            }
        }
    }

    async fn try_answer(&self, question: &str, strategy: RetrievalStrategy) -> Result<String> {
        let context = match strategy {
            RetrievalStrategy::ContextInjection => self.full_context.clone(),
            _ => {
                let results = self.retrieve_with_strategy(question, strategy).await?;
                debug!("Retrieved {} records for context", results.len());
                assemble_context(&results)
            }
        };

        let prompt = prompts::build_faq_prompt(&context, question);
        let answer = self
            .generator
            .generate(&prompt, self.options.temperature, self.options.max_tokens)
            .await?;
        Ok(answer.trim().to_string())
    }

    /// Raw-retrieval inspection entry point for evaluation tooling
    pub async fn retrieve(&self, question: &str) -> Result<Vec<SearchResult>> {
        self.retrieve_with_strategy(question, self.options.strategy).await
    }

    /// Retrieve with an explicit strategy.
    ///
    /// Context injection performs no ranking; it reports the whole corpus in
    /// corpus order with zero scores.
    pub async fn retrieve_with_strategy(
        &self,
        question: &str,
        strategy: RetrievalStrategy,
    ) -> Result<Vec<SearchResult>> {
        match strategy {
            RetrievalStrategy::Fusion => self.retriever.retrieve(question).await,
            RetrievalStrategy::Semantic => self.retriever.retrieve_semantic(question).await,
            RetrievalStrategy::Lexical => Ok(self.retriever.retrieve_lexical(question)),
            RetrievalStrategy::ContextInjection => Ok(self
                .records
                .iter()
                .map(|record| SearchResult {
                    record: Arc::clone(record),
                    score: 0.0,
                    source: RankSource::Fused,
                })
                .collect()),
        }
    }

    /// Records in canonical corpus order
    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    /// Default options the service was built with
    pub fn options(&self) -> &AnsweringOptions {
        &self.options
    }

    /// Explicit lifecycle hook; the indexes are in-memory only, so there is
    /// nothing to release
    pub fn shutdown(self) {}
}
