//! CLI command handlers

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::api::AppState;
use crate::cli::output;
use crate::config::AppConfig;
use crate::embeddings::EmbeddingClient;
use crate::embeddings::EmbeddingConfig;
use crate::errors::Result;
use crate::history::InteractionLog;
use crate::knowledge::load_knowledge;
use crate::llm::LlmClient;
use crate::rag::AnsweringOptions;
use crate::rag::AnsweringService;
use crate::rag::RetrievalStrategy;
use crate::FaqRagError;

/// The concrete service wiring used by the binary
pub type FaqService = AnsweringService<EmbeddingClient, LlmClient>;

/// Load the corpus, build both indexes and assemble the service.
///
/// This is the single startup path for every command that answers or
/// retrieves; a missing corpus or unreachable embedding backend fails here,
/// before any traffic is accepted.
pub async fn build_service(config: &AppConfig) -> Result<FaqService> {
    let records = load_knowledge(config.knowledge_path())?;
    info!("Loaded {} knowledge records", records.len());

    let embedder = Arc::new(EmbeddingClient::new(&EmbeddingConfig::from_app_config(config))?);
    let generator = Arc::new(LlmClient::from_config(config)?);
    let options = AnsweringOptions::from_config(config);

    AnsweringService::build(records, embedder, generator, options).await
}

/// Start the HTTP API server
pub async fn handle_serve(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    cors: bool,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.server.enable_cors = config.server.enable_cors || cors;

    let service = Arc::new(build_service(&config).await?);
    let history = Arc::new(InteractionLog::new(config.history_path()));
    let state = AppState { service, history };

    crate::api::serve_api(&config, state).await
}

/// Answer a single question
pub async fn handle_ask(
    config: &AppConfig,
    question: &str,
    strategy: &str,
    verbose: bool,
) -> Result<()> {
    let strategy = parse_strategy(strategy)?;
    let service = build_service(config).await?;

    if verbose && strategy != RetrievalStrategy::ContextInjection {
        let results = service.retrieve_with_strategy(question, strategy).await?;
        output::print_results(&results);
        println!();
    }

    let answer = service.answer_with_strategy(question, strategy).await;
    println!("{answer}");

    let history = InteractionLog::new(config.history_path());
    history.append(question, &answer)?;
    Ok(())
}

/// Retrieve records without generation
pub async fn handle_search(config: &AppConfig, query: &str, strategy: &str) -> Result<()> {
    let strategy = parse_strategy(strategy)?;
    let service = build_service(config).await?;

    let results = service.retrieve_with_strategy(query, strategy).await?;
    output::print_results(&results);
    Ok(())
}

/// Run one question through every strategy and compare answers and latency
pub async fn handle_compare(config: &AppConfig, question: &str) -> Result<()> {
    let service = build_service(config).await?;

    for strategy in [
        RetrievalStrategy::Fusion,
        RetrievalStrategy::Semantic,
        RetrievalStrategy::Lexical,
        RetrievalStrategy::ContextInjection,
    ] {
        output::print_section(&format!("Strategy: {}", strategy.as_str()));
        let start = Instant::now();
        let answer = service.answer_with_strategy(question, strategy).await;
        let elapsed = start.elapsed();
        println!("{answer}");
        println!("\n({:.2}s)", elapsed.as_secs_f64());
    }

    Ok(())
}

/// Show recent logged interactions
pub fn handle_history(config: &AppConfig, limit: usize) -> Result<()> {
    let history = InteractionLog::new(config.history_path());
    let interactions = history.recent(limit)?;

    if interactions.is_empty() {
        println!("No interactions logged yet.");
        return Ok(());
    }

    for interaction in interactions {
        println!(
            "[{}] Q: {}",
            interaction.ts.format("%Y-%m-%d %H:%M:%S"),
            interaction.question
        );
        println!("      A: {}", output::truncate_str(&interaction.answer, 120));
    }
    Ok(())
}

/// Show current configuration
pub fn handle_config(config: &AppConfig) -> Result<()> {
    println!("Knowledge base:  {}", config.knowledge_path());
    println!("History log:     {}", config.history_path());
    println!("Server:          {}:{}", config.server.host, config.server.port);
    println!(
        "Retrieval:       {} (semantic_k={}, lexical_k={}, weights={}/{})",
        config.retrieval.strategy,
        config.retrieval.semantic_k,
        config.retrieval.lexical_k,
        config.retrieval.semantic_weight,
        config.retrieval.lexical_weight,
    );
    println!(
        "Embeddings:      {} (dim {})",
        config.embedding_model(),
        config.embedding_dimension()
    );
    println!(
        "LLM:             {} @ {} (temperature {}, max_tokens {})",
        config.llm_model(),
        config.llm_endpoint(),
        config.temperature(),
        config.max_tokens(),
    );
    Ok(())
}

fn parse_strategy(name: &str) -> Result<RetrievalStrategy> {
    RetrievalStrategy::parse(name)
        .ok_or_else(|| FaqRagError::Config(format!("Unknown retrieval strategy: {name}")))
}
