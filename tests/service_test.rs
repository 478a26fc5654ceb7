//! End-to-end tests for the answering service over an in-memory corpus

mod common;

use std::io::Write;
use std::sync::Arc;

use faqrag::knowledge::load_knowledge;
use faqrag::rag::prompts::{FALLBACK_ANSWER, REFUSAL_ANSWER};
use faqrag::rag::AnsweringOptions;
use faqrag::rag::AnsweringService;
use faqrag::rag::RetrievalStrategy;

use common::{
    build_test_service, sample_records, FailingEmbedder, FailingGenerator, HashEmbedder,
    VerbatimGenerator,
};

#[tokio::test]
async fn test_answer_copies_from_matching_record() {
    let service = build_test_service().await;

    let answer = service.answer("What is your refund policy?").await;
    assert!(
        answer.contains("30 days"),
        "expected grounded answer, got: {answer}"
    );
}

#[tokio::test]
async fn test_answer_refuses_when_corpus_has_no_match() {
    let service = build_test_service().await;

    let answer = service.answer("Why is the sky blue?").await;
    assert_eq!(answer, REFUSAL_ANSWER);
}

#[tokio::test]
async fn test_generation_failure_yields_fallback_string() {
    let service = AnsweringService::build(
        sample_records(),
        Arc::new(HashEmbedder),
        Arc::new(FailingGenerator),
        AnsweringOptions::default(),
    )
    .await
    .expect("service build");

    let answer = service.answer("What is your refund policy?").await;
    assert_eq!(answer, FALLBACK_ANSWER);
}

#[tokio::test]
async fn test_build_fails_when_embedding_backend_is_down() {
    let result = AnsweringService::build(
        sample_records(),
        Arc::new(FailingEmbedder),
        Arc::new(VerbatimGenerator),
        AnsweringOptions::default(),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_empty_corpus_answers_and_retrieves_without_error() {
    // Embedding must never be called for an empty corpus, so a failing
    // embedder proves the short-circuit.
    let service = AnsweringService::build(
        Vec::new(),
        Arc::new(FailingEmbedder),
        Arc::new(VerbatimGenerator),
        AnsweringOptions::default(),
    )
    .await
    .expect("empty corpus is a valid degraded mode");

    for strategy in [
        RetrievalStrategy::Fusion,
        RetrievalStrategy::Semantic,
        RetrievalStrategy::Lexical,
        RetrievalStrategy::ContextInjection,
    ] {
        let results = service
            .retrieve_with_strategy("anything", strategy)
            .await
            .expect("retrieval over empty corpus");
        assert!(results.is_empty(), "{:?} returned records", strategy);
    }

    let answer = service.answer("anything").await;
    assert_eq!(answer, REFUSAL_ANSWER);
}

#[tokio::test]
async fn test_fused_results_stay_within_union_and_budget() {
    let service = build_test_service().await;
    let query = "refund policy for annual plans";

    let fused = service
        .retrieve_with_strategy(query, RetrievalStrategy::Fusion)
        .await
        .unwrap();
    let semantic = service
        .retrieve_with_strategy(query, RetrievalStrategy::Semantic)
        .await
        .unwrap();
    let lexical = service
        .retrieve_with_strategy(query, RetrievalStrategy::Lexical)
        .await
        .unwrap();

    let opts = service.options();
    assert!(fused.len() <= opts.semantic_k + opts.lexical_k);

    for result in &fused {
        let in_semantic = semantic
            .iter()
            .any(|r| r.record.question == result.record.question);
        let in_lexical = lexical
            .iter()
            .any(|r| r.record.question == result.record.question);
        assert!(
            in_semantic || in_lexical,
            "fused record {:?} came from neither input list",
            result.record.question
        );
    }
}

#[tokio::test]
async fn test_retrieval_is_deterministic_across_calls() {
    let service = build_test_service().await;
    let query = "password reset";

    let first: Vec<String> = service
        .retrieve(query)
        .await
        .unwrap()
        .iter()
        .map(|r| r.record.question.clone())
        .collect();
    let second: Vec<String> = service
        .retrieve(query)
        .await
        .unwrap()
        .iter()
        .map(|r| r.record.question.clone())
        .collect();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_context_injection_reports_whole_corpus_in_order() {
    let service = build_test_service().await;

    let results = service
        .retrieve_with_strategy("whatever", RetrievalStrategy::ContextInjection)
        .await
        .unwrap();

    let questions: Vec<&str> = results.iter().map(|r| r.record.question.as_str()).collect();
    let expected: Vec<String> = sample_records().into_iter().map(|r| r.question).collect();
    assert_eq!(questions, expected.iter().map(String::as_str).collect::<Vec<_>>());
    assert!(results.iter().all(|r| r.score == 0.0));
}

#[tokio::test]
async fn test_context_injection_answers_any_corpus_question() {
    let service = build_test_service().await;

    // Records never surfaced by top-k retrieval are still answerable when
    // the whole corpus is injected.
    let answer = service
        .answer_with_strategy(
            "What security measures do you have in place?",
            RetrievalStrategy::ContextInjection,
        )
        .await;
    assert!(answer.contains("SOC 2"), "got: {answer}");
}

#[tokio::test]
async fn test_loaded_corpus_round_trips_through_both_indexes() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "Q: What is the uptime guarantee?\nA: The SLA guarantees 99.9% monthly uptime.\n---\n\
         Q: Where are the data centers?\nA: Data centers run in the US, EU and APAC regions.\n---\n"
    )
    .unwrap();

    let records = load_knowledge(file.path()).unwrap();
    assert_eq!(records.len(), 2);

    let service = AnsweringService::build(
        records,
        Arc::new(HashEmbedder),
        Arc::new(VerbatimGenerator),
        AnsweringOptions::default(),
    )
    .await
    .unwrap();

    let lexical = service
        .retrieve_with_strategy("uptime guarantee", RetrievalStrategy::Lexical)
        .await
        .unwrap();
    assert_eq!(lexical[0].record.question, "What is the uptime guarantee?");

    let semantic = service
        .retrieve_with_strategy("What is the uptime guarantee?", RetrievalStrategy::Semantic)
        .await
        .unwrap();
    assert_eq!(semantic[0].record.question, "What is the uptime guarantee?");

    let answer = service.answer("What is the uptime guarantee?").await;
    assert!(answer.contains("99.9%"), "got: {answer}");
}
