//! Shared test fixtures: deterministic in-process embedder and generator,
//! so no test ever needs a model backend or the network.

// Not every test binary uses every fixture
#![allow(dead_code)]

use std::sync::Arc;

use faqrag::embeddings::Embedder;
use faqrag::errors::Result;
use faqrag::llm::Generator;
use faqrag::models::Record;
use faqrag::rag::prompts::REFUSAL_ANSWER;
use faqrag::rag::AnsweringOptions;
use faqrag::rag::AnsweringService;
use faqrag::FaqRagError;

/// Deterministic embedder: token-hash buckets over a small fixed dimension.
/// Shared-vocabulary texts land close together, which is all the retrieval
/// tests need.
pub struct HashEmbedder;

impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut v = vec![0.0f32; 32];
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let bucket = token
                .bytes()
                .fold(0usize, |acc, b| (acc * 31 + b as usize) % 32);
            v[bucket] += 1.0;
        }
        Ok(v)
    }
}

/// Embedder that always fails, for startup/retrieval error paths
pub struct FailingEmbedder;

impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(FaqRagError::Embedding("embedding backend down".to_string()))
    }
}

/// Generator that faithfully implements the verbatim-copy contract the
/// prompt asks for: if the final context block contains the question, return
/// the answer line that follows it; otherwise return the exact refusal.
pub struct VerbatimGenerator;

impl Generator for VerbatimGenerator {
    async fn generate(&self, prompt: &str, _temperature: f32, _max_tokens: usize) -> Result<String> {
        let section = prompt
            .rsplit("### NOW")
            .next()
            .ok_or_else(|| FaqRagError::Generation("malformed prompt".to_string()))?;

        let context_start = section
            .find("CONTEXT:\n")
            .ok_or_else(|| FaqRagError::Generation("no context block".to_string()))?
            + "CONTEXT:\n".len();
        let context_end = section
            .rfind("\nQ: ")
            .ok_or_else(|| FaqRagError::Generation("no question line".to_string()))?;
        let context = &section[context_start..context_end];

        let question = section[context_end + "\nQ: ".len()..]
            .lines()
            .next()
            .unwrap_or_default()
            .trim();

        let needle = format!("Q: {question}");
        if let Some(pos) = context.find(&needle) {
            if let Some(answer_pos) = context[pos..].find("\nA: ") {
                let answer = context[pos + answer_pos + "\nA: ".len()..]
                    .split("\n\n")
                    .next()
                    .unwrap_or_default();
                return Ok(answer.to_string());
            }
        }

        Ok(REFUSAL_ANSWER.to_string())
    }
}

/// Generator that always fails, for the fallback-string boundary tests
pub struct FailingGenerator;

impl Generator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _temperature: f32, _max_tokens: usize) -> Result<String> {
        Err(FaqRagError::Generation("model timeout".to_string()))
    }
}

/// Small corpus mirroring the knowledge base shape
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::new(
            "What is your refund policy?",
            "Annual plans may be cancelled within 30 days for a prorated refund.",
        ),
        Record::new(
            "How do I reset my password?",
            "Click 'Forgot password?' on the login page and follow the link.",
        ),
        Record::new(
            "Can I deploy on Kubernetes?",
            "Yes, Helm charts are published for every release.",
        ),
        Record::new(
            "How much does the Professional plan cost?",
            "The Professional plan costs $49 per user per month.",
        ),
        Record::new(
            "What security measures do you have in place?",
            "All data is encrypted at rest and in transit, with SOC 2 Type II audits.",
        ),
    ]
}

/// Build a service over the sample corpus with well-behaved mocks
pub async fn build_test_service() -> AnsweringService<HashEmbedder, VerbatimGenerator> {
    AnsweringService::build(
        sample_records(),
        Arc::new(HashEmbedder),
        Arc::new(VerbatimGenerator),
        AnsweringOptions::default(),
    )
    .await
    .expect("service build")
}
