//! Text generation module
//!
//! Provides the [`Generator`] capability used by the prompted answerer and an
//! HTTP [`LlmClient`] implementation for Ollama and `OpenAI` providers.

pub mod client;

pub use client::LlmClient;
pub use client::LlmProvider;

use std::future::Future;

use crate::errors::Result;

/// Capability for turning a prompt into generated text
pub trait Generator: Send + Sync {
    /// Generate a completion for the given prompt
    fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> impl Future<Output = Result<String>> + Send;
}
