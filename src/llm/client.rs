//! LLM API client for Ollama and `OpenAI` providers

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::errors::Result;
use crate::llm::Generator;
use crate::FaqRagError;

/// Supported generation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// `OpenAI` chat completions API
    OpenAi,
    /// Ollama local generation
    Ollama,
}

/// Client for text generation over HTTP
pub struct LlmClient {
    provider: LlmProvider,
    model: String,
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl LlmClient {
    /// Create a generation client from the application config
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        let provider = if config.llm_key() == "ollama" {
            LlmProvider::Ollama
        } else if config.llm_endpoint().contains("api.openai.com") {
            LlmProvider::OpenAi
        } else if config.llm_endpoint().contains("localhost") {
            LlmProvider::Ollama
        } else {
            LlmProvider::OpenAi
        };

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs()))
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| FaqRagError::Http(e.to_string()))?;

        Ok(Self {
            provider,
            model: config.llm_model().to_string(),
            endpoint: config.llm_endpoint().to_string(),
            api_key: if provider == LlmProvider::OpenAi {
                Some(config.llm_key().to_string())
            } else {
                None
            },
            client,
        })
    }

    /// Generate a completion with the given sampling parameters
    ///
    /// # Errors
    /// - API request failures (network errors, timeouts, authentication failures)
    /// - Invalid API responses (malformed JSON, empty choices)
    pub async fn generate_with_params(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> Result<String> {
        match self.provider {
            LlmProvider::OpenAi => self.generate_openai(prompt, temperature, max_tokens).await,
            LlmProvider::Ollama => self.generate_ollama(prompt, temperature, max_tokens).await,
        }
    }

    /// Generate using the `OpenAI` chat completions API
    async fn generate_openai(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| FaqRagError::Config("OpenAI API key not provided".to_string()))?;

        #[derive(Serialize)]
        struct ChatMessage<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage<'a>>,
            temperature: f32,
            max_tokens: usize,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ResponseMessage,
        }

        #[derive(Deserialize)]
        struct ResponseMessage {
            content: String,
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling OpenAI chat completions API: {}", url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| FaqRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FaqRagError::Generation(format!(
                "OpenAI API error ({status}): {error_text}"
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| FaqRagError::Generation(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| FaqRagError::Generation("No completion in response".to_string()))
    }

    /// Generate using the Ollama API
    async fn generate_ollama(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct OllamaOptions {
            temperature: f32,
            num_predict: usize,
        }

        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
            stream: bool,
            options: OllamaOptions,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            response: String,
        }

        let url = format!("{}/api/generate", self.endpoint);
        debug!("Calling Ollama generate API: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: OllamaOptions {
                temperature,
                num_predict: max_tokens,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| FaqRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FaqRagError::Generation(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| FaqRagError::Generation(format!("Failed to parse response: {e}")))?;

        Ok(result.response)
    }
}

impl Generator for LlmClient {
    async fn generate(&self, prompt: &str, temperature: f32, max_tokens: usize) -> Result<String> {
        self.generate_with_params(prompt, temperature, max_tokens).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_provider_detection_from_config() {
        let config = AppConfig::default();
        let client = LlmClient::from_config(&config).unwrap();
        assert_eq!(client.provider, LlmProvider::Ollama);
        assert!(client.api_key.is_none());
    }

    #[tokio::test]
    #[ignore = "Requires a running Ollama instance"]
    async fn test_ollama_generation() {
        let config = AppConfig::default();
        let client = LlmClient::from_config(&config).unwrap();
        let answer = client.generate_with_params("Say hi.", 0.3, 32).await.unwrap();
        assert!(!answer.is_empty());
    }
}
