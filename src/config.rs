use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub backtrace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Path to the Q/A corpus file parsed at startup
    pub path: String,
    /// Path to the append-only interaction log
    #[serde(default = "default_history_path")]
    pub history_path: String,
}

fn default_history_path() -> String {
    "history.jsonl".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Default strategy: "fusion", "semantic", "lexical" or "inject"
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_k")]
    pub semantic_k: usize,
    #[serde(default = "default_k")]
    pub lexical_k: usize,
    #[serde(default = "default_semantic_weight")]
    pub semantic_weight: f32,
    #[serde(default = "default_lexical_weight")]
    pub lexical_weight: f32,
}

fn default_strategy() -> String {
    "fusion".to_string()
}

fn default_k() -> usize {
    3
}

fn default_semantic_weight() -> f32 {
    0.6
}

fn default_lexical_weight() -> f32 {
    0.4
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    pub dimension: usize,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub llm_endpoint: String,
    pub llm_key: String,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
    /// Low temperature keeps the verbatim-copy behavior stable
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_llm_model() -> String {
    "mistral".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> usize {
    512
}

fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    pub embeddings: EmbeddingsConfig,
    pub llm: LlmConfig,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            semantic_k: default_k(),
            lexical_k: default_k(),
            semantic_weight: default_semantic_weight(),
            lexical_weight: default_lexical_weight(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(crate::FaqRagError::Io)?;

        let config: AppConfig =
            toml::from_str(&content).map_err(crate::FaqRagError::TomlParsing)?;

        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            println!(
                "Warning: Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(crate::FaqRagError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    /// Get knowledge base file path
    pub fn knowledge_path(&self) -> &str {
        &self.knowledge.path
    }

    /// Get interaction history file path
    pub fn history_path(&self) -> &str {
        &self.knowledge.history_path
    }

    /// Get embedding dimension
    pub fn embedding_dimension(&self) -> usize {
        self.embeddings.dimension
    }

    /// Get embedding model name
    pub fn embedding_model(&self) -> &str {
        &self.embeddings.model
    }

    /// Get LLM endpoint
    pub fn llm_endpoint(&self) -> &str {
        &self.llm.llm_endpoint
    }

    /// Get LLM key
    pub fn llm_key(&self) -> &str {
        &self.llm.llm_key
    }

    /// Get LLM model
    pub fn llm_model(&self) -> &str {
        &self.llm.llm_model
    }

    /// Get generation temperature
    pub fn temperature(&self) -> f32 {
        self.llm.temperature
    }

    /// Get generation token cap
    pub fn max_tokens(&self) -> usize {
        self.llm.max_tokens
    }

    /// Get model call timeout in seconds
    pub fn timeout_secs(&self) -> u64 {
        self.llm.timeout_secs
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                enable_cors: false,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                backtrace: true,
            },
            knowledge: KnowledgeConfig {
                path: "knowledge_base.txt".to_string(),
                history_path: default_history_path(),
            },
            retrieval: RetrievalConfig::default(),
            embeddings: EmbeddingsConfig {
                dimension: 768,
                model: "nomic-embed-text".to_string(),
            },
            llm: LlmConfig {
                llm_endpoint: "http://localhost:11434".to_string(),
                llm_key: "ollama".to_string(),
                llm_model: default_llm_model(),
                temperature: default_temperature(),
                max_tokens: default_max_tokens(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.retrieval.semantic_k, 3);
        assert!((config.retrieval.semantic_weight - 0.6).abs() < f32::EPSILON);
        assert!((config.retrieval.lexical_weight - 0.4).abs() < f32::EPSILON);
        assert_eq!(config.llm_model(), "mistral");
    }

    #[test]
    fn test_from_toml_with_defaults() {
        let toml_str = r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [logging]
            level = "debug"
            backtrace = false

            [knowledge]
            path = "kb.txt"

            [embeddings]
            dimension = 1536
            model = "text-embedding-3-small"

            [llm]
            llm_endpoint = "https://api.openai.com/v1"
            llm_key = "sk-test"
        "#;

        let config: AppConfig = toml::from_str(toml_str).expect("valid config");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.history_path(), "history.jsonl");
        assert_eq!(config.retrieval.strategy, "fusion");
        assert_eq!(config.llm_model(), "mistral");
        assert!((config.temperature() - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.max_tokens(), 512);
    }

    #[test]
    fn test_from_file_missing() {
        let result = AppConfig::from_file("definitely/not/here.toml");
        assert!(result.is_err());
    }
}
