//! FAQ answering service with hybrid retrieval
//!
//! Indexes a static Q/A corpus with both BM25 and embedding search, fuses the
//! two rankings, and answers questions through a verbatim-constrained prompt.
//! Exposed over an HTTP API and a CLI; see [`rag`] for the core pipeline.

pub mod api;
pub mod cli;
pub mod config;
pub mod embeddings;
pub mod errors;
pub mod history;
pub mod knowledge;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;

pub use config::AppConfig;
pub use errors::*;
