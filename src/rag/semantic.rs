//! In-memory semantic index over record embeddings
//!
//! Every record body is embedded once at build time; vectors are
//! L2-normalized so cosine similarity reduces to a dot product at query time.
//! The same [`Embedder`] must be used for build and query, otherwise the two
//! embedding spaces silently diverge and the ranking is meaningless.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::embeddings::Embedder;
use crate::embeddings::BUILD_CONCURRENCY;
use crate::errors::Result;
use crate::models::Record;
use crate::rag::RankSource;
use crate::rag::SearchResult;

/// Similarity-searchable store of `(vector, record)` pairs
pub struct SemanticIndex {
    records: Vec<Arc<Record>>,
    /// L2-normalized embedding per record, in corpus order
    vectors: Vec<Vec<f32>>,
}

impl SemanticIndex {
    /// Embed every record body and build the index.
    ///
    /// # Errors
    /// Any embedding failure propagates: the service cannot start without a
    /// complete index, so build errors are fatal at startup.
    pub async fn build<E: Embedder>(records: &[Arc<Record>], embedder: &E) -> Result<Self> {
        let embeddings: Vec<Result<Vec<f32>>> = stream::iter(records.iter())
            .map(|record| async move { embedder.embed(&record.body).await })
            .buffered(BUILD_CONCURRENCY)
            .collect()
            .await;

        let mut vectors = Vec::with_capacity(records.len());
        for embedding in embeddings {
            vectors.push(normalize(embedding?));
        }

        debug!("Built semantic index: {} vectors", vectors.len());

        Ok(Self {
            records: records.to_vec(),
            vectors,
        })
    }

    /// Embed the query and return the top-k records by cosine similarity,
    /// descending; ties resolve to corpus order.
    ///
    /// An empty index returns an empty list without calling the embedder, so
    /// an empty corpus never needs the network. A query-time embedding failure
    /// propagates as a retrieval error for the caller to handle.
    pub async fn search<E: Embedder>(
        &self,
        embedder: &E,
        query: &str,
        k: usize,
    ) -> Result<Vec<SearchResult>> {
        if self.records.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_vec = normalize(embedder.embed(query).await?);

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(doc, vec)| (doc, dot(vec, &query_vec)))
            .collect();

        // Stable sort keeps corpus order for equal similarities
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(doc, score)| SearchResult {
                record: Arc::clone(&self.records[doc]),
                score,
                source: RankSource::Semantic,
            })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn normalize(mut v: Vec<f32>) -> Vec<f32> {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut v {
            *x /= norm;
        }
    }
    v
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
