//! Weighted rank fusion of semantic and lexical result lists
//!
//! Raw scores from the two sources live on incomparable scales (BM25 is
//! unbounded and corpus-dependent, cosine similarity is bounded), so fusion
//! scores each candidate by its rank within its own list: `w / (1 + rank)`.
//! A record surfaced by both lists accumulates both weighted contributions.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::embeddings::Embedder;
use crate::errors::Result;
use crate::rag::LexicalIndex;
use crate::rag::RankSource;
use crate::rag::SearchResult;
use crate::rag::SemanticIndex;

/// Per-source fusion weights; deployed default 0.6 semantic / 0.4 lexical
#[derive(Debug, Clone, Copy)]
pub struct FusionWeights {
    pub semantic: f32,
    pub lexical: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            semantic: 0.6,
            lexical: 0.4,
        }
    }
}

/// Merge two ranked lists into one, unique by record.
///
/// The semantic list is scanned before the lexical list; first-encounter
/// order is preserved through the stable sort and is the only tie-break, so
/// fused output is fully deterministic. Output size is bounded by the sum of
/// the input list lengths.
pub fn fuse(
    semantic: Vec<SearchResult>,
    lexical: Vec<SearchResult>,
    weights: FusionWeights,
) -> Vec<SearchResult> {
    let mut by_question: HashMap<String, usize> = HashMap::new();
    let mut fused: Vec<SearchResult> = Vec::new();

    let mut accumulate = |hits: Vec<SearchResult>, weight: f32| {
        for (rank, hit) in hits.into_iter().enumerate() {
            let contribution = weight / (1.0 + rank as f32);
            match by_question.get(hit.record.question.as_str()) {
                Some(&idx) => fused[idx].score += contribution,
                None => {
                    by_question.insert(hit.record.question.clone(), fused.len());
                    fused.push(SearchResult {
                        record: hit.record,
                        score: contribution,
                        source: RankSource::Fused,
                    });
                }
            }
        }
    };

    accumulate(semantic, weights.semantic);
    accumulate(lexical, weights.lexical);

    fused.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    fused
}

/// Retriever combining both indexes behind one top-K contract
pub struct FusionRetriever<E: Embedder> {
    semantic: SemanticIndex,
    lexical: LexicalIndex,
    embedder: Arc<E>,
    weights: FusionWeights,
    semantic_k: usize,
    lexical_k: usize,
}

impl<E: Embedder> FusionRetriever<E> {
    pub fn new(
        semantic: SemanticIndex,
        lexical: LexicalIndex,
        embedder: Arc<E>,
        weights: FusionWeights,
        semantic_k: usize,
        lexical_k: usize,
    ) -> Self {
        Self {
            semantic,
            lexical,
            embedder,
            weights,
            semantic_k,
            lexical_k,
        }
    }

    /// Run both sub-indexes and fuse their rankings.
    ///
    /// The embed+search path and the lexical scoring pass are independent, so
    /// they run concurrently and join before fusion.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>> {
        let (semantic_hits, lexical_hits) = tokio::join!(
            self.semantic.search(self.embedder.as_ref(), query, self.semantic_k),
            async { self.lexical.search(query, self.lexical_k) },
        );
        let semantic_hits = semantic_hits?;

        debug!(
            "Fusing {} semantic + {} lexical hits",
            semantic_hits.len(),
            lexical_hits.len()
        );
        Ok(fuse(semantic_hits, lexical_hits, self.weights))
    }

    /// Semantic sub-index only (comparison strategies)
    pub async fn retrieve_semantic(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.semantic
            .search(self.embedder.as_ref(), query, self.semantic_k)
            .await
    }

    /// Lexical sub-index only (comparison strategies)
    pub fn retrieve_lexical(&self, query: &str) -> Vec<SearchResult> {
        self.lexical.search(query, self.lexical_k)
    }
}
