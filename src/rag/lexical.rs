//! In-memory BM25 index over record bodies
//!
//! Ranks records by sparse keyword overlap with a query: inverse document
//! frequency weighting, term-frequency saturation and document-length
//! normalization. Building and querying never touch the network.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::models::Record;
use crate::rag::RankSource;
use crate::rag::SearchResult;

const K1: f32 = 1.2;
const B: f32 = 0.75;

/// Lowercase alphanumeric tokenizer shared by build and query time
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// BM25 term-statistics index, rebuilt fully at startup
pub struct LexicalIndex {
    records: Vec<Arc<Record>>,
    /// Per-record term frequencies
    term_freqs: Vec<HashMap<String, u32>>,
    /// Per-record token count
    doc_lens: Vec<f32>,
    /// Number of records containing each term
    doc_freqs: HashMap<String, u32>,
    avg_doc_len: f32,
}

impl LexicalIndex {
    /// Build the index from all records, in corpus order
    pub fn build(records: &[Arc<Record>]) -> Self {
        let mut term_freqs = Vec::with_capacity(records.len());
        let mut doc_lens = Vec::with_capacity(records.len());
        let mut doc_freqs: HashMap<String, u32> = HashMap::new();

        for record in records {
            let tokens = tokenize(&record.body);
            doc_lens.push(tokens.len() as f32);

            let mut freqs: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *freqs.entry(token).or_insert(0) += 1;
            }
            for term in freqs.keys() {
                *doc_freqs.entry(term.clone()).or_insert(0) += 1;
            }
            term_freqs.push(freqs);
        }

        let avg_doc_len = if doc_lens.is_empty() {
            0.0
        } else {
            doc_lens.iter().sum::<f32>() / doc_lens.len() as f32
        };

        debug!(
            "Built lexical index: {} records, {} distinct terms",
            records.len(),
            doc_freqs.len()
        );

        Self {
            records: records.to_vec(),
            term_freqs,
            doc_lens,
            doc_freqs,
            avg_doc_len,
        }
    }

    /// Return the top-k records by BM25 score, descending.
    ///
    /// Deterministic by construction: ties (including the all-zero case when
    /// no query term overlaps the corpus) resolve to corpus order, so a query
    /// with no overlap returns the first k records in corpus order.
    pub fn search(&self, query: &str, k: usize) -> Vec<SearchResult> {
        if self.records.is_empty() || k == 0 {
            return Vec::new();
        }

        let query_terms = tokenize(query);
        let n = self.records.len() as f32;

        let mut scored: Vec<(usize, f32)> = (0..self.records.len())
            .map(|doc| {
                let mut score = 0.0;
                for term in &query_terms {
                    let Some(&df) = self.doc_freqs.get(term) else {
                        continue;
                    };
                    let Some(&tf) = self.term_freqs[doc].get(term) else {
                        continue;
                    };
                    let tf = tf as f32;
                    let idf = ((n - df as f32 + 0.5) / (df as f32 + 0.5) + 1.0).ln();
                    let norm = K1 * (1.0 - B + B * self.doc_lens[doc] / self.avg_doc_len);
                    score += idf * tf * (K1 + 1.0) / (tf + norm);
                }
                (doc, score)
            })
            .collect();

        // Stable sort keeps corpus order for equal scores
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .take(k)
            .map(|(doc, score)| SearchResult {
                record: Arc::clone(&self.records[doc]),
                score,
                source: RankSource::Lexical,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
