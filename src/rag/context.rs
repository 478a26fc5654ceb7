//! Context assembly from retrieved records

use std::sync::Arc;

use crate::models::Record;
use crate::rag::SearchResult;

/// Separator between record bodies in assembled context
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Concatenate retrieved record bodies into one context block
pub fn assemble_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.record.body.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// Concatenate the entire corpus, in corpus order, ignoring the query.
///
/// Context grows linearly with corpus size; this strategy stops working once
/// the corpus no longer fits the model's context window.
pub fn inject_full_corpus(records: &[Arc<Record>]) -> String {
    records
        .iter()
        .map(|r| r.body.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}
