//! Core data types shared across the service

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// One knowledge unit from the Q/A corpus.
///
/// The `body` always reproduces the `question` verbatim, so lexical matches on
/// the question surface are discoverable through body scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Canonical question text, used as the lookup key
    pub question: String,
    /// Full "Q: ... A: ..." block presented as retrieval content
    pub body: String,
}

impl Record {
    /// Build a record from a question/answer pair
    pub fn new(question: impl Into<String>, answer: impl AsRef<str>) -> Self {
        let question = question.into();
        let body = format!("Q: {}\nA: {}", question, answer.as_ref());
        Self { question, body }
    }
}

/// A logged question/answer interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub question: String,
    pub answer: String,
    pub ts: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_body_reproduces_question() {
        let record = Record::new("What is your refund policy?", "30 days, prorated.");
        assert!(record.body.contains("What is your refund policy?"));
        assert!(record.body.contains("30 days, prorated."));
        assert!(record.body.starts_with("Q: "));
    }

    #[test]
    fn test_interaction_round_trips_through_json() {
        let interaction = Interaction {
            question: "Q1".to_string(),
            answer: "A1".to_string(),
            ts: Utc::now(),
        };
        let line = serde_json::to_string(&interaction).expect("serialize");
        let back: Interaction = serde_json::from_str(&line).expect("deserialize");
        assert_eq!(back.question, "Q1");
        assert_eq!(back.answer, "A1");
    }
}
