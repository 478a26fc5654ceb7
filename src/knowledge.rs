//! Knowledge base loader
//!
//! Parses a plain-text corpus of question/answer blocks into [`Record`]s:
//!
//! ```text
//! Q: What is your refund policy?
//! A: Annual plans may be cancelled within 30 days for a prorated refund.
//! ---
//! Q: How do I reset my password?
//! A: Click 'Forgot password?' on the login page and follow the link.
//! ---
//! ```
//!
//! Answers may span multiple lines up to the `---` delimiter. Blocks without a
//! `Q:` and `A:` line are skipped. Record order in the returned list is the
//! canonical corpus order used for deterministic tie-breaks everywhere else.

use std::path::Path;

use tracing::debug;

use crate::errors::Result;
use crate::models::Record;

/// Load Q/A records from a knowledge base file.
///
/// A missing or unreadable file is an error (the service must not start
/// without its corpus); a file that parses to zero records is valid and
/// degrades every answer to the refusal path.
pub fn load_knowledge<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let records = parse_records(&raw);
    debug!(
        "Loaded {} records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Parse raw corpus text into records
pub fn parse_records(raw: &str) -> Vec<Record> {
    let mut records = Vec::new();

    for block in split_blocks(raw) {
        if let Some(record) = parse_block(&block) {
            records.push(record);
        }
    }

    records
}

/// Split raw text into blocks delimited by `---` lines
fn split_blocks(raw: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in raw.lines() {
        if line.trim_start().starts_with("---") {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Extract the question and answer from one block, if both are present
fn parse_block(lines: &[&str]) -> Option<Record> {
    let mut question: Option<String> = None;
    let mut answer_lines: Vec<&str> = Vec::new();
    let mut in_answer = false;

    for line in lines {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix("Q:") {
            question = Some(rest.trim().to_string());
            in_answer = false;
        } else if let Some(rest) = trimmed.strip_prefix("A:") {
            answer_lines.push(rest.trim_start());
            in_answer = true;
        } else if in_answer {
            answer_lines.push(line);
        }
    }

    let question = question?;
    if question.is_empty() || answer_lines.is_empty() {
        return None;
    }

    let answer = answer_lines.join("\n").trim().to_string();
    if answer.is_empty() {
        return None;
    }

    Some(Record::new(question, answer))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_single_record() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "Q: test?\nA: answer.\n---").expect("write");

        let records = load_knowledge(file.path()).expect("load");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "test?");
        assert!(records[0].body.contains("test?"));
        assert!(records[0].body.contains("answer."));
    }

    #[test]
    fn test_load_multiple_records_keeps_order() {
        let raw = "Q: First question?\nA: First answer.\n\n---\n\nQ: Second question?\nA: Second answer.\n\n---";
        let records = parse_records(raw);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].question, "First question?");
        assert_eq!(records[1].question, "Second question?");
    }

    #[test]
    fn test_load_empty_file() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let records = load_knowledge(file.path()).expect("load");
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_knowledge("no/such/corpus.txt").is_err());
    }

    #[test]
    fn test_multiline_answer() {
        let raw = "Q: How do I deploy?\nA: First install the CLI.\nThen run deploy.\n---";
        let records = parse_records(raw);
        assert_eq!(records.len(), 1);
        assert!(records[0].body.contains("First install the CLI."));
        assert!(records[0].body.contains("Then run deploy."));
    }

    #[test]
    fn test_malformed_blocks_are_skipped() {
        let raw = "just some prose\n---\nQ: only a question\n---\nQ: ok?\nA: yes.\n---";
        let records = parse_records(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "ok?");
    }

    #[test]
    fn test_final_block_without_delimiter() {
        let raw = "Q: trailing?\nA: still parsed.";
        let records = parse_records(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "trailing?");
    }
}
