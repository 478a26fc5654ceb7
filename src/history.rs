//! Append-only interaction log
//!
//! One JSON object per line; the answering path only ever appends, and the
//! history endpoint reads the most recent entries back. The retrieval core
//! never reads this log.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use tracing::debug;
use tracing::warn;

use crate::errors::Result;
use crate::models::Interaction;

/// File-backed interaction log
pub struct InteractionLog {
    path: PathBuf,
    // Serializes appends from concurrent request handlers
    write_lock: Mutex<()>,
}

impl InteractionLog {
    /// Create a log backed by the given file; the file is created on first append
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Append a question/answer pair, timestamped now
    pub fn append(&self, question: &str, answer: &str) -> Result<Interaction> {
        let interaction = Interaction {
            question: question.to_string(),
            answer: answer.to_string(),
            ts: Utc::now(),
        };
        let line = serde_json::to_string(&interaction)?;

        let guard = self.write_lock.lock().map_err(|_| {
            crate::FaqRagError::History("interaction log lock poisoned".to_string())
        })?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        drop(guard);

        debug!("Logged interaction: {}", interaction.question);
        Ok(interaction)
    }

    /// Return the most recent `limit` interactions, newest first.
    ///
    /// A log file that does not exist yet reads as empty.
    pub fn recent(&self, limit: usize) -> Result<Vec<Interaction>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut interactions: Vec<Interaction> = Vec::new();
        for line in raw.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(interaction) => interactions.push(interaction),
                Err(e) => warn!("Skipping unreadable history line: {e}"),
            }
        }

        let skip = interactions.len().saturating_sub(limit);
        let mut recent: Vec<Interaction> = interactions.into_iter().skip(skip).collect();
        recent.reverse();
        Ok(recent)
    }
}
