//! Quiz results and their JSON persistence.
//!
//! A session produces a [`QuizResult`] once it completes. Sessions never
//! persist anything themselves; a completion sink may turn the result into
//! a [`RunRecord`] and save it.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The outcome of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub quiz_id: String,
    pub quiz_title: String,
    /// Number of correct answers, never more than `total`.
    pub score: usize,
    /// Number of questions in the quiz.
    pub total: usize,
    /// Recorded answers in question order. Unanswered questions are absent.
    pub answers: Vec<AnswerRecord>,
    /// Whether the session was force-completed before the last question.
    #[serde(default)]
    pub forced: bool,
}

/// A single recorded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub option_id: String,
    pub is_correct: bool,
}

/// A persisted quiz run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Unique run identifier.
    pub id: Uuid,
    /// When the run finished.
    pub completed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: QuizResult,
}

impl RunRecord {
    /// Stamp a result with a fresh id and the current time.
    pub fn new(result: QuizResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            completed_at: Utc::now(),
            result,
        }
    }

    /// File name used when saving into a results directory.
    ///
    /// Includes the run id, so runs finishing in the same second never collide.
    pub fn file_name(&self) -> String {
        format!(
            "{}-{}-{}.json",
            self.result.quiz_id,
            self.completed_at.format("%Y%m%dT%H%M%S"),
            self.id.simple()
        )
    }

    /// Save the record as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize run record")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write run record to {}", path.display()))?;
        Ok(())
    }

    /// Load a record from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read run record from {}", path.display()))?;
        let record: RunRecord = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse run record: {}", path.display()))?;
        Ok(record)
    }

    /// Load every `.json` record in `dir`, oldest first.
    ///
    /// A missing directory yields no records. Unreadable files are skipped
    /// with a warning.
    pub fn load_dir(dir: &Path) -> Result<Vec<Self>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("failed to read directory: {}", dir.display()))?
        {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                match Self::load_json(&path) {
                    Ok(record) => records.push(record),
                    Err(e) => tracing::warn!("skipping {}: {:#}", path.display(), e),
                }
            }
        }

        records.sort_by_key(|r| r.completed_at);
        Ok(records)
    }
}
