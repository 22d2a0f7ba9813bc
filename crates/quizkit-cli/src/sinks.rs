//! Completion sinks used by the `play` command.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::{CompletionSink, QuizResult, RunRecord};

use crate::display::{percentage, ResultTier};

/// Prints the final score and a message tier.
pub struct ConsoleSink<'a> {
    out: &'a mut dyn Write,
}

impl<'a> ConsoleSink<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out }
    }
}

impl CompletionSink for ConsoleSink<'_> {
    fn on_complete(&mut self, result: &QuizResult) -> Result<()> {
        let percent = percentage(result.score, result.total);
        writeln!(self.out)?;
        if result.forced {
            writeln!(
                self.out,
                "Quiz ended early: {} of {} questions answered.",
                result.answers.len(),
                result.total
            )?;
        }
        writeln!(
            self.out,
            "Score: {}/{} ({percent}%)",
            result.score, result.total
        )?;
        writeln!(self.out, "{}", ResultTier::from_percentage(percent))?;
        Ok(())
    }
}

/// Saves each result as a JSON [`RunRecord`] in a directory.
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl CompletionSink for JsonFileSink {
    fn on_complete(&mut self, result: &QuizResult) -> Result<()> {
        let record = RunRecord::new(result.clone());
        let path = self.dir.join(record.file_name());
        record.save_json(&path)?;
        tracing::info!("saved run {} to {}", record.id, path.display());
        Ok(())
    }
}
