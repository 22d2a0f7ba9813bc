//! The `quizkit history` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizkit_core::RunRecord;

use crate::config::load_config_from;
use crate::display::percentage;

pub fn execute(quiz: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let records: Vec<RunRecord> = RunRecord::load_dir(&config.results_dir)?
        .into_iter()
        .filter(|r| quiz.as_ref().map_or(true, |q| &r.result.quiz_id == q))
        .collect();

    if records.is_empty() {
        println!("No saved runs in {}.", config.results_dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Completed", "Quiz", "Score", "%", "Ended early"]);

    for record in &records {
        let r = &record.result;
        table.add_row(vec![
            Cell::new(record.completed_at.format("%Y-%m-%d %H:%M")),
            Cell::new(&r.quiz_id),
            Cell::new(format!("{}/{}", r.score, r.total)),
            Cell::new(format!("{}%", percentage(r.score, r.total))),
            Cell::new(if r.forced { "yes" } else { "" }),
        ]);
    }

    println!("{table}");

    Ok(())
}
