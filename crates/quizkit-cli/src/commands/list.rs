//! The `quizkit list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use crate::config::load_config_from;
use crate::display::format_duration_secs;

pub fn execute(category: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = config.load_catalog()?;

    let quizzes: Vec<_> = match &category {
        Some(c) => catalog.get_quizzes_by_category(c).collect(),
        None => catalog.quizzes().iter().collect(),
    };

    if quizzes.is_empty() {
        match &category {
            Some(c) => println!("No quizzes in category \"{c}\"."),
            None => println!("No quizzes available."),
        }
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Title",
        "Difficulty",
        "Category",
        "Questions",
        "Time limit",
    ]);

    for quiz in &quizzes {
        table.add_row(vec![
            Cell::new(&quiz.id),
            Cell::new(&quiz.title),
            Cell::new(quiz.difficulty),
            Cell::new(&quiz.category),
            Cell::new(quiz.questions.len()),
            Cell::new(
                quiz.time_limit_secs
                    .map(format_duration_secs)
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    println!("{table}");
    println!("{} quiz(zes)", quizzes.len());

    Ok(())
}
