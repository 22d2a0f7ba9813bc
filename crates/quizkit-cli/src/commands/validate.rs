//! The `quizkit validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::parser;

pub fn execute(quiz_set_path: PathBuf) -> Result<()> {
    let mut total_errors = 0;
    let mut total_warnings = 0;

    let sets = if quiz_set_path.is_dir() {
        let mut sets = Vec::new();
        for (path, parsed) in parser::parse_quiz_directory(&quiz_set_path)? {
            match parsed {
                Ok(set) => sets.push(set),
                Err(e) => {
                    println!("File: {}", path.display());
                    println!("  ERROR: {e:#}");
                    total_errors += 1;
                }
            }
        }
        sets
    } else {
        vec![parser::parse_quiz_set(&quiz_set_path)?]
    };

    for set in &sets {
        println!("Quiz set: {} ({} quizzes)", set.name, set.quizzes.len());

        let errors = parser::validate_quiz_set(set);
        for e in &errors {
            println!("  ERROR: {e}");
        }
        total_errors += errors.len();

        let warnings = parser::lint_quiz_set(set);
        for w in &warnings {
            let prefix = match (&w.quiz_id, &w.question_id) {
                (Some(quiz), Some(question)) => format!("  [{quiz}/{question}]"),
                (Some(quiz), None) => format!("  [{quiz}]"),
                _ => "  ".to_string(),
            };
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_errors > 0 {
        anyhow::bail!("{total_errors} error(s) found");
    }

    if total_warnings == 0 {
        println!("All quiz sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
