//! The `quizkit init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizkit.toml").exists() {
        println!("quizkit.toml already exists, skipping.");
    } else {
        std::fs::write("quizkit.toml", SAMPLE_CONFIG)?;
        println!("Created quizkit.toml");
    }

    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ_SET)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizzes/example.toml or add more quiz sets next to it");
    println!("  2. Run: quizkit validate --quiz-set quizzes");
    println!("  3. Run: quizkit play --quiz rust-trivia");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizkit configuration

# Quiz set files or directories added to the built-in catalog.
catalog_dirs = ["quizzes"]
include_builtin = true

results_dir = "./quizkit-results"
show_explanations = true
"#;

const EXAMPLE_QUIZ_SET: &str = r#"[quiz_set]
id = "example"
name = "Example Quiz Set"
description = "A small quiz set to get started"
default_category = "Programming"

[[quizzes]]
id = "rust-trivia"
title = "Rust Trivia"
description = "A few questions about the Rust language"
difficulty = "easy"
time_limit_secs = 120

[[quizzes.questions]]
id = "q1"
text = "Which keyword declares a mutable binding?"
correct_answer = "o2"
explanation = "Bindings are immutable by default; `let mut` makes them mutable."
options = [
    { id = "o1", text = "var" },
    { id = "o2", text = "let mut" },
    { id = "o3", text = "mut let" },
]

[[quizzes.questions]]
id = "q2"
text = "Rust has a garbage collector."
kind = "true_false"
correct_answer = "o2"
explanation = "Memory is managed through ownership and borrowing, checked at compile time."
options = [
    { id = "o1", text = "True" },
    { id = "o2", text = "False" },
]
"#;
