//! TOML quiz set parser.
//!
//! Loads quiz sets from TOML files and directories, and lints them.
//! Parsing only checks the file shape; structural rules are enforced by
//! [`Quiz::validate`](crate::model::Quiz::validate).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::QuizError;
use crate::model::{AnswerOption, Difficulty, Question, QuestionKind, Quiz, QuizSet};

/// Intermediate TOML structure for parsing quiz set files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz_set: TomlQuizSetHeader,
    #[serde(default)]
    quizzes: Vec<TomlQuiz>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    default_category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlQuiz {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_difficulty")]
    difficulty: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    time_limit_secs: Option<u64>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    text: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    options: Vec<TomlOption>,
    correct_answer: String,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlOption {
    id: String,
    text: String,
}

/// Parse a single TOML file into a `QuizSet`.
pub fn parse_quiz_set(path: &Path) -> Result<QuizSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz set file: {}", path.display()))?;

    parse_quiz_set_str(&content, path)
}

/// Parse a TOML string into a `QuizSet` (useful for testing and embedded data).
pub fn parse_quiz_set_str(content: &str, source_path: &Path) -> Result<QuizSet> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let default_category = parsed.quiz_set.default_category;

    let quizzes = parsed
        .quizzes
        .into_iter()
        .map(|q| {
            let difficulty: Difficulty = q
                .difficulty
                .parse()
                .map_err(|e: String| anyhow::anyhow!("quiz `{}`: {}", q.id, e))?;

            let category = q
                .category
                .or_else(|| default_category.clone())
                .ok_or_else(|| anyhow::anyhow!("quiz `{}` has no category", q.id))?;

            let questions = q
                .questions
                .into_iter()
                .map(|question| {
                    let kind = question
                        .kind
                        .map(|k| {
                            k.parse::<QuestionKind>()
                                .map_err(|e| anyhow::anyhow!("quiz `{}`: {}", q.id, e))
                        })
                        .transpose()?
                        .unwrap_or_default();

                    let options = question
                        .options
                        .into_iter()
                        .map(|o| AnswerOption {
                            id: o.id,
                            text: o.text,
                        })
                        .collect();

                    Ok(Question {
                        id: question.id,
                        text: question.text,
                        kind,
                        options,
                        correct_answer: question.correct_answer,
                        explanation: question.explanation,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(Quiz {
                id: q.id,
                title: q.title,
                description: q.description,
                questions,
                difficulty,
                category,
                time_limit_secs: q.time_limit_secs,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuizSet {
        id: parsed.quiz_set.id,
        name: parsed.quiz_set.name,
        description: parsed.quiz_set.description,
        quizzes,
    })
}

/// Recursively parse every `.toml` file under `dir`, sorted by path.
///
/// Each file comes back with its own parse result, so callers decide
/// whether a broken file is fatal.
pub fn parse_quiz_directory(dir: &Path) -> Result<Vec<(PathBuf, Result<QuizSet>)>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    let mut parsed = Vec::new();
    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            parsed.extend(parse_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            let set = parse_quiz_set(&path);
            parsed.push((path, set));
        }
    }

    Ok(parsed)
}

/// Recursively load all `.toml` quiz set files from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<QuizSet>> {
    let sets = parse_quiz_directory(dir)?
        .into_iter()
        .filter_map(|(path, set)| match set {
            Ok(set) => Some(set),
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
                None
            }
        })
        .collect();

    Ok(sets)
}

/// Run [`Quiz::validate`] on every quiz in a set and collect the failures.
pub fn validate_quiz_set(set: &QuizSet) -> Vec<QuizError> {
    set.quizzes
        .iter()
        .filter_map(|quiz| quiz.validate().err())
        .collect()
}

/// A non-fatal finding from linting a quiz set.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The quiz ID (if applicable).
    pub quiz_id: Option<String>,
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    pub message: String,
}

/// Lint a quiz set for issues that do not make it unplayable.
pub fn lint_quiz_set(set: &QuizSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for quiz in &set.quizzes {
        if !seen_ids.insert(&quiz.id) {
            warnings.push(ValidationWarning {
                quiz_id: Some(quiz.id.clone()),
                question_id: None,
                message: format!("duplicate quiz ID: {}", quiz.id),
            });
        }

        if quiz.time_limit_secs == Some(0) {
            warnings.push(ValidationWarning {
                quiz_id: Some(quiz.id.clone()),
                question_id: None,
                message: "time_limit_secs is 0".into(),
            });
        }

        for question in &quiz.questions {
            let warn = |message: String| ValidationWarning {
                quiz_id: Some(quiz.id.clone()),
                question_id: Some(question.id.clone()),
                message,
            };

            if question.text.trim().is_empty() {
                warnings.push(warn("question text is empty".into()));
            }

            if question.kind == QuestionKind::TrueFalse && question.options.len() != 2 {
                warnings.push(warn(format!(
                    "true_false question has {} options",
                    question.options.len()
                )));
            }

            if question.options.iter().any(|o| o.text.trim().is_empty()) {
                warnings.push(warn("an option has empty text".into()));
            }

            if question.explanation.is_none() {
                warnings.push(warn("no explanation provided".into()));
            }
        }
    }

    warnings
}
