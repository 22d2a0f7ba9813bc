//! Core data model types for quizkit.
//!
//! Quizzes, questions and options are immutable values. A session borrows a
//! quiz and never changes it.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// A named, ordered collection of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier within a catalog.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Short description shown in listings.
    #[serde(default)]
    pub description: String,
    /// Questions in play order.
    pub questions: Vec<Question>,
    pub difficulty: Difficulty,
    /// Free-text category tag.
    pub category: String,
    /// Advisory time limit in seconds. The session never enforces it.
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
}

/// A single prompt with a fixed set of options and one correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within its quiz.
    pub id: String,
    /// The prompt text.
    pub text: String,
    /// Descriptive only; scoring is identical for every kind.
    #[serde(default)]
    pub kind: QuestionKind,
    pub options: Vec<AnswerOption>,
    /// Id of the correct option.
    pub correct_answer: String,
    /// Shown once the question has been answered.
    #[serde(default)]
    pub explanation: Option<String>,
}

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Unique identifier within its question.
    pub id: String,
    pub text: String,
}

impl Question {
    /// Returns `true` if `option_id` is one of this question's options.
    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }

    /// Look up an option by id.
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// The option marked as correct.
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.option(&self.correct_answer)
    }

    pub fn is_correct(&self, option_id: &str) -> bool {
        self.correct_answer == option_id
    }
}

impl Quiz {
    /// Look up a question by id.
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Check the structural rules every playable quiz must satisfy.
    ///
    /// A quiz must have at least one question; question ids must be unique;
    /// every question needs two or more uniquely-identified options, one of
    /// which is the correct answer.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.id.trim().is_empty() {
            return Err(QuizError::validation(&self.id, "quiz id is empty"));
        }
        if self.questions.is_empty() {
            return Err(QuizError::validation(&self.id, "quiz has no questions"));
        }

        let mut question_ids = HashSet::new();
        for question in &self.questions {
            if !question_ids.insert(question.id.as_str()) {
                return Err(QuizError::validation(
                    &self.id,
                    format!("duplicate question id `{}`", question.id),
                ));
            }

            if question.options.len() < 2 {
                return Err(QuizError::validation(
                    &self.id,
                    format!(
                        "question `{}` has {} option(s), at least 2 are required",
                        question.id,
                        question.options.len()
                    ),
                ));
            }

            let mut option_ids = HashSet::new();
            for option in &question.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(QuizError::validation(
                        &self.id,
                        format!(
                            "question `{}` has duplicate option id `{}`",
                            question.id, option.id
                        ),
                    ));
                }
            }

            if !question.has_option(&question.correct_answer) {
                return Err(QuizError::validation(
                    &self.id,
                    format!(
                        "question `{}` has correct answer `{}` which is not one of its options",
                        question.id, question.correct_answer
                    ),
                ));
            }
        }

        Ok(())
    }
}

/// A file-level collection of quizzes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
}

/// How hard a quiz is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// The presentation style of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[default]
    MultipleChoice,
    TrueFalse,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple_choice"),
            QuestionKind::TrueFalse => write!(f, "true_false"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multiple_choice" | "multiple-choice" | "mc" => Ok(QuestionKind::MultipleChoice),
            "true_false" | "true-false" | "tf" => Ok(QuestionKind::TrueFalse),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A quiz whose questions all have options `o1..o{options}` with `o1` correct.
    pub fn quiz(id: &str, questions: usize, options: usize) -> Quiz {
        Quiz {
            id: id.into(),
            title: format!("Quiz {id}"),
            description: String::new(),
            questions: (1..=questions)
                .map(|n| Question {
                    id: format!("q{n}"),
                    text: format!("Question {n}?"),
                    kind: QuestionKind::MultipleChoice,
                    options: (1..=options)
                        .map(|o| AnswerOption {
                            id: format!("o{o}"),
                            text: format!("Option {o}"),
                        })
                        .collect(),
                    correct_answer: "o1".into(),
                    explanation: None,
                })
                .collect(),
            difficulty: Difficulty::Easy,
            category: "General".into(),
            time_limit_secs: None,
        }
    }
}
