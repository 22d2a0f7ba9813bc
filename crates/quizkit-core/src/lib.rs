//! quizkit-core — Quiz catalog, session state machine, and scoring.
//!
//! This crate defines the quiz data model, the catalog quizzes are resolved
//! from, and the single-pass session that steps through a quiz and scores it.

pub mod catalog;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod session;
pub mod traits;

pub use catalog::Catalog;
pub use error::QuizError;
pub use model::{AnswerOption, Difficulty, Question, QuestionKind, Quiz, QuizSet};
pub use report::{AnswerRecord, QuizResult, RunRecord};
pub use session::{QuizSession, RecordedAnswer, SessionState};
pub use traits::{CompletionSink, MemorySink};
