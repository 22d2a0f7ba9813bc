//! The quiz catalog.
//!
//! A catalog is an immutable, ordered collection of validated quizzes. The
//! built-in catalog is parsed from the quiz sets embedded in this crate the
//! first time it is requested and is shared for the rest of the process.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::QuizError;
use crate::model::{Quiz, QuizSet};
use crate::parser::parse_quiz_set_str;
use crate::session::QuizSession;

/// Embedded quiz set files, in catalog order.
const BUILTIN_SETS: &[(&str, &str)] = &[
    ("catalog/history.toml", include_str!("../catalog/history.toml")),
    ("catalog/design.toml", include_str!("../catalog/design.toml")),
    ("catalog/esports.toml", include_str!("../catalog/esports.toml")),
    ("catalog/memes.toml", include_str!("../catalog/memes.toml")),
];

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

/// An ordered, read-only collection of quizzes with unique ids.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    quizzes: Vec<Quiz>,
}

impl Catalog {
    /// Build a catalog, validating every quiz and rejecting duplicate ids.
    pub fn new(quizzes: Vec<Quiz>) -> Result<Self, QuizError> {
        let mut seen = HashSet::new();
        for quiz in &quizzes {
            quiz.validate()?;
            if !seen.insert(quiz.id.as_str()) {
                return Err(QuizError::validation(
                    &quiz.id,
                    "quiz id appears more than once in the catalog",
                ));
            }
        }
        Ok(Self { quizzes })
    }

    /// Build a catalog from every quiz in the given sets, in order.
    pub fn from_sets(sets: impl IntoIterator<Item = QuizSet>) -> Result<Self, QuizError> {
        Self::new(sets.into_iter().flat_map(|s| s.quizzes).collect())
    }

    /// The process-wide catalog embedded in this crate.
    pub fn builtin() -> Result<&'static Catalog, QuizError> {
        if let Some(catalog) = BUILTIN.get() {
            return Ok(catalog);
        }

        let mut sets = Vec::with_capacity(BUILTIN_SETS.len());
        for (name, content) in BUILTIN_SETS {
            let set = parse_quiz_set_str(content, Path::new(name))
                .map_err(|e| QuizError::Catalog(format!("{e:#}")))?;
            sets.push(set);
        }
        let catalog = Self::from_sets(sets)?;
        tracing::debug!(quizzes = catalog.len(), "loaded built-in catalog");

        Ok(BUILTIN.get_or_init(|| catalog))
    }

    /// A new catalog holding this catalog's quizzes followed by `other`'s.
    pub fn merge(&self, other: Catalog) -> Result<Catalog, QuizError> {
        let mut quizzes = self.quizzes.clone();
        quizzes.extend(other.quizzes);
        Self::new(quizzes)
    }

    /// Look up a quiz by id. Absence is a normal outcome.
    pub fn get_quiz_by_id(&self, id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == id)
    }

    /// Look up a quiz by id, reporting absence as [`QuizError::NotFound`].
    pub fn resolve(&self, id: &str) -> Result<&Quiz, QuizError> {
        self.get_quiz_by_id(id)
            .ok_or_else(|| QuizError::NotFound(id.to_string()))
    }

    /// Quizzes whose category equals `category`, in catalog order.
    pub fn get_quizzes_by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a Quiz> + 'a {
        self.quizzes.iter().filter(move |q| q.category == category)
    }

    /// Distinct categories in order of first appearance.
    pub fn get_categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.quizzes
            .iter()
            .map(|q| q.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Resolve `id` and start a fresh session on it.
    pub fn start_session(&self, id: &str) -> Result<QuizSession<'_>, QuizError> {
        QuizSession::new(self.resolve(id)?)
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }
}
