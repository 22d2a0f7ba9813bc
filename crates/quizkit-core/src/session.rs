//! The quiz session state machine.
//!
//! A session walks a quiz strictly forward: each question is answered once,
//! then the caller advances. There is no rewind and no way to change an
//! answer. The session owns no quiz data; it borrows the quiz it plays.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Question, Quiz};
use crate::report::{AnswerRecord, QuizResult};
use crate::traits::CompletionSink;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for an answer to the question at `index`.
    AwaitingAnswer { index: usize },
    /// The question at `index` has been answered with `option_id`.
    Answered {
        index: usize,
        option_id: String,
        is_correct: bool,
    },
    /// Terminal. `score` correct answers out of `total` questions.
    Completed { score: usize, total: usize },
}

impl SessionState {
    fn describe(&self) -> &'static str {
        match self {
            SessionState::AwaitingAnswer { .. } => "awaiting an answer",
            SessionState::Answered { .. } => "answered",
            SessionState::Completed { .. } => "completed",
        }
    }
}

/// An answer as recorded at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedAnswer {
    pub option_id: String,
    pub is_correct: bool,
}

/// One attempt at one quiz.
#[derive(Debug, Clone)]
pub struct QuizSession<'q> {
    quiz: &'q Quiz,
    index: usize,
    answers: HashMap<String, RecordedAnswer>,
    state: SessionState,
    forced: bool,
}

impl<'q> QuizSession<'q> {
    /// Start a session at the first question.
    ///
    /// Fails with [`QuizError::Validation`] if the quiz is malformed,
    /// including when it has no questions.
    pub fn new(quiz: &'q Quiz) -> Result<Self, QuizError> {
        quiz.validate()?;
        tracing::debug!(quiz = %quiz.id, questions = quiz.questions.len(), "session created");
        Ok(Self::fresh(quiz))
    }

    fn fresh(quiz: &'q Quiz) -> Self {
        Self {
            quiz,
            index: 0,
            answers: HashMap::new(),
            state: SessionState::AwaitingAnswer { index: 0 },
            forced: false,
        }
    }

    /// A brand-new session on the same quiz. `self` is left untouched.
    pub fn restart(&self) -> QuizSession<'q> {
        tracing::debug!(quiz = %self.quiz.id, "session restarted");
        Self::fresh(self.quiz)
    }

    /// Answer the current question.
    ///
    /// Only acts while awaiting an answer. An option id that does not belong
    /// to the current question is ignored, as is any call in another state;
    /// both return the unchanged state.
    pub fn submit_answer(&mut self, option_id: &str) -> SessionState {
        let SessionState::AwaitingAnswer { index } = self.state else {
            tracing::debug!(
                quiz = %self.quiz.id,
                state = self.state.describe(),
                "ignoring answer outside of awaiting state"
            );
            return self.state.clone();
        };

        let quiz = self.quiz;
        let question = &quiz.questions[index];
        if !question.has_option(option_id) {
            tracing::debug!(
                quiz = %quiz.id,
                question = %question.id,
                option = option_id,
                "ignoring unknown option"
            );
            return self.state.clone();
        }

        let recorded = self
            .answers
            .entry(question.id.clone())
            .or_insert_with(|| RecordedAnswer {
                option_id: option_id.to_string(),
                is_correct: question.is_correct(option_id),
            })
            .clone();

        tracing::debug!(
            quiz = %quiz.id,
            question = %question.id,
            option = %recorded.option_id,
            correct = recorded.is_correct,
            "answer recorded"
        );

        self.state = SessionState::Answered {
            index,
            option_id: recorded.option_id,
            is_correct: recorded.is_correct,
        };
        self.state.clone()
    }

    /// Move past an answered question, completing the session after the last.
    pub fn advance(&mut self) -> Result<SessionState, QuizError> {
        let SessionState::Answered { index, .. } = self.state else {
            return Err(self.invalid("advance"));
        };

        let total = self.quiz.questions.len();
        if index + 1 >= total {
            self.complete();
        } else {
            self.index = index + 1;
            self.state = SessionState::AwaitingAnswer { index: self.index };
            tracing::debug!(quiz = %self.quiz.id, index = self.index, "advanced");
        }

        Ok(self.state.clone())
    }

    /// Complete the session early, scoring only the answers recorded so far.
    ///
    /// Intended for an external timer enforcing the quiz's time limit.
    pub fn force_complete(&mut self) -> Result<SessionState, QuizError> {
        if matches!(self.state, SessionState::Completed { .. }) {
            return Err(self.invalid("force completion"));
        }
        self.forced = true;
        self.complete();
        Ok(self.state.clone())
    }

    fn complete(&mut self) {
        let score = self.score();
        let total = self.quiz.questions.len();
        self.state = SessionState::Completed { score, total };
        tracing::debug!(quiz = %self.quiz.id, score, total, forced = self.forced, "completed");
    }

    fn invalid(&self, operation: &'static str) -> QuizError {
        let state = self.state.describe();
        tracing::warn!(quiz = %self.quiz.id, operation, state, "invalid session transition");
        QuizError::InvalidTransition { operation, state }
    }

    fn score(&self) -> usize {
        self.answers.values().filter(|a| a.is_correct).count()
    }

    /// The question being shown. Not available once completed.
    pub fn current_question(&self) -> Result<&'q Question, QuizError> {
        let quiz = self.quiz;
        match self.state {
            SessionState::Completed { .. } => Err(self.invalid("read the current question")),
            _ => Ok(&quiz.questions[self.index]),
        }
    }

    /// The final score. Only available once completed.
    pub fn result(&self) -> Result<QuizResult, QuizError> {
        let SessionState::Completed { score, total } = self.state else {
            return Err(self.invalid("read the result"));
        };

        let answers = self
            .quiz
            .questions
            .iter()
            .filter_map(|q| {
                self.answers.get(&q.id).map(|a| AnswerRecord {
                    question_id: q.id.clone(),
                    option_id: a.option_id.clone(),
                    is_correct: a.is_correct,
                })
            })
            .collect();

        Ok(QuizResult {
            quiz_id: self.quiz.id.clone(),
            quiz_title: self.quiz.title.clone(),
            score,
            total,
            answers,
            forced: self.forced,
        })
    }

    /// Hand the result of a completed session to `sink`, consuming the session.
    ///
    /// Consuming `self` means a run can be reported at most once.
    pub fn finish(self, sink: &mut dyn CompletionSink) -> anyhow::Result<QuizResult> {
        let result = self.result()?;
        sink.on_complete(&result)?;
        Ok(result)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn quiz(&self) -> &'q Quiz {
        self.quiz
    }

    /// 0-based index of the current question.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based position of the current question and the question count.
    pub fn progress(&self) -> (usize, usize) {
        (self.index + 1, self.quiz.questions.len())
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 == self.quiz.questions.len()
    }

    /// Whether the current question has been answered.
    pub fn is_answered(&self) -> bool {
        matches!(self.state, SessionState::Answered { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, SessionState::Completed { .. })
    }

    /// Whether the session was ended by [`force_complete`](Self::force_complete).
    pub fn was_forced(&self) -> bool {
        self.forced
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&RecordedAnswer> {
        self.answers.get(question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::quiz;
    use crate::traits::MemorySink;

    #[test]
    fn starts_awaiting_first_question() {
        let q = quiz("start", 3, 4);
        let session = QuizSession::new(&q).unwrap();
        assert_eq!(session.state(), &SessionState::AwaitingAnswer { index: 0 });
        assert_eq!(session.current_question().unwrap().id, "q1");
        assert_eq!(session.answered_count(), 0);
        assert_eq!(session.progress(), (1, 3));
    }

    #[test]
    fn empty_quiz_is_rejected() {
        let q = quiz("empty", 0, 2);
        assert!(matches!(
            QuizSession::new(&q),
            Err(QuizError::Validation { .. })
        ));
    }

    #[test]
    fn correct_answer_transitions_to_answered() {
        let q = quiz("answer", 2, 3);
        let mut session = QuizSession::new(&q).unwrap();
        let state = session.submit_answer("o1");
        assert_eq!(
            state,
            SessionState::Answered {
                index: 0,
                option_id: "o1".into(),
                is_correct: true,
            }
        );
        assert!(session.is_answered());
        assert_eq!(
            session.answer_for("q1"),
            Some(&RecordedAnswer {
                option_id: "o1".into(),
                is_correct: true,
            })
        );
    }

    #[test]
    fn wrong_answer_is_recorded_as_incorrect() {
        let q = quiz("wrong", 1, 3);
        let mut session = QuizSession::new(&q).unwrap();
        let state = session.submit_answer("o3");
        assert!(matches!(
            state,
            SessionState::Answered {
                is_correct: false,
                ..
            }
        ));
    }

    #[test]
    fn unknown_option_is_ignored() {
        let q = quiz("unknown", 2, 2);
        let mut session = QuizSession::new(&q).unwrap();
        let state = session.submit_answer("o7");
        assert_eq!(state, SessionState::AwaitingAnswer { index: 0 });
        assert_eq!(session.answered_count(), 0);
        assert!(session.answer_for("q1").is_none());
    }

    #[test]
    fn second_answer_has_no_effect() {
        let q = quiz("twice", 2, 3);
        let mut session = QuizSession::new(&q).unwrap();
        let first = session.submit_answer("o2");
        let second = session.submit_answer("o1");
        assert_eq!(first, second);
        assert_eq!(session.answer_for("q1").unwrap().option_id, "o2");
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn advance_requires_an_answer() {
        let q = quiz("eager", 2, 2);
        let mut session = QuizSession::new(&q).unwrap();
        let err = session.advance().unwrap_err();
        assert!(err.is_caller_bug());
        assert_eq!(session.state(), &SessionState::AwaitingAnswer { index: 0 });
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn advance_moves_to_next_question() {
        let q = quiz("next", 3, 2);
        let mut session = QuizSession::new(&q).unwrap();
        session.submit_answer("o1");
        let state = session.advance().unwrap();
        assert_eq!(state, SessionState::AwaitingAnswer { index: 1 });
        assert_eq!(session.current_question().unwrap().id, "q2");
        assert!(!session.is_answered());
    }

    #[test]
    fn single_question_quiz_completes_on_first_advance() {
        let q = quiz("solo", 1, 2);
        let mut session = QuizSession::new(&q).unwrap();
        assert!(session.is_last_question());
        session.submit_answer("o1");
        let state = session.advance().unwrap();
        assert_eq!(state, SessionState::Completed { score: 1, total: 1 });
    }

    #[test]
    fn completed_session_rejects_further_moves() {
        let q = quiz("done", 1, 2);
        let mut session = QuizSession::new(&q).unwrap();
        session.submit_answer("o2");
        session.advance().unwrap();

        let before = session.state().clone();
        assert!(session.advance().is_err());
        assert!(session.force_complete().is_err());
        assert!(session.current_question().is_err());
        assert_eq!(session.submit_answer("o1"), before);
        assert_eq!(session.state(), &before);
        assert_eq!(session.result().unwrap().score, 0);
    }

    #[test]
    fn result_requires_completion() {
        let q = quiz("early", 2, 2);
        let session = QuizSession::new(&q).unwrap();
        assert!(matches!(
            session.result(),
            Err(QuizError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn mixed_answers_are_scored() {
        let q = quiz("mixed", 4, 3);
        let mut session = QuizSession::new(&q).unwrap();
        for option in ["o1", "o2", "o1", "o3"] {
            session.submit_answer(option);
            session.advance().unwrap();
        }
        let result = session.result().unwrap();
        assert_eq!((result.score, result.total), (2, 4));
        let ids: Vec<&str> = result.answers.iter().map(|a| a.question_id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3", "q4"]);
        assert!(!result.forced);
    }

    #[test]
    fn force_complete_scores_recorded_answers() {
        let q = quiz("timeout", 4, 2);
        let mut session = QuizSession::new(&q).unwrap();
        session.submit_answer("o1");
        session.advance().unwrap();
        session.submit_answer("o1");

        let state = session.force_complete().unwrap();
        assert_eq!(state, SessionState::Completed { score: 2, total: 4 });
        assert!(session.was_forced());
        let result = session.result().unwrap();
        assert!(result.forced);
        assert_eq!(result.answers.len(), 2);
    }

    #[test]
    fn restart_is_independent() {
        let q = quiz("again", 2, 2);
        let mut session = QuizSession::new(&q).unwrap();
        session.submit_answer("o1");
        session.advance().unwrap();
        session.submit_answer("o2");
        session.advance().unwrap();

        let fresh = session.restart();
        assert_eq!(fresh.state(), &SessionState::AwaitingAnswer { index: 0 });
        assert_eq!(fresh.answered_count(), 0);
        assert!(session.is_completed());
        assert_eq!(session.answered_count(), 2);
    }

    #[test]
    fn finish_reports_to_sink() {
        let q = quiz("sink", 1, 2);
        let mut session = QuizSession::new(&q).unwrap();
        session.submit_answer("o1");
        session.advance().unwrap();

        let mut sink = MemorySink::default();
        let result = session.finish(&mut sink).unwrap();
        assert_eq!(sink.results(), &[result]);
    }

    struct FailingSink;

    impl CompletionSink for FailingSink {
        fn on_complete(&mut self, _result: &QuizResult) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }
    }

    #[test]
    fn finish_returns_sink_failure() {
        let q = quiz("sink-fails", 1, 2);
        let mut session = QuizSession::new(&q).unwrap();
        session.submit_answer("o1");
        session.advance().unwrap();

        let err = session.finish(&mut FailingSink).unwrap_err();
        assert!(err.downcast_ref::<QuizError>().is_none());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn finish_before_completion_reports_nothing() {
        let q = quiz("abandon", 2, 2);
        let session = QuizSession::new(&q).unwrap();
        let mut sink = MemorySink::default();
        let err = session.finish(&mut sink).unwrap_err();
        assert!(err
            .downcast_ref::<QuizError>()
            .is_some_and(QuizError::is_caller_bug));
        assert!(sink.results().is_empty());
    }
}
