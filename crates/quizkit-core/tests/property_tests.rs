//! Property-based tests for the quiz session state machine.

use proptest::prelude::*;
use quizkit_core::{AnswerOption, Difficulty, Question, QuestionKind, Quiz, QuizSession, SessionState};

// ============================================================================
// Strategy Generators
// ============================================================================

/// Generate a valid quiz: 1..12 questions, each with 2..6 options and a
/// correct answer chosen among them.
fn quiz_strategy() -> impl Strategy<Value = Quiz> {
    prop::collection::vec((2usize..6).prop_flat_map(|n| (Just(n), 0..n)), 1..12).prop_map(
        |shapes| Quiz {
            id: "generated".into(),
            title: "Generated".into(),
            description: String::new(),
            questions: shapes
                .into_iter()
                .enumerate()
                .map(|(i, (options, correct))| Question {
                    id: format!("q{}", i + 1),
                    text: format!("Question {}", i + 1),
                    kind: if options == 2 {
                        QuestionKind::TrueFalse
                    } else {
                        QuestionKind::MultipleChoice
                    },
                    options: (0..options)
                        .map(|o| AnswerOption {
                            id: format!("o{}", o + 1),
                            text: format!("Option {}", o + 1),
                        })
                        .collect(),
                    correct_answer: format!("o{}", correct + 1),
                    explanation: None,
                })
                .collect(),
            difficulty: Difficulty::Medium,
            category: "Generated".into(),
            time_limit_secs: None,
        },
    )
}

/// Caller actions, including ones that are illegal or carry stale option ids.
#[derive(Debug, Clone)]
enum Action {
    Submit(usize),
    SubmitUnknown,
    Advance,
    ForceComplete,
}

fn actions_strategy(max: usize) -> impl Strategy<Value = Vec<Action>> {
    prop::collection::vec(
        prop_oneof![
            4 => (0usize..6).prop_map(Action::Submit),
            1 => Just(Action::SubmitUnknown),
            4 => Just(Action::Advance),
            1 => Just(Action::ForceComplete),
        ],
        0..max,
    )
}

fn wrong_option(question: &Question) -> &str {
    question
        .options
        .iter()
        .find(|o| o.id != question.correct_answer)
        .map(|o| o.id.as_str())
        .unwrap_or("")
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Answering every question correctly scores N out of N.
    #[test]
    fn all_correct_scores_total(quiz in quiz_strategy()) {
        let mut session = QuizSession::new(&quiz).unwrap();
        for question in &quiz.questions {
            session.submit_answer(&question.correct_answer);
            session.advance().unwrap();
        }
        let n = quiz.questions.len();
        prop_assert_eq!(session.state(), &SessionState::Completed { score: n, total: n });
    }

    /// Answering every question wrongly scores zero.
    #[test]
    fn all_wrong_scores_zero(quiz in quiz_strategy()) {
        let mut session = QuizSession::new(&quiz).unwrap();
        for question in &quiz.questions {
            session.submit_answer(wrong_option(question));
            session.advance().unwrap();
        }
        let n = quiz.questions.len();
        prop_assert_eq!(session.state(), &SessionState::Completed { score: 0, total: n });
    }

    /// Whatever a caller does, the session invariants hold.
    #[test]
    fn invariants_hold_under_arbitrary_calls(
        quiz in quiz_strategy(),
        actions in actions_strategy(60),
    ) {
        let mut session = QuizSession::new(&quiz).unwrap();
        let n = quiz.questions.len();

        for action in actions {
            let before_index = session.index();
            let before_state = session.state().clone();
            let before_answers = session.answered_count();

            match action {
                Action::Submit(o) => {
                    let option = format!("o{}", o + 1);
                    let state = session.submit_answer(&option);
                    if let SessionState::AwaitingAnswer { .. } = before_state {
                        let valid = quiz.questions[before_index].has_option(&option);
                        prop_assert_eq!(session.answered_count(), before_answers + usize::from(valid));
                    } else {
                        prop_assert_eq!(&state, &before_state);
                    }
                }
                Action::SubmitUnknown => {
                    let state = session.submit_answer("stale-option");
                    prop_assert_eq!(&state, &before_state);
                    prop_assert_eq!(session.answered_count(), before_answers);
                }
                Action::Advance => {
                    let res = session.advance();
                    if matches!(before_state, SessionState::Answered { .. }) {
                        prop_assert!(res.is_ok());
                    } else {
                        prop_assert!(res.is_err());
                        prop_assert_eq!(session.state(), &before_state);
                        prop_assert_eq!(session.index(), before_index);
                    }
                }
                Action::ForceComplete => {
                    let res = session.force_complete();
                    prop_assert_eq!(
                        res.is_ok(),
                        !matches!(before_state, SessionState::Completed { .. })
                    );
                }
            }

            // index never leaves the question range and never goes backwards
            prop_assert!(session.index() < n);
            prop_assert!(session.index() >= before_index);

            // recorded answers always reference real options
            for question in &quiz.questions {
                if let Some(answer) = session.answer_for(&question.id) {
                    prop_assert!(question.has_option(&answer.option_id));
                    prop_assert_eq!(answer.is_correct, answer.option_id == question.correct_answer);
                }
            }

            if let SessionState::Completed { score, total } = session.state() {
                prop_assert_eq!(*total, n);
                prop_assert!(*score <= *total);
            }
        }
    }

    /// An answer, once recorded, never changes.
    #[test]
    fn first_answer_wins(quiz in quiz_strategy(), picks in prop::collection::vec(0usize..6, 2..5)) {
        let mut session = QuizSession::new(&quiz).unwrap();
        let first = &quiz.questions[0].options[0].id;
        session.submit_answer(first);
        for pick in picks {
            session.submit_answer(&format!("o{}", pick + 1));
        }
        prop_assert_eq!(&session.answer_for(&quiz.questions[0].id).unwrap().option_id, first);
    }
}
