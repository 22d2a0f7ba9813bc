//! The `quizkit play` command.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;

use quizkit_core::{CompletionSink, Question, QuizSession, SessionState};

use crate::config::load_config_from;
use crate::display::format_duration_secs;
use crate::sinks::{ConsoleSink, JsonFileSink};

/// Where answers come from.
pub enum AnswerSource<R> {
    /// A pre-recorded list of inputs, consumed front to back.
    Scripted(VecDeque<String>),
    /// Line-by-line input from a reader.
    Interactive(R),
}

impl<R: BufRead> AnswerSource<R> {
    /// Split a comma-separated answer list.
    pub fn scripted(answers: &str) -> Self {
        AnswerSource::Scripted(
            answers
                .split(',')
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
        )
    }

    /// The next input, or `None` once the source is exhausted.
    fn next(&mut self) -> Result<Option<String>> {
        match self {
            AnswerSource::Scripted(queue) => Ok(queue.pop_front()),
            AnswerSource::Interactive(reader) => {
                let mut line = String::new();
                if reader.read_line(&mut line)? == 0 {
                    return Ok(None);
                }
                Ok(Some(line.trim().to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    pub show_explanations: bool,
    /// Stop taking answers once this much time has passed.
    pub time_limit: Option<Duration>,
}

/// Map user input to an option id: a 1-based number selects by position,
/// anything else is taken as an option id verbatim.
fn resolve_input(question: &Question, input: &str) -> String {
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| question.options.get(i))
        .map(|o| o.id.clone())
        .unwrap_or_else(|| input.to_string())
}

fn time_is_up(started: Instant, options: &PlayOptions) -> bool {
    options
        .time_limit
        .is_some_and(|limit| started.elapsed() >= limit)
}

/// Drive a session to completion from `answers`, writing prompts and
/// feedback to `out`.
///
/// An exhausted answer source or an elapsed time limit force-completes the
/// session with whatever has been answered.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut QuizSession<'_>,
    answers: &mut AnswerSource<R>,
    out: &mut W,
    options: &PlayOptions,
) -> Result<()> {
    let started = Instant::now();

    while !session.is_completed() {
        if time_is_up(started, options) {
            writeln!(out, "\nTime is up!")?;
            session.force_complete()?;
            break;
        }

        let question = session.current_question()?;
        let (position, total) = session.progress();
        writeln!(out, "\nQuestion {position} of {total}: {}", question.text)?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, option.text)?;
        }

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(input) = answers.next()? else {
                writeln!(out, "\nNo more answers, ending the quiz.")?;
                session.force_complete()?;
                return Ok(());
            };

            // Input arriving after the deadline is discarded.
            if time_is_up(started, options) {
                writeln!(out, "\nTime is up!")?;
                session.force_complete()?;
                return Ok(());
            }

            let option_id = resolve_input(question, &input);
            match session.submit_answer(&option_id) {
                SessionState::Answered { is_correct, .. } => {
                    if is_correct {
                        writeln!(out, "Correct!")?;
                    } else {
                        let answer = question
                            .correct_option()
                            .map(|o| o.text.as_str())
                            .unwrap_or(question.correct_answer.as_str());
                        writeln!(out, "Wrong. The answer was: {answer}")?;
                    }
                    if options.show_explanations {
                        if let Some(explanation) = &question.explanation {
                            writeln!(out, "{explanation}")?;
                        }
                    }
                    break;
                }
                _ => writeln!(out, "Unknown option \"{input}\", try again.")?,
            }
        }

        session.advance()?;
    }

    Ok(())
}

/// Sinks for a finished run: the console first, then the results directory
/// when saving. A failed save never hides the score.
fn completion_sinks<'a>(
    out: &'a mut dyn Write,
    results_dir: Option<PathBuf>,
) -> Vec<Box<dyn CompletionSink + 'a>> {
    let mut sinks: Vec<Box<dyn CompletionSink + 'a>> = Vec::new();
    sinks.push(Box::new(ConsoleSink::new(out)));
    if let Some(dir) = results_dir {
        sinks.push(Box::new(JsonFileSink::new(dir)));
    }
    sinks
}

pub fn execute(
    quiz_id: String,
    answers: Option<String>,
    save: bool,
    enforce_time_limit: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = config.load_catalog()?;
    let quiz = catalog.resolve(&quiz_id)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{} [{}, {}]", quiz.title, quiz.difficulty, quiz.category)?;
    if !quiz.description.is_empty() {
        writeln!(out, "{}", quiz.description)?;
    }
    write!(out, "{} questions", quiz.questions.len())?;
    if let Some(secs) = quiz.time_limit_secs {
        write!(out, ", time limit {}", format_duration_secs(secs))?;
    }
    writeln!(out)?;

    let options = PlayOptions {
        show_explanations: config.show_explanations,
        time_limit: quiz
            .time_limit_secs
            .filter(|_| enforce_time_limit)
            .map(Duration::from_secs),
    };

    let mut session = QuizSession::new(quiz)?;
    let stdin = std::io::stdin();
    let mut source = match answers {
        Some(list) => AnswerSource::scripted(&list),
        None => AnswerSource::Interactive(stdin.lock()),
    };

    run_session(&mut session, &mut source, &mut out, &options)?;

    let results_dir = save.then(|| config.results_dir.clone());
    let mut sinks = completion_sinks(&mut out, results_dir);
    session.finish(&mut sinks)?;

    Ok(())
}
