//! Extension points for the quiz engine.

use anyhow::Result;

use crate::report::QuizResult;

/// Receives the result of a completed session.
///
/// The sink decides what a finished run means: showing a message,
/// persisting it, or offering another attempt. A session reports to a sink
/// through [`QuizSession::finish`](crate::session::QuizSession::finish),
/// which consumes the session, so each run reaches a sink at most once.
pub trait CompletionSink {
    fn on_complete(&mut self, result: &QuizResult) -> Result<()>;
}

/// A sink that keeps every result in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    results: Vec<QuizResult>,
}

impl MemorySink {
    pub fn results(&self) -> &[QuizResult] {
        &self.results
    }

    /// The most recent result, if any.
    pub fn last(&self) -> Option<&QuizResult> {
        self.results.last()
    }
}

impl CompletionSink for MemorySink {
    fn on_complete(&mut self, result: &QuizResult) -> Result<()> {
        self.results.push(result.clone());
        Ok(())
    }
}

/// Fan a result out to several sinks in order, stopping at the first failure.
impl<'a> CompletionSink for Vec<Box<dyn CompletionSink + 'a>> {
    fn on_complete(&mut self, result: &QuizResult) -> Result<()> {
        for sink in self.iter_mut() {
            sink.on_complete(result)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSink(usize);

    impl CompletionSink for CountingSink {
        fn on_complete(&mut self, _result: &QuizResult) -> Result<()> {
            self.0 += 1;
            Ok(())
        }
    }

    struct FailingSink;

    impl CompletionSink for FailingSink {
        fn on_complete(&mut self, _result: &QuizResult) -> Result<()> {
            anyhow::bail!("disk full")
        }
    }

    fn sample() -> QuizResult {
        QuizResult {
            quiz_id: "q".into(),
            quiz_title: "Q".into(),
            score: 1,
            total: 2,
            answers: vec![],
            forced: false,
        }
    }

    #[test]
    fn memory_sink_collects() {
        let mut sink = MemorySink::default();
        assert!(sink.last().is_none());
        sink.on_complete(&sample()).unwrap();
        assert_eq!(sink.results().len(), 1);
        assert_eq!(sink.last().unwrap().score, 1);
    }

    #[test]
    fn fan_out_stops_on_failure() {
        let mut sinks: Vec<Box<dyn CompletionSink>> = vec![
            Box::new(CountingSink(0)),
            Box::new(FailingSink),
            Box::new(MemorySink::default()),
        ];
        let err = sinks.on_complete(&sample()).unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }
}
