//! The timed quiz session.
//!
//! The question loop runs as one blocking background task; the foreground
//! waits on whichever comes first, loop completion or the deadline. No
//! cancellation signal is sent on timeout: the loop is abandoned and its
//! eventual scorecard (or error) is never observed. The score lives inside
//! the `Quiz` value owned by the loop, so timeout abandonment leaves no
//! shared state behind.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::error::QuizError;
use crate::model::{Problem, QuizOutcome, Scorecard};

/// Maximum number of questions asked per run.
pub const QUESTION_COUNT: usize = 10;

/// A source of user answers, one whitespace-delimited token at a time.
///
/// `next_answer` blocks until a token is available. End-of-input before a
/// token is an error; answer reading is the only blocking I/O in the loop.
pub trait AnswerSource {
    fn next_answer(&mut self) -> Result<String, QuizError>;
}

/// Answers read from the process's standard input.
///
/// The stdin lock is taken per call, so the gate prompt in the CLI and the
/// question loop can share the same underlying buffer.
pub struct StdinAnswers;

impl AnswerSource for StdinAnswers {
    fn next_answer(&mut self) -> Result<String, QuizError> {
        let mut input = io::stdin().lock();
        read_token(&mut input).map_err(QuizError::AnswerRead)
    }
}

/// Answers read from any buffered reader. Used by tests; also handy for
/// piping a canned answer script through the quiz.
pub struct TokenAnswers<R: BufRead> {
    reader: R,
}

impl<R: BufRead> TokenAnswers<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> AnswerSource for TokenAnswers<R> {
    fn next_answer(&mut self) -> Result<String, QuizError> {
        read_token(&mut self.reader).map_err(QuizError::AnswerRead)
    }
}

/// Read one whitespace-delimited token, skipping leading whitespace.
fn read_token<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut token = Vec::new();
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            // End of input.
            if token.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "end of input before an answer",
                ));
            }
            break;
        }

        let mut consumed = 0;
        for &byte in buf {
            consumed += 1;
            if byte.is_ascii_whitespace() {
                if token.is_empty() {
                    continue;
                }
                reader.consume(consumed);
                return Ok(String::from_utf8_lossy(&token).into_owned());
            }
            token.push(byte);
        }
        reader.consume(consumed);
    }
    Ok(String::from_utf8_lossy(&token).into_owned())
}

/// One quiz run: the ordered problems, the answer source, the prompt
/// writer, and the score owned by the loop.
pub struct Quiz<S, W> {
    problems: Vec<Problem>,
    answers: S,
    prompt: W,
    score: usize,
}

impl<S: AnswerSource, W: Write> Quiz<S, W> {
    pub fn new(problems: Vec<Problem>, answers: S, prompt: W) -> Self {
        Self {
            problems,
            answers,
            prompt,
            score: 0,
        }
    }

    /// How many questions this run will ask: at most [`QUESTION_COUNT`],
    /// capped at the number of loaded problems.
    pub fn question_count(&self) -> usize {
        self.problems.len().min(QUESTION_COUNT)
    }

    fn ask(&mut self, index: usize) -> Result<(), QuizError> {
        let problem = &self.problems[index];
        writeln!(self.prompt, "What is {} ?", problem.question).map_err(QuizError::Prompt)?;
        self.prompt.flush().map_err(QuizError::Prompt)?;

        let answer = self.answers.next_answer()?;
        if problem.check(&answer) {
            self.score += 1;
        }
        Ok(())
    }

    /// Run the question loop to completion. Consumes the quiz; the score is
    /// only observable through the returned scorecard.
    pub fn run(mut self) -> Result<Scorecard, QuizError> {
        let asked = self.question_count();
        for index in 0..asked {
            self.ask(index)?;
        }
        tracing::debug!(score = self.score, asked, "question loop finished");
        Ok(Scorecard {
            score: self.score,
            asked,
        })
    }
}

/// Race the question loop against a deadline.
///
/// The first event wins and decides the outcome. The select is biased
/// toward the deadline arm so a zero duration always reports [`QuizOutcome::TimedOut`],
/// however fast the loop finished. On timeout the join handle is dropped
/// and the blocking task keeps running detached until its next read
/// returns; its result is discarded.
pub async fn run_timed<S, W>(quiz: Quiz<S, W>, deadline: Duration) -> Result<QuizOutcome>
where
    S: AnswerSource + Send + 'static,
    W: Write + Send + 'static,
{
    let loop_handle = tokio::task::spawn_blocking(move || quiz.run());

    tokio::select! {
        biased;

        _ = tokio::time::sleep(deadline) => {
            tracing::debug!(?deadline, "deadline elapsed, abandoning question loop");
            Ok(QuizOutcome::TimedOut)
        }
        finished = loop_handle => {
            let scorecard = finished.context("question loop panicked")??;
            Ok(QuizOutcome::Completed(scorecard))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn problems(pairs: &[(&str, &str)]) -> Vec<Problem> {
        pairs.iter().map(|(q, a)| Problem::new(*q, *a)).collect()
    }

    fn scripted(answers: &str) -> TokenAnswers<Cursor<Vec<u8>>> {
        TokenAnswers::new(Cursor::new(answers.as_bytes().to_vec()))
    }

    /// Answer source that sleeps before every answer.
    struct SlowAnswers {
        delay: Duration,
    }

    impl AnswerSource for SlowAnswers {
        fn next_answer(&mut self) -> Result<String, QuizError> {
            std::thread::sleep(self.delay);
            Ok("whatever".to_string())
        }
    }

    struct PanickingAnswers;

    impl AnswerSource for PanickingAnswers {
        fn next_answer(&mut self) -> Result<String, QuizError> {
            panic!("answer source blew up");
        }
    }

    #[test]
    fn read_token_splits_on_whitespace() {
        let mut input = Cursor::new("  4\n6\t seven ");
        assert_eq!(read_token(&mut input).unwrap(), "4");
        assert_eq!(read_token(&mut input).unwrap(), "6");
        assert_eq!(read_token(&mut input).unwrap(), "seven");
        let err = read_token(&mut input).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn read_token_returns_trailing_token_without_newline() {
        let mut input = Cursor::new("42");
        assert_eq!(read_token(&mut input).unwrap(), "42");
    }

    #[test]
    fn loop_scores_exact_matches_only() {
        let quiz = Quiz::new(
            problems(&[("2+2", "4"), ("3+3", "6"), ("capital", "Paris")]),
            scripted("4 6 paris\n"),
            Vec::new(),
        );
        let card = quiz.run().unwrap();
        assert_eq!(card, Scorecard { score: 2, asked: 3 });
    }

    #[test]
    fn loop_writes_each_prompt() {
        let mut quiz = Quiz::new(
            problems(&[("2+2", "4"), ("3+3", "6")]),
            scripted("4 6\n"),
            Vec::new(),
        );
        quiz.ask(0).unwrap();
        quiz.ask(1).unwrap();
        let output = String::from_utf8(quiz.prompt).unwrap();
        assert_eq!(output, "What is 2+2 ?\nWhat is 3+3 ?\n");
    }

    #[test]
    fn loop_asks_at_most_ten_questions() {
        let many: Vec<Problem> = (0..25).map(|i| Problem::new(format!("q{i}"), "x")).collect();
        let quiz = Quiz::new(many, scripted(&"x ".repeat(25)), Vec::new());
        let card = quiz.run().unwrap();
        assert_eq!(card.asked, QUESTION_COUNT);
        assert_eq!(card.score, QUESTION_COUNT);
    }

    #[test]
    fn loop_clamps_to_available_problems() {
        let quiz = Quiz::new(
            problems(&[("2+2", "4"), ("3+3", "6")]),
            scripted("4 6\n"),
            Vec::new(),
        );
        let card = quiz.run().unwrap();
        assert_eq!(card, Scorecard { score: 2, asked: 2 });
    }

    #[test]
    fn loop_fails_when_answers_run_out() {
        let quiz = Quiz::new(
            problems(&[("2+2", "4"), ("3+3", "6")]),
            scripted("4"),
            Vec::new(),
        );
        // The single token covers question one; question two hits EOF.
        let err = quiz.run().unwrap_err();
        assert!(matches!(err, QuizError::AnswerRead(_)));
    }

    #[tokio::test]
    async fn completion_wins_before_the_deadline() {
        let quiz = Quiz::new(
            problems(&[("2+2", "4"), ("3+3", "6")]),
            scripted("4 6\n"),
            Vec::new(),
        );
        let outcome = run_timed(quiz, Duration::from_secs(30)).await.unwrap();
        assert_eq!(
            outcome,
            QuizOutcome::Completed(Scorecard { score: 2, asked: 2 })
        );
    }

    #[tokio::test]
    async fn zero_deadline_always_times_out() {
        // Even an instantly-answered quiz loses a race against a zero
        // deadline; the deadline arm wins ties.
        let quiz = Quiz::new(problems(&[("2+2", "4")]), scripted("4\n"), Vec::new());
        let outcome = run_timed(quiz, Duration::ZERO).await.unwrap();
        assert_eq!(outcome, QuizOutcome::TimedOut);
    }

    #[tokio::test]
    async fn slow_answers_hit_the_deadline() {
        let quiz = Quiz::new(
            problems(&[("2+2", "4")]),
            SlowAnswers {
                delay: Duration::from_millis(300),
            },
            Vec::new(),
        );
        let outcome = run_timed(quiz, Duration::from_millis(25)).await.unwrap();
        assert_eq!(outcome, QuizOutcome::TimedOut);
    }

    #[tokio::test]
    async fn answer_read_failure_is_fatal() {
        let quiz = Quiz::new(problems(&[("2+2", "4")]), scripted(""), Vec::new());
        let err = run_timed(quiz, Duration::from_secs(30)).await.unwrap_err();
        assert!(err.to_string().contains("answer"));
    }

    #[tokio::test]
    async fn panicked_loop_surfaces_as_an_error() {
        let quiz = Quiz::new(problems(&[("2+2", "4")]), PanickingAnswers, Vec::new());
        let err = run_timed(quiz, Duration::from_secs(30)).await.unwrap_err();
        assert!(err.to_string().contains("panicked"));
    }
}
