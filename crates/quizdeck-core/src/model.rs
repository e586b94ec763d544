//! Core data model types for quizdeck.

/// One question/expected-answer pair, immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// The question text shown to the user.
    pub question: String,
    /// The exact expected answer.
    pub answer: String,
}

impl Problem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Exact string match: no trimming, no case folding.
    pub fn check(&self, user_answer: &str) -> bool {
        self.answer == user_answer
    }
}

/// The tally of a question loop that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scorecard {
    /// Number of exactly-matching answers.
    pub score: usize,
    /// Number of questions actually asked.
    pub asked: usize,
}

/// What the race between the question loop and the deadline produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizOutcome {
    /// The loop finished before the deadline.
    Completed(Scorecard),
    /// The deadline fired first; the loop was abandoned.
    TimedOut,
}
