//! Quiz error types.
//!
//! Every variant is fatal: the quiz either runs to an outcome or the
//! process prints one of these and exits. Nothing here is retried.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading problems or running a quiz.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The problem file could not be opened.
    #[error("could not open problem file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row in the problem file could not be parsed as CSV.
    #[error("could not parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row did not have exactly two fields (question, answer).
    #[error("row {row} in {} has {fields} field(s), expected 2", .path.display())]
    RowShape {
        path: PathBuf,
        row: usize,
        fields: usize,
    },

    /// The problem file parsed cleanly but contained no rows.
    #[error("no problems found in {}", .0.display())]
    Empty(PathBuf),

    /// Reading an answer from the answer source failed (including
    /// end-of-input before a token).
    #[error("could not read an answer: {0}")]
    AnswerRead(#[source] std::io::Error),

    /// Writing a question prompt failed.
    #[error("could not write prompt: {0}")]
    Prompt(#[source] std::io::Error),
}
