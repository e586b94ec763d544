//! CSV problem loader.
//!
//! Problem files are header-less, comma-separated rows of exactly two
//! fields: question, answer. Row order is preserved and an empty file is an
//! error, detected before any prompt is ever shown.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::QuizError;
use crate::model::Problem;

/// Load problems from a CSV file.
pub fn load_problems(path: &Path) -> Result<Vec<Problem>, QuizError> {
    let file = File::open(path).map_err(|source| QuizError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file, path)
}

/// Load problems from any reader; `origin` names the source in errors.
pub fn load_from_reader<R: Read>(reader: R, origin: &Path) -> Result<Vec<Problem>, QuizError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut problems = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|source| QuizError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

        if record.len() != 2 {
            return Err(QuizError::RowShape {
                path: origin.to_path_buf(),
                row: index + 1,
                fields: record.len(),
            });
        }

        problems.push(Problem::new(&record[0], &record[1]));
    }

    if problems.is_empty() {
        return Err(QuizError::Empty(origin.to_path_buf()));
    }

    tracing::debug!(
        count = problems.len(),
        path = %origin.display(),
        "loaded problems"
    );

    Ok(problems)
}
