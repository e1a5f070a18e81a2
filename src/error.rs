//! # error
//!
//! Errors raised while reading prescription records and writing the report.
//! Every variant is fatal to the run.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrescriptionError {
    /// Row did not split into exactly five fields after quoted commas were removed.
    #[error("line {line}: a row must have 5 columns but found this row\n{row}")]
    Format { line: usize, row: String },

    #[error("line {line}: id '{value}' is not an integer")]
    InvalidId { line: usize, value: String },

    #[error("line {line}: drug cost '{value}' is not a number")]
    InvalidCost { line: usize, value: String },

    #[error("line {line}: total cost of '{drug}' overflowed")]
    CostOverflow { line: usize, drug: String },

    #[error("line {line}: not valid UTF-8")]
    Encoding { line: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}
