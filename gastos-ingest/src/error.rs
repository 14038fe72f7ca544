//! Error type for statement parsing

use thiserror::Error;

/// Raised when a statement cannot be turned into a table.
/// No partial table is ever returned alongside it.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("statement is empty")]
    Empty,

    #[error("missing required column '{0}'")]
    MissingColumn(String),
}

impl ParseError {
    /// Hint shown next to the error message
    pub fn hint(&self) -> &'static str {
        match self {
            ParseError::Io(_) => "Check that the file path exists and is readable.",
            _ => "Check that the CSV file is in the expected format (a 'Valor' column with amounts like 1.234,56).",
        }
    }
}
