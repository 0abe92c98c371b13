use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinanceError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Amount must be a non-negative number, got {0}")]
    InvalidAmount(f64),

    #[error("Percentage must be between 0 and 100, got {0}")]
    InvalidPercentage(f64),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid month (expected YYYY-MM): {0}")]
    InvalidMonth(String),

    #[error("Ask a question or pick one with --quick")]
    EmptyQuestion,

    #[error("No quick question #{0} (run `fintrack questions` to list them)")]
    UnknownQuickQuestion(usize),
}

pub type Result<T> = std::result::Result<T, FinanceError>;
