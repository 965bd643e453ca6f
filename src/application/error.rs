use thiserror::Error;

use crate::domain::LedgerError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Input line is not valid UTF-8")]
    InvalidEncoding,
}

impl AppError {
    /// True when the ledger refused the values themselves (empty name, bad cost).
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Ledger(err) if err.is_validation())
    }
}
