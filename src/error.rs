// Error taxonomy for the expense service
// Validation errors go back to the client, everything else stays in the logs

use thiserror::Error;

pub const MISSING_FIELDS: &str = "All fields (category, amount, date) are required.";
pub const NON_POSITIVE_AMOUNT: &str = "Amount must be a positive number.";

/// Generic message for every internal failure.
pub const INTERNAL_MESSAGE: &str = "Something went wrong!";

#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Client supplied missing or invalid input
    #[error("{0}")]
    Validation(String),

    /// A thread panicked while holding the store lock
    #[error("expense store is unavailable (lock poisoned)")]
    StoreUnavailable,

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

impl ExpenseError {
    pub fn validation(message: impl Into<String>) -> Self {
        ExpenseError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ExpenseError::Validation(_))
    }

    /// Message safe to show to a client.
    pub fn public_message(&self) -> &str {
        match self {
            ExpenseError::Validation(message) => message,
            _ => INTERNAL_MESSAGE,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
