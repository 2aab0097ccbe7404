//! Expense error types.
//!
//! Validation errors are deterministic: resubmitting the same input
//! reproduces the same error. `NoParticipants` is a precondition failure of
//! the equal split, and `Persistence` covers every storage failure.

use rust_decimal::Decimal;
use splitledger_shared::types::UserId;
use thiserror::Error;

use super::types::SplitMethod;
use crate::user::DirectoryError;

/// Errors that can occur while recording an expense.
#[derive(Debug, Error)]
pub enum ExpenseError {
    // ========== Validation Errors ==========
    /// Amount is not positive, has more than 2 decimal places, or overflows storage.
    #[error("Invalid expense amount: {0}")]
    InvalidAmount(Decimal),

    /// Title is blank or longer than the title column.
    #[error("Title must be between 1 and 255 characters")]
    InvalidTitle,

    /// A share list the method does not read was supplied.
    #[error("Split inputs conflict with split method '{0}'")]
    ConflictingInput(SplitMethod),

    /// The share list the method needs is empty or absent.
    #[error("Split method '{0}' requires a non-empty split list")]
    MissingInput(SplitMethod),

    /// A share is negative, over-precise, or out of range.
    #[error("Invalid split value {value} for user {user}")]
    InvalidShare {
        /// Participant the share belongs to.
        user: UserId,
        /// Offending value.
        value: Decimal,
    },

    /// The same user appears twice in the share list.
    #[error("User {0} appears more than once in the split list")]
    DuplicateParticipant(UserId),

    /// A share names a user the directory does not know.
    #[error("User not found: {0}")]
    UnknownUser(UserId),

    /// Exact shares do not add up to the expense amount.
    #[error("Split amounts add up to {actual}, expected {expected}")]
    AmountMismatch {
        /// Expense amount.
        expected: Decimal,
        /// Sum of the shares.
        actual: Decimal,
    },

    /// Percentages do not add up to 100.
    #[error("Percentages add up to {0}, expected 100")]
    PercentageSum(Decimal),

    // ========== Precondition Errors ==========
    /// Equal split with no registered users.
    #[error("No registered users to split the expense between")]
    NoParticipants,

    // ========== Storage Errors ==========
    /// Storage failed; nothing was written.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl ExpenseError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidTitle => "INVALID_TITLE",
            Self::ConflictingInput(_) => "CONFLICTING_INPUT",
            Self::MissingInput(_) => "MISSING_INPUT",
            Self::InvalidShare { .. } => "INVALID_SHARE",
            Self::DuplicateParticipant(_) => "DUPLICATE_PARTICIPANT",
            Self::UnknownUser(_) => "UNKNOWN_USER",
            Self::AmountMismatch { .. } => "AMOUNT_MISMATCH",
            Self::PercentageSum(_) => "PERCENTAGE_SUM",
            Self::NoParticipants => "NO_PARTICIPANTS",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NoParticipants => 422,
            Self::Persistence(_) => 500,
            _ => 400,
        }
    }

    /// Returns true if the caller can fix this by changing the input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::NoParticipants | Self::Persistence(_))
    }
}

impl From<DirectoryError> for ExpenseError {
    fn from(err: DirectoryError) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ExpenseError::ConflictingInput(SplitMethod::Equal).error_code(),
            "CONFLICTING_INPUT"
        );
        assert_eq!(
            ExpenseError::DuplicateParticipant(UserId::new()).error_code(),
            "DUPLICATE_PARTICIPANT"
        );
        assert_eq!(ExpenseError::InvalidTitle.error_code(), "INVALID_TITLE");
        assert_eq!(ExpenseError::NoParticipants.error_code(), "NO_PARTICIPANTS");
        assert_eq!(
            ExpenseError::Persistence(String::new()).error_code(),
            "PERSISTENCE_ERROR"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(ExpenseError::InvalidAmount(dec!(0)).http_status_code(), 400);
        assert_eq!(ExpenseError::PercentageSum(dec!(70)).http_status_code(), 400);
        assert_eq!(ExpenseError::InvalidTitle.http_status_code(), 400);
        assert!(ExpenseError::InvalidTitle.is_validation());
        assert_eq!(ExpenseError::NoParticipants.http_status_code(), 422);
        assert_eq!(
            ExpenseError::Persistence("boom".to_string()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_validation_classification() {
        assert!(ExpenseError::MissingInput(SplitMethod::Exact).is_validation());
        assert!(ExpenseError::UnknownUser(UserId::new()).is_validation());
        assert!(!ExpenseError::NoParticipants.is_validation());
        assert!(!ExpenseError::Persistence(String::new()).is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = ExpenseError::AmountMismatch {
            expected: dec!(100.00),
            actual: dec!(110.00),
        };
        assert_eq!(err.to_string(), "Split amounts add up to 110.00, expected 100.00");
        assert_eq!(
            ExpenseError::PercentageSum(dec!(70.0)).to_string(),
            "Percentages add up to 70.0, expected 100"
        );
    }

    #[test]
    fn test_directory_failure_is_persistence() {
        let err: ExpenseError = DirectoryError::Unavailable("pool closed".to_string()).into();
        assert!(matches!(err, ExpenseError::Persistence(_)));
    }
}
