// Error taxonomy for the bank console
//
// Domain failures (funds, lookup, menu) are recoverable: the console prints
// the message and goes back to the menu. Only I/O failures end the session.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankError {
    /// Savings / FixedDeposit withdrawal larger than the balance
    #[error("Insufficient funds!")]
    InsufficientFunds { requested: f64, available: f64 },

    /// Checking withdrawal larger than balance + overdraft limit
    #[error("Withdrawal exceeds overdraft limit!")]
    OverdraftExceeded { requested: f64, available: f64 },

    #[error("Account not found!")]
    AccountNotFound(String),

    #[error("Invalid choice! Please select 1-8.")]
    InvalidMenuChoice(i64),

    #[error("Invalid input! Please enter a valid number.")]
    InvalidNumber(String),

    /// Input stream reached end of file while waiting for a value
    #[error("input closed")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type BankResult<T> = Result<T, BankError>;

impl BankError {
    /// Errors that are reported on the console and then ignored
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, BankError::InputClosed | BankError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_matches_console_text() {
        let err = BankError::InsufficientFunds {
            requested: 1500.0,
            available: 1000.0,
        };
        assert_eq!(err.to_string(), "Insufficient funds!");

        let err = BankError::OverdraftExceeded {
            requested: 400.0,
            available: 100.0,
        };
        assert_eq!(err.to_string(), "Withdrawal exceeds overdraft limit!");

        let err = BankError::AccountNotFound("S9".to_string());
        assert_eq!(err.to_string(), "Account not found!");

        let err = BankError::InvalidMenuChoice(42);
        assert_eq!(err.to_string(), "Invalid choice! Please select 1-8.");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(BankError::AccountNotFound("X".to_string()).is_recoverable());
        assert!(BankError::InvalidMenuChoice(0).is_recoverable());
        assert!(BankError::InvalidNumber("abc".to_string()).is_recoverable());
        assert!(!BankError::InputClosed.is_recoverable());

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(!BankError::from(io).is_recoverable());
    }
}
