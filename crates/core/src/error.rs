//! # Error Module
//!
//! Định nghĩa các domain errors cho Bankledger sử dụng thiserror.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::AccountNumber;

/// Core ledger errors.
///
/// Mọi lỗi đều được trả về đồng bộ tại điểm vi phạm, không retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // === Validation errors ===
    #[error("Validation error: {field} {reason}")]
    Validation { field: &'static str, reason: String },

    // === Money errors ===
    #[error(
        "Insufficient funds in account {account_number}: balance {balance}, requested {requested}, minimum {minimum}"
    )]
    InsufficientFunds {
        account_number: AccountNumber,
        balance: Decimal,
        requested: Decimal,
        minimum: Decimal,
    },

    #[error("Balance overflow in account {account_number}: balance {balance}, amount {amount}")]
    BalanceOverflow {
        account_number: AccountNumber,
        balance: Decimal,
        amount: Decimal,
    },

    // === Ledger errors ===
    #[error("Account number already exists: {0}")]
    DuplicateAccountNumber(AccountNumber),

    #[error("User {first_name} {last_name} already has a {account_type} account")]
    DuplicateAccountTypeForUser {
        first_name: String,
        last_name: String,
        account_type: String,
    },

    #[error("Account not found: {0}")]
    AccountNotFound(AccountNumber),
}

/// Result type alias với LedgerError
pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    /// Tạo lỗi validation cho một field
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Kiểm tra có phải lỗi validation không
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation { .. })
    }

    /// Kiểm tra có phải lỗi insufficient funds không
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, LedgerError::InsufficientFunds { .. })
    }

    /// Số dư mới vượt phạm vi biểu diễn của `Decimal`
    pub fn is_overflow(&self) -> bool {
        matches!(self, LedgerError::BalanceOverflow { .. })
    }

    /// Kiểm tra có phải lỗi trùng lặp (số tài khoản hoặc loại tài khoản) không
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            LedgerError::DuplicateAccountNumber(_) | LedgerError::DuplicateAccountTypeForUser { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::AccountNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = LedgerError::InsufficientFunds {
            account_number: 1234567890,
            balance: dec!(1000.00),
            requested: dec!(1200.00),
            minimum: dec!(1000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds in account 1234567890: balance 1000.00, requested 1200.00, minimum 1000"
        );

        let err = LedgerError::BalanceOverflow {
            account_number: 7,
            balance: dec!(1),
            amount: dec!(2.5),
        };
        assert_eq!(
            err.to_string(),
            "Balance overflow in account 7: balance 1, amount 2.5"
        );
        assert!(err.is_overflow());

        let err = LedgerError::AccountNotFound(42);
        assert_eq!(err.to_string(), "Account not found: 42");

        let err = LedgerError::validation("first_name", "is required");
        assert_eq!(err.to_string(), "Validation error: first_name is required");
    }

    #[test]
    fn test_duplicate_type_display() {
        let err = LedgerError::DuplicateAccountTypeForUser {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            account_type: "Savings".to_string(),
        };
        assert_eq!(err.to_string(), "User John Doe already has a Savings account");
    }

    #[test]
    fn test_error_checks() {
        assert!(LedgerError::validation("last_name", "is required").is_validation());
        assert!(LedgerError::DuplicateAccountNumber(1).is_duplicate());
        assert!(LedgerError::AccountNotFound(1).is_not_found());
        assert!(!LedgerError::AccountNotFound(1).is_duplicate());

        let err = LedgerError::InsufficientFunds {
            account_number: 1,
            balance: dec!(1000),
            requested: dec!(1),
            minimum: dec!(1000),
        };
        assert!(err.is_insufficient_funds());
    }
}
