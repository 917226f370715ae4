//! # Bankledger Core
//!
//! Core domain types - Account, AccountType, Ledger, LedgerError.
//!
//! ## Example
//!
//! ```
//! use bankledger_core::{Account, Ledger};
//! use rust_decimal::Decimal;
//!
//! let mut ledger = Ledger::new();
//! let john = Account::new("John", "Doe", 1234567890, "Savings", Decimal::new(1000000, 2), "Gift")?;
//! ledger.add_account(john)?;
//! ledger.deposit(1234567890, Decimal::new(500, 0))?;
//! assert_eq!(ledger.get_account(1234567890).map(|a| a.balance()), Some(Decimal::new(1050000, 2)));
//! # Ok::<(), bankledger_core::LedgerError>(())
//! ```

pub mod account;
pub mod error;
pub mod ledger;
pub mod rules;

pub use account::{Account, AccountNumber, AccountType, CustomTag, OwnerKey};
pub use error::{LedgerError, LedgerResult};
pub use ledger::{format_row, Ledger};
pub use rules::{MAX_NAME_LENGTH, SAVINGS_MINIMUM};
