//! Scenario configuration - accounts to open and operations to replay
//!
//! ```toml
//! [[accounts]]
//! first_name = "John"
//! last_name = "Doe"
//! account_number = 1234567890
//! account_type = "Savings"
//! balance = "10000.00"
//! note = "Gift"
//!
//! [[operations]]
//! kind = "deposit"
//! account = 1234567890
//! amount = "5000.00"
//! ```
//!
//! Amounts are written as strings so their scale survives parsing.

use bankledger_core::{Account, AccountNumber, Ledger, LedgerResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Scenario loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("scenario file not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Validation error
    #[error("validation error: {0}")]
    Validation(String),
}

/// An account to open before replaying operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSpec {
    pub first_name: String,
    pub last_name: String,
    pub account_number: AccountNumber,
    pub account_type: String,
    pub balance: Decimal,
    #[serde(default)]
    pub note: String,
}

impl AccountSpec {
    /// Build the validated account
    pub fn build(&self) -> LedgerResult<Account> {
        Account::new(
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.account_number,
            self.account_type.as_str(),
            self.balance,
            self.note.as_str(),
        )
    }
}

/// A ledger operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Operation {
    Deposit {
        account: AccountNumber,
        amount: Decimal,
    },
    Withdraw {
        account: AccountNumber,
        amount: Decimal,
    },
    Transfer {
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    },
    Remove {
        account: AccountNumber,
    },
}

impl Operation {
    /// Apply to the ledger. Removing a missing account is not an error.
    pub fn apply(&self, ledger: &mut Ledger) -> LedgerResult<()> {
        match *self {
            Operation::Deposit { account, amount } => ledger.deposit(account, amount).map(drop),
            Operation::Withdraw { account, amount } => ledger.withdraw(account, amount).map(drop),
            Operation::Transfer { from, to, amount } => ledger.transfer(from, to, amount),
            Operation::Remove { account } => {
                ledger.remove_account(account);
                Ok(())
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Deposit { account, amount } => write!(f, "deposit {} into {}", amount, account),
            Operation::Withdraw { account, amount } => {
                write!(f, "withdraw {} from {}", amount, account)
            }
            Operation::Transfer { from, to, amount } => {
                write!(f, "transfer {} from {} to {}", amount, from, to)
            }
            Operation::Remove { account } => write!(f, "remove {}", account),
        }
    }
}

/// Root scenario document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub accounts: Vec<AccountSpec>,

    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl ScenarioConfig {
    /// The built-in demonstration: two accounts, one deposit, one withdrawal, one transfer
    pub fn demo() -> Self {
        Self {
            accounts: vec![
                AccountSpec {
                    first_name: "John".to_string(),
                    last_name: "Doe".to_string(),
                    account_number: 1234567890,
                    account_type: "Savings".to_string(),
                    balance: Decimal::new(1000000, 2),
                    note: "Gift".to_string(),
                },
                AccountSpec {
                    first_name: "Jane".to_string(),
                    last_name: "Smith".to_string(),
                    account_number: 9876543210,
                    account_type: "Current".to_string(),
                    balance: Decimal::new(10000000, 2),
                    note: "Food".to_string(),
                },
            ],
            operations: vec![
                Operation::Deposit {
                    account: 1234567890,
                    amount: Decimal::new(500000, 2),
                },
                Operation::Withdraw {
                    account: 1234567890,
                    amount: Decimal::new(200000, 2),
                },
                Operation::Transfer {
                    from: 9876543210,
                    to: 1234567890,
                    amount: Decimal::new(100000, 2),
                },
            ],
        }
    }
}

/// Scenario loader
pub struct ScenarioLoader {
    config: ScenarioConfig,
    path: Option<PathBuf>,
}

impl ScenarioLoader {
    /// Load scenario from file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: ScenarioConfig = toml::from_str(&content)?;
        Self::validate(&config)?;

        tracing::info!(
            path = %path.display(),
            accounts = config.accounts.len(),
            operations = config.operations.len(),
            "scenario loaded"
        );

        Ok(Self {
            config,
            path: Some(path.to_path_buf()),
        })
    }

    /// Load scenario from string
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        let config: ScenarioConfig = toml::from_str(content)?;
        Self::validate(&config)?;

        Ok(Self { config, path: None })
    }

    pub fn into_config(self) -> ScenarioConfig {
        self.config
    }

    /// Path the scenario was read from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Structural checks only; ledger rules are enforced when the scenario runs
    fn validate(config: &ScenarioConfig) -> Result<(), ConfigError> {
        if config.accounts.is_empty() {
            return Err(ConfigError::Validation(
                "scenario defines no accounts".to_string(),
            ));
        }

        for (i, spec) in config.accounts.iter().enumerate() {
            if spec.account_type.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "account #{} ({}) has an empty account_type",
                    i + 1,
                    spec.account_number
                )));
            }
        }

        Ok(())
    }
}
