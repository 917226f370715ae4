//! Account listing report
//!
//! Snapshot of a ledger's accounts, ready for any [`ListingExporter`](crate::ListingExporter).

use bankledger_core::{Account, AccountNumber, Ledger};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRow {
    pub full_name: String,
    pub account_number: AccountNumber,
    pub account_type: String,
    /// Serialized as a string so the scale survives (`"14000.00"`)
    pub balance: Decimal,
    pub note: String,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            full_name: account.full_name(),
            account_number: account.account_number(),
            account_type: account.account_type().to_string(),
            balance: account.balance(),
            note: account.note().to_string(),
        }
    }
}

/// Account listing report data
#[derive(Debug, Clone, Serialize)]
pub struct AccountListing {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub savings_count: usize,
    /// `None` once the running total leaves the `Decimal` range
    pub total_balance: Option<Decimal>,
    pub accounts: Vec<AccountRow>,
}

impl AccountListing {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            generated_at: Utc::now(),
            savings_count: 0,
            total_balance: Some(Decimal::ZERO),
            accounts: Vec::new(),
        }
    }

    pub fn add_account(&mut self, account: &Account) {
        if account.is_savings() {
            self.savings_count += 1;
        }
        self.total_balance = self
            .total_balance
            .and_then(|total| total.checked_add(account.balance()));
        self.accounts.push(AccountRow::from(account));
    }

    /// Snapshot every account of the ledger, in ledger order
    pub fn from_ledger(title: &str, ledger: &Ledger) -> Self {
        let mut listing = Self::new(title);
        for account in ledger {
            listing.add_account(account);
        }
        listing
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Total balance for display; "overflow" when it cannot be represented
    pub fn total_balance_text(&self) -> String {
        match self.total_balance {
            Some(total) => total.to_string(),
            None => "overflow".to_string(),
        }
    }
}
