//! # Ledger Module
//!
//! Ledger (Bank) - tập hợp các Account, đánh khóa theo số tài khoản.
//! Ledger do caller sở hữu; không có state toàn cục.

use crate::account::{Account, AccountNumber};
use crate::error::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use std::io::{self, Write};
use tracing::{debug, info, warn};

const RULE: &str = "|---------------|------------------|--------------|-------------|--------|";
const HEADER: &str = "| FULL NAME     | ACCOUNT NUMBER   | ACCOUNT TYPE | ACCOUNT BAL | NOTE   |";

/// In-memory ledger.
///
/// Giữ thứ tự thêm vào (dùng khi in bảng). Hai bất biến:
/// - không có hai account trùng `account_number`
/// - không có hai account trùng bộ ba (first name, last name, account type)
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    accounts: Vec<Account>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Đăng ký account mới.
    ///
    /// # Errors
    /// - [`LedgerError::DuplicateAccountNumber`] nếu số tài khoản đã tồn tại
    /// - [`LedgerError::DuplicateAccountTypeForUser`] nếu người này đã có loại tài khoản đó
    pub fn add_account(&mut self, account: Account) -> LedgerResult<()> {
        if self.contains(account.account_number()) {
            warn!(
                account_number = account.account_number(),
                "rejected account: duplicate number"
            );
            return Err(LedgerError::DuplicateAccountNumber(account.account_number()));
        }

        if self
            .accounts
            .iter()
            .any(|existing| existing.owner_key() == account.owner_key())
        {
            warn!(
                account_number = account.account_number(),
                account_type = %account.account_type(),
                "rejected account: owner already holds this type"
            );
            return Err(LedgerError::DuplicateAccountTypeForUser {
                first_name: account.first_name().to_string(),
                last_name: account.last_name().to_string(),
                account_type: account.account_type().to_string(),
            });
        }

        info!(
            account_number = account.account_number(),
            account_type = %account.account_type(),
            "account added"
        );
        self.accounts.push(account);
        Ok(())
    }

    /// Xóa account theo số tài khoản. Không tìm thấy thì không làm gì.
    pub fn remove_account(&mut self, account_number: AccountNumber) -> Option<Account> {
        let index = self.position(account_number)?;
        info!(account_number, "account removed");
        Some(self.accounts.remove(index))
    }

    /// Tìm account theo số tài khoản
    pub fn get_account(&self, account_number: AccountNumber) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.account_number() == account_number)
    }

    /// Handle mutable tới account trong ledger (thay đổi có hiệu lực ngay trên ledger)
    pub fn get_account_mut(&mut self, account_number: AccountNumber) -> Option<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.account_number() == account_number)
    }

    /// View của toàn bộ accounts, theo thứ tự thêm vào
    pub fn get_accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains(&self, account_number: AccountNumber) -> bool {
        self.position(account_number).is_some()
    }

    /// Tổng số dư của mọi account; `None` nếu tổng vượt phạm vi `Decimal`
    pub fn total_balance(&self) -> Option<Decimal> {
        self.accounts
            .iter()
            .try_fold(Decimal::ZERO, |total, account| total.checked_add(account.balance()))
    }

    /// Gửi tiền vào account. Trả về số dư mới.
    pub fn deposit(&mut self, account_number: AccountNumber, amount: Decimal) -> LedgerResult<Decimal> {
        let account = self.require_mut(account_number)?;
        account.deposit(amount)
    }

    /// Rút tiền từ account. Quy tắc Savings do [`Account::withdraw`] quyết định.
    pub fn withdraw(&mut self, account_number: AccountNumber, amount: Decimal) -> LedgerResult<Decimal> {
        let account = self.require_mut(account_number)?;
        account.withdraw(amount)
    }

    /// Chuyển tiền giữa hai account.
    ///
    /// Cả hai account được tra cứu, và cả hai số dư mới được tính, trước khi
    /// thay đổi gì. Lỗi ở bất kỳ bước nào đều để nguyên cả hai số dư.
    pub fn transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    ) -> LedgerResult<()> {
        let from_index = self.position(from).ok_or(LedgerError::AccountNotFound(from))?;
        let to_index = self.position(to).ok_or(LedgerError::AccountNotFound(to))?;

        if from_index == to_index {
            // Chuyển cho chính mình: số dư không đổi, chỉ cần qua kiểm tra Savings
            self.accounts[from_index].debited(amount)?;
            debug!(from, to, %amount, "transfer to self applied");
            return Ok(());
        }

        let (source, target) = pair_mut(&mut self.accounts, from_index, to_index);
        source.transfer(amount, target)
    }

    /// In bảng accounts dạng fixed-width ra `out`.
    pub fn print_accounts<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.render_accounts().as_bytes())
    }

    /// Bảng accounts dạng String
    pub fn render_accounts(&self) -> String {
        let mut table = String::new();
        for line in [RULE, HEADER, RULE] {
            table.push_str(line);
            table.push('\n');
        }
        for account in &self.accounts {
            table.push_str(&format_row(account));
            table.push('\n');
        }
        table.push_str(RULE);
        table.push('\n');
        table
    }

    fn position(&self, account_number: AccountNumber) -> Option<usize> {
        self.accounts
            .iter()
            .position(|a| a.account_number() == account_number)
    }

    fn require_mut(&mut self, account_number: AccountNumber) -> LedgerResult<&mut Account> {
        match self.get_account_mut(account_number) {
            Some(account) => Ok(account),
            None => {
                warn!(account_number, "account not found");
                Err(LedgerError::AccountNotFound(account_number))
            }
        }
    }
}

/// Hai tham chiếu mutable tới hai phần tử khác nhau của slice
fn pair_mut(accounts: &mut [Account], a: usize, b: usize) -> (&mut Account, &mut Account) {
    if a < b {
        let (left, right) = accounts.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = accounts.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Account;
    type IntoIter = std::slice::Iter<'a, Account>;

    fn into_iter(self) -> Self::IntoIter {
        self.accounts.iter()
    }
}

/// Một dòng của bảng fixed-width
pub fn format_row(account: &Account) -> String {
    format!(
        "| {} {:<9} | {:<16} | {:<13} | {:<11} | {:<6} |",
        account.first_name(),
        account.last_name(),
        account.account_number(),
        account.account_type().as_str(),
        account.balance().to_string(),
        account.note()
    )
}
