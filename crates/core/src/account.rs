//! # Account Module
//!
//! Định nghĩa Account - đại diện cho tài khoản ngân hàng của một người.
//! Account được validate khi tạo; số dư chỉ thay đổi qua deposit/withdraw/transfer.

use crate::error::{LedgerError, LedgerResult};
use crate::rules::{MAX_NAME_LENGTH, SAVINGS_MINIMUM};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Số tài khoản (đủ rộng cho số 10 chữ số)
pub type AccountNumber = i64;

/// Loại tài khoản.
///
/// Chỉ `Savings` có quy tắc số dư tối thiểu; các loại khác được giữ nguyên tên.
/// Tag "Savings"/"Current" luôn ra đúng variant của nó, nên so sánh bằng `==`
/// và [`is_savings`](Self::is_savings) đều theo tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountType {
    /// Tài khoản tiết kiệm - số dư không được xuống dưới [`SAVINGS_MINIMUM`]
    Savings,
    /// Tài khoản thanh toán - được phép âm
    Current,
    /// Loại khác, giữ nguyên tag
    Other(CustomTag),
}

/// Tag của loại tài khoản ngoài Savings/Current.
///
/// Chỉ tạo được qua [`AccountType::parse`], nên không bao giờ mang tag
/// "Savings" hay "Current".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomTag(String);

impl CustomTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AccountType {
    /// Trả về tag string
    pub fn as_str(&self) -> &str {
        match self {
            AccountType::Savings => "Savings",
            AccountType::Current => "Current",
            AccountType::Other(tag) => tag.as_str(),
        }
    }

    /// Parse từ tag string. Phân biệt hoa thường: chỉ "Savings" là tiết kiệm.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "Savings" => AccountType::Savings,
            "Current" => AccountType::Current,
            other => AccountType::Other(CustomTag(other.to_string())),
        }
    }

    pub fn is_savings(&self) -> bool {
        matches!(self, AccountType::Savings)
    }
}

impl From<&str> for AccountType {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<String> for AccountType {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<AccountType> for String {
    fn from(account_type: AccountType) -> Self {
        account_type.as_str().to_string()
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bộ ba (first name, last name, account type) - một người không được có
/// hai tài khoản cùng loại.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerKey<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub account_type: &'a AccountType,
}

/// Tài khoản ngân hàng.
///
/// Các field định danh (tên, số tài khoản, loại) là bất biến sau khi tạo,
/// nên handle `&mut Account` lấy từ [`Ledger`](crate::Ledger) không thể phá vỡ
/// các ràng buộc duy nhất của ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    first_name: String,
    last_name: String,
    account_number: AccountNumber,
    account_type: AccountType,
    /// Số dư (Decimal, serialize thành String trong JSON)
    balance: Decimal,
    note: String,
}

impl Account {
    /// Tạo Account mới sau khi validate first/last name.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        account_number: AccountNumber,
        account_type: impl Into<AccountType>,
        balance: Decimal,
        note: impl Into<String>,
    ) -> LedgerResult<Self> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        validate_name("first_name", &first_name)?;
        validate_name("last_name", &last_name)?;

        Ok(Self {
            first_name,
            last_name,
            account_number,
            account_type: account_type.into(),
            balance,
            note: note.into(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn account_number(&self) -> AccountNumber {
        self.account_number
    }

    pub fn account_type(&self) -> &AccountType {
        &self.account_type
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// Note không có ràng buộc nên có thể sửa tự do
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    pub fn is_savings(&self) -> bool {
        self.account_type.is_savings()
    }

    /// Bộ ba dùng để kiểm tra trùng loại tài khoản
    pub fn owner_key(&self) -> OwnerKey<'_> {
        OwnerKey {
            first_name: &self.first_name,
            last_name: &self.last_name,
            account_type: &self.account_type,
        }
    }

    /// Gửi tiền. Không kiểm tra dấu của `amount`.
    ///
    /// Trả về số dư mới.
    ///
    /// # Errors
    /// [`LedgerError::BalanceOverflow`] nếu số dư vượt phạm vi của `Decimal`.
    pub fn deposit(&mut self, amount: Decimal) -> LedgerResult<Decimal> {
        self.balance = self.credited(amount)?;
        debug!(
            account_number = self.account_number,
            %amount,
            balance = %self.balance,
            "deposit applied"
        );
        Ok(self.balance)
    }

    /// Rút tiền.
    ///
    /// # Errors
    /// - [`LedgerError::InsufficientFunds`] nếu là tài khoản Savings và số dư sau
    ///   khi rút nhỏ hơn [`SAVINGS_MINIMUM`]
    /// - [`LedgerError::BalanceOverflow`] nếu phép trừ vượt phạm vi
    ///
    /// Khi lỗi, số dư không đổi.
    pub fn withdraw(&mut self, amount: Decimal) -> LedgerResult<Decimal> {
        self.balance = self.debited(amount)?;
        debug!(
            account_number = self.account_number,
            %amount,
            balance = %self.balance,
            "withdrawal applied"
        );
        Ok(self.balance)
    }

    /// Chuyển tiền sang tài khoản khác: withdraw ở đây rồi deposit ở `other`.
    ///
    /// Cả hai số dư mới được tính trước khi ghi, nên nếu một bên lỗi thì
    /// cả hai số dư đều không đổi.
    pub fn transfer(&mut self, amount: Decimal, other: &mut Account) -> LedgerResult<()> {
        let from_balance = self.debited(amount)?;
        let to_balance = other.credited(amount)?;

        self.balance = from_balance;
        other.balance = to_balance;
        debug!(
            from = self.account_number,
            to = other.account_number,
            %amount,
            "transfer applied"
        );
        Ok(())
    }

    /// Số dư sau khi cộng `amount`, chưa ghi lại
    pub(crate) fn credited(&self, amount: Decimal) -> LedgerResult<Decimal> {
        self.balance
            .checked_add(amount)
            .ok_or_else(|| self.overflow(amount))
    }

    /// Số dư sau khi trừ `amount` và qua quy tắc Savings, chưa ghi lại
    pub(crate) fn debited(&self, amount: Decimal) -> LedgerResult<Decimal> {
        let balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| self.overflow(amount))?;

        if self.is_savings() && balance < SAVINGS_MINIMUM {
            warn!(
                account_number = self.account_number,
                %amount,
                balance = %self.balance,
                "withdrawal rejected: savings minimum"
            );
            return Err(LedgerError::InsufficientFunds {
                account_number: self.account_number,
                balance: self.balance,
                requested: amount,
                minimum: SAVINGS_MINIMUM,
            });
        }

        Ok(balance)
    }

    fn overflow(&self, amount: Decimal) -> LedgerError {
        warn!(
            account_number = self.account_number,
            %amount,
            balance = %self.balance,
            "rejected: balance overflow"
        );
        LedgerError::BalanceOverflow {
            account_number: self.account_number,
            balance: self.balance,
            amount,
        }
    }

    /// Mô tả ngắn gọn, giống `Display`
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account {}: {} {} ({}) - Balance: {}",
            self.account_number, self.first_name, self.last_name, self.account_type, self.balance
        )
    }
}

/// Validate một field tên: bắt buộc, tối đa [`MAX_NAME_LENGTH`] ký tự,
/// bắt đầu bằng chữ in hoa.
fn validate_name(field: &'static str, value: &str) -> LedgerResult<()> {
    let Some(first) = value.chars().next() else {
        return Err(LedgerError::validation(field, "is required"));
    };

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(LedgerError::validation(
            field,
            format!("must not exceed {} characters", MAX_NAME_LENGTH),
        ));
    }

    if first.is_ascii_digit() {
        return Err(LedgerError::validation(field, "must not start with a number"));
    }

    if !first.is_uppercase() {
        return Err(LedgerError::validation(
            field,
            "must start with an uppercase letter",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn savings(balance: Decimal) -> Account {
        Account::new("John", "Doe", 1234567890, "Savings", balance, "Gift").unwrap()
    }

    fn current(balance: Decimal) -> Account {
        Account::new("Jane", "Smith", 987654321, "Current", balance, "Food").unwrap()
    }

    #[test]
    fn test_account_creation() {
        let account = savings(dec!(1000.00));

        assert_eq!(account.first_name(), "John");
        assert_eq!(account.last_name(), "Doe");
        assert_eq!(account.full_name(), "John Doe");
        assert_eq!(account.account_number(), 1234567890);
        assert_eq!(account.account_type(), &AccountType::Savings);
        assert_eq!(account.balance(), dec!(1000.00));
        assert_eq!(account.note(), "Gift");
        assert!(account.is_savings());
    }

    #[test]
    fn test_valid_names() {
        for name in ["J", "John", "O'Brien", "Élodie", "ABCDEFGHIJKLMNOPQRST"] {
            assert!(
                Account::new(name, name, 1, "Current", dec!(0), "").is_ok(),
                "{name} should be accepted"
            );
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Account::new("", "Doe", 1, "Savings", dec!(0), "").unwrap_err();
        assert_eq!(err, LedgerError::validation("first_name", "is required"));

        let err = Account::new("John", "", 1, "Savings", dec!(0), "").unwrap_err();
        assert_eq!(err, LedgerError::validation("last_name", "is required"));
    }

    #[test]
    fn test_long_name_rejected() {
        let long = "Abcdefghijklmnopqrstu"; // 21 chars
        let err = Account::new(long, "Doe", 1, "Savings", dec!(0), "").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("must not exceed 20 characters"));

        let err = Account::new("John", long, 1, "Savings", dec!(0), "").unwrap_err();
        assert!(err.to_string().contains("last_name"));
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 20 multi-byte characters
        let name = "Éééééééééééééééééééé";
        assert_eq!(name.chars().count(), 20);
        assert!(Account::new(name, "Doe", 1, "Current", dec!(0), "").is_ok());
    }

    #[test]
    fn test_name_must_start_uppercase() {
        let err = Account::new("john", "Doe", 1, "Savings", dec!(0), "").unwrap_err();
        assert_eq!(
            err,
            LedgerError::validation("first_name", "must start with an uppercase letter")
        );

        let err = Account::new("John", "1Doe", 1, "Savings", dec!(0), "").unwrap_err();
        assert_eq!(
            err,
            LedgerError::validation("last_name", "must not start with a number")
        );

        let err = Account::new("_John", "Doe", 1, "Savings", dec!(0), "").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_deposit_is_unconditional() {
        let mut account = current(dec!(500.00));
        assert_eq!(account.deposit(dec!(100.25)).unwrap(), dec!(600.25));

        // Amounts are not validated: zero and negative deposits apply as-is
        assert_eq!(account.deposit(dec!(0)).unwrap(), dec!(600.25));
        assert_eq!(account.deposit(dec!(-50)).unwrap(), dec!(550.25));
    }

    #[test]
    fn test_savings_withdraw_respects_minimum() {
        let mut account = savings(dec!(1500.00));
        assert_eq!(account.withdraw(dec!(500.00)).unwrap(), dec!(1000.00));

        let err = account.withdraw(dec!(0.01)).unwrap_err();
        assert!(err.is_insufficient_funds());
        assert_eq!(account.balance(), dec!(1000.00));
    }

    #[test]
    fn test_savings_at_minimum_rejects_any_withdrawal() {
        let mut account = savings(dec!(1000.00));
        let err = account.withdraw(dec!(200.00)).unwrap_err();

        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                account_number: 1234567890,
                balance: dec!(1000.00),
                requested: dec!(200.00),
                minimum: dec!(1000),
            }
        );
        assert_eq!(account.balance(), dec!(1000.00));
    }

    #[test]
    fn test_current_may_go_negative() {
        let mut account = current(dec!(100));
        assert_eq!(account.withdraw(dec!(250)).unwrap(), dec!(-150));
    }

    #[test]
    fn test_negative_withdrawal_increases_balance() {
        // Amounts are not validated; a negative withdrawal adds funds
        let mut account = savings(dec!(1000));
        assert_eq!(account.withdraw(dec!(-10)).unwrap(), dec!(1010));
    }

    #[test]
    fn test_transfer() {
        let mut from = savings(dec!(1500.00));
        let mut to = current(dec!(500.00));

        from.transfer(dec!(100.00), &mut to).unwrap();

        assert_eq!(from.balance(), dec!(1400.00));
        assert_eq!(to.balance(), dec!(600.00));
        assert_eq!(from.balance() + to.balance(), dec!(2000.00));
    }

    #[test]
    fn test_failed_transfer_leaves_both_unchanged() {
        let mut from = savings(dec!(1000.00));
        let mut to = current(dec!(500.00));

        let err = from.transfer(dec!(100.00), &mut to).unwrap_err();

        assert!(err.is_insufficient_funds());
        assert_eq!(from.balance(), dec!(1000.00));
        assert_eq!(to.balance(), dec!(500.00));
    }

    #[test]
    fn test_account_display() {
        let account = savings(dec!(10000.00));
        assert_eq!(
            account.describe(),
            "Account 1234567890: John Doe (Savings) - Balance: 10000.00"
        );
    }

    #[test]
    fn test_account_type_parse() {
        assert_eq!(AccountType::parse("Savings"), AccountType::Savings);
        assert_eq!(AccountType::parse("Current"), AccountType::Current);
        assert!(!AccountType::parse("savings").is_savings());
        assert_eq!(AccountType::parse("savings").as_str(), "savings");
        assert_eq!(AccountType::from("Checking").as_str(), "Checking");

        match AccountType::parse("Checking") {
            AccountType::Other(tag) => assert_eq!(tag.as_str(), "Checking"),
            other => panic!("expected custom tag, got {other:?}"),
        }
    }

    #[test]
    fn test_savings_tag_always_maps_to_savings() {
        // Every way of naming the tag lands on the same variant
        let from_string = AccountType::from("Savings".to_string());
        let from_json: AccountType = serde_json::from_str("\"Savings\"").unwrap();

        assert_eq!(from_string, AccountType::Savings);
        assert_eq!(from_json, AccountType::Savings);
        assert!(from_json.is_savings());
        assert_eq!(
            AccountType::from("Current".to_string()),
            AccountType::Current
        );

        let mut account =
            Account::new("John", "Doe", 1, from_string, dec!(1000), "").unwrap();
        let err = account.withdraw(dec!(900)).unwrap_err();
        assert!(err.is_insufficient_funds());
        assert_eq!(account.balance(), dec!(1000));
    }

    #[test]
    fn test_deposit_overflow_is_rejected() {
        let mut account = current(dec!(1));

        let err = account.deposit(Decimal::MAX).unwrap_err();

        assert_eq!(
            err,
            LedgerError::BalanceOverflow {
                account_number: 987654321,
                balance: dec!(1),
                amount: Decimal::MAX,
            }
        );
        assert_eq!(account.balance(), dec!(1));
    }

    #[test]
    fn test_withdraw_overflow_is_rejected() {
        let mut account = savings(dec!(1000));
        let err = account.withdraw(-Decimal::MAX).unwrap_err();
        assert!(err.is_overflow());
        assert_eq!(account.balance(), dec!(1000));

        let mut account = current(dec!(-1));
        assert!(account.withdraw(Decimal::MAX).unwrap_err().is_overflow());
        assert_eq!(account.balance(), dec!(-1));
    }

    #[test]
    fn test_transfer_overflow_leaves_both_unchanged() {
        let mut from = current(dec!(10));
        let mut to = savings(Decimal::MAX);

        let err = from.transfer(dec!(5), &mut to).unwrap_err();

        assert!(err.is_overflow());
        assert_eq!(from.balance(), dec!(10));
        assert_eq!(to.balance(), Decimal::MAX);
    }

    #[test]
    fn test_owner_key_equality() {
        let a = savings(dec!(1000));
        let b = Account::new("John", "Doe", 42, "Savings", dec!(5), "other").unwrap();
        let c = Account::new("John", "Doe", 43, "Current", dec!(5), "").unwrap();

        assert_eq!(a.owner_key(), b.owner_key());
        assert_ne!(a.owner_key(), c.owner_key());
    }

    #[test]
    fn test_account_serializes_balance_as_string() {
        let account = savings(dec!(1000.50));
        let json = serde_json::to_value(&account).unwrap();

        assert_eq!(json["account_type"], "Savings");
        assert_eq!(json["balance"], "1000.50");
        assert_eq!(json["account_number"], 1234567890);
    }
}
