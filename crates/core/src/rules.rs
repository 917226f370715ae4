//! Business rule constants

use rust_decimal::Decimal;

/// Minimum balance a Savings account must keep after a withdrawal or transfer-out
pub const SAVINGS_MINIMUM: Decimal = Decimal::ONE_THOUSAND;

/// Maximum length (in characters) of a first or last name
pub const MAX_NAME_LENGTH: usize = 20;
