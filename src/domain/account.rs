//! Account domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A ledger account owned by the authenticated user.
///
/// The identifier is opaque and server-issued; it is the key used as the
/// transfer origin/destination. The balance is authoritative only
/// immediately after a successful fetch — the synchronizer replaces the
/// whole collection on every refresh, never merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub balance: Decimal,
    pub account_number: String,
}

impl Account {
    pub fn new(id: impl Into<String>, balance: Decimal, account_number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            balance,
            account_number: account_number.into(),
        }
    }

    /// Masked display form of the account number.
    ///
    /// Only the last 4 characters are ever shown.
    pub fn masked_number(&self) -> String {
        let digits: Vec<char> = self.account_number.chars().collect();
        let tail: String = if digits.len() > 4 {
            digits[digits.len() - 4..].iter().collect()
        } else {
            self.account_number.clone()
        };
        format!("**** **** {}", tail)
    }

    /// Validate account data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.id.trim().is_empty() {
            return Err("account id cannot be empty");
        }
        if self.account_number.trim().is_empty() {
            return Err("account number cannot be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_number_shows_last_four() {
        let account = Account::new("1", Decimal::new(10000, 2), "1234567890");
        assert_eq!(account.masked_number(), "**** **** 7890");
    }

    #[test]
    fn test_masked_number_short_value() {
        let account = Account::new("1", Decimal::ZERO, "42");
        assert_eq!(account.masked_number(), "**** **** 42");
    }

    #[test]
    fn test_account_validation() {
        let mut account = Account::new("acct-1", Decimal::new(50000, 2), "1234567890");
        assert!(account.validate().is_ok());

        account.id = "".to_string();
        assert!(account.validate().is_err());
    }
}
