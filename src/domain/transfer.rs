//! Transfer request and receipt models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

/// A validated funds-transfer request.
///
/// Ephemeral: exists only for the duration of one submission and is never
/// persisted. Construction performs all client-side validation, so a value
/// of this type is always safe to put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub source_account_id: String,
    pub target_account_id: String,
    pub amount: Decimal,
}

impl TransferRequest {
    /// Build a transfer request from user input.
    ///
    /// The destination and amount arrive as raw form text. Fails with a
    /// validation error when either is missing, the amount is not a number,
    /// or the amount is not positive. None of these failures reach the
    /// network.
    pub fn new(source_account_id: impl Into<String>, target_account_id: &str, amount: &str) -> Result<Self> {
        let target = target_account_id.trim();
        if target.is_empty() {
            return Err(Error::validation("destination account is required"));
        }

        let amount = amount.trim();
        if amount.is_empty() {
            return Err(Error::validation("amount is required"));
        }
        let amount: Decimal = amount
            .parse()
            .map_err(|_| Error::validation("amount must be a number"))?;
        if amount <= Decimal::ZERO {
            return Err(Error::validation("amount must be positive"));
        }

        Ok(Self {
            source_account_id: source_account_id.into(),
            target_account_id: target.to_string(),
            amount,
        })
    }
}

/// Acknowledgment of an accepted transfer, reported to the caller.
///
/// Balances are never updated from this value; the post-transfer refresh
/// fetches them from the ledger service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub source_account_id: String,
    pub target_account_id: String,
    pub amount: Decimal,
    pub submitted_at: DateTime<Utc>,
}

impl TransferReceipt {
    pub fn acknowledge(request: &TransferRequest) -> Self {
        Self {
            source_account_id: request.source_account_id.clone(),
            target_account_id: request.target_account_id.clone(),
            amount: request.amount,
            submitted_at: Utc::now(),
        }
    }
}
