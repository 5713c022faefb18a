//! Transfer service - funds-transfer orchestration
//!
//! Validates and submits a transfer using the current account collection as
//! the source of truth for the origin account, then asks the account
//! service to resynchronize. Owns no persistent state of its own.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::result::{Error, Result};
use crate::domain::{TransferReceipt, TransferRequest};
use crate::ports::BankGateway;
use crate::services::accounts::AccountService;
use crate::services::session::SessionService;

/// Service orchestrating funds transfers
pub struct TransferService {
    gateway: Arc<dyn BankGateway>,
    session: Arc<SessionService>,
    accounts: Arc<AccountService>,
}

impl TransferService {
    pub fn new(
        gateway: Arc<dyn BankGateway>,
        session: Arc<SessionService>,
        accounts: Arc<AccountService>,
    ) -> Self {
        Self {
            gateway,
            session,
            accounts,
        }
    }

    /// Submit a transfer to the destination account.
    ///
    /// Preconditions are checked before anything reaches the network: a
    /// credential must be present, the account collection must be
    /// non-empty (its first element is the origin), and the destination and
    /// amount must be present with a positive numeric amount.
    ///
    /// On success a receipt is returned and a resynchronization is spawned;
    /// the refreshed balances are always fetched from the ledger service,
    /// never computed locally, and the caller's result does not wait on
    /// that refresh. On failure the collaborator's message is carried when
    /// available and no resynchronization happens.
    ///
    /// Not idempotent at the network layer: the collaborator accepts no
    /// deduplication key, so two identical submissions that both arrive
    /// produce two transfers. Never retried automatically.
    pub async fn submit(&self, target_account_id: &str, amount: &str) -> Result<TransferReceipt> {
        let credential = match self.session.credential() {
            Some(credential) => credential,
            None => return Err(Error::Unauthenticated),
        };
        let source_account_id = match self.accounts.first_account_id() {
            Some(id) => id,
            None => return Err(Error::NoSourceAccount),
        };
        let request = TransferRequest::new(source_account_id, target_account_id, amount)?;

        self.gateway.submit_transfer(&credential, &request).await?;
        info!(
            "transfer accepted: {} -> {}",
            request.source_account_id, request.target_account_id
        );

        // Fire-and-forget resynchronization; its outcome is logged, never
        // reported to the submit caller.
        let accounts = Arc::clone(&self.accounts);
        tokio::spawn(async move {
            if let Err(e) = accounts.refresh().await {
                warn!("post-transfer refresh failed: {}", e);
            }
        });

        Ok(TransferReceipt::acknowledge(&request))
    }
}
