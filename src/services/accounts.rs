//! Account service - account collection synchronization
//!
//! Reactive effect over the session: whenever the credential changes the
//! service re-fetches the authenticated user's accounts and reconciles the
//! local view wholesale. It is the only writer of the account collection.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::result::{Error, Result};
use crate::domain::Account;
use crate::ports::BankGateway;
use crate::services::session::{SessionService, SessionSnapshot};

/// Local view of the account collection.
///
/// Balances are authoritative only immediately after a fetch; `fetched_at`
/// lets consumers judge staleness.
#[derive(Debug, Default)]
struct LedgerView {
    accounts: Vec<Account>,
    fetched_at: Option<DateTime<Utc>>,
}

/// Service owning the account collection
pub struct AccountService {
    gateway: Arc<dyn BankGateway>,
    session: Arc<SessionService>,
    /// Uniform policy: escalate an authentication rejection to a logout.
    /// Off by default so a faulty deployment can still be diagnosed.
    auto_logout_on_expiry: bool,
    view: RwLock<LedgerView>,
}

impl AccountService {
    pub fn new(
        gateway: Arc<dyn BankGateway>,
        session: Arc<SessionService>,
        auto_logout_on_expiry: bool,
    ) -> Self {
        Self {
            gateway,
            session,
            auto_logout_on_expiry,
            view: RwLock::new(LedgerView::default()),
        }
    }

    /// Snapshot of the current account collection.
    pub fn accounts(&self) -> Vec<Account> {
        self.view
            .read()
            .map(|view| view.accounts.clone())
            .unwrap_or_default()
    }

    /// Identifier of the implicit source account (the first element), if
    /// the collection is non-empty.
    pub fn first_account_id(&self) -> Option<String> {
        self.view
            .read()
            .ok()
            .and_then(|view| view.accounts.first().map(|a| a.id.clone()))
    }

    /// Instant of the last successful reconciliation.
    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.view.read().ok().and_then(|view| view.fetched_at)
    }

    /// Fetch the account collection and reconcile the local view.
    ///
    /// No-op when no credential is present. On success the collection is
    /// replaced wholesale, unless the session generation moved on while the
    /// fetch was in flight, in which case the result is discarded. On
    /// failure the previous collection is retained unchanged.
    pub async fn refresh(&self) -> Result<()> {
        let SessionSnapshot {
            credential,
            generation,
        } = self.session.snapshot();
        let credential = match credential {
            Some(credential) => credential,
            None => return Ok(()),
        };

        match self.gateway.fetch_accounts(&credential).await {
            Ok(accounts) => {
                if self.session.generation() != generation {
                    debug!("discarding account fetch for a superseded session");
                    return Ok(());
                }
                self.replace(accounts)
            }
            Err(Error::AuthExpired) => {
                warn!("accounts fetch rejected: session expired or credential no longer valid");
                if self.auto_logout_on_expiry {
                    self.session.logout()?;
                }
                Err(Error::AuthExpired)
            }
            Err(e) => {
                warn!("accounts fetch failed, keeping previous balances: {}", e);
                Err(e)
            }
        }
    }

    /// React to credential changes: refresh while authenticated, discard
    /// the collection on logout.
    ///
    /// Runs until the session service is dropped. Spawn once per context.
    pub async fn watch_session(self: Arc<Self>, mut changes: watch::Receiver<SessionSnapshot>) {
        loop {
            let authenticated = changes.borrow_and_update().credential.is_some();
            if authenticated {
                if let Err(e) = self.refresh().await {
                    warn!("account refresh failed: {}", e);
                }
            } else {
                self.clear();
            }

            if changes.changed().await.is_err() {
                break;
            }
        }
    }

    fn replace(&self, accounts: Vec<Account>) -> Result<()> {
        let mut view = self
            .view
            .write()
            .map_err(|e| Error::storage(format!("lock poisoned: {}", e)))?;
        debug!("account collection reconciled ({} accounts)", accounts.len());
        view.accounts = accounts;
        view.fetched_at = Some(Utc::now());
        Ok(())
    }

    fn clear(&self) {
        if let Ok(mut view) = self.view.write() {
            *view = LedgerView::default();
        }
    }
}
