//! Ledgerline Core - client-side orchestration for Ledgerline online banking
//!
//! This crate implements the session and funds-transfer core following
//! hexagonal architecture:
//!
//! - **domain**: Core business entities (Credential, Account, TransferRequest)
//! - **ports**: Trait definitions for external dependencies (BankGateway, CredentialSlot)
//! - **services**: The three orchestration components (session, accounts, transfer)
//! - **adapters**: Concrete implementations (REST gateway, file-backed slot)
//!
//! The core is invoked exclusively through five operations: `login`,
//! `restore`, `logout`, `refresh`, and `submit`.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;

use adapters::{FileCredentialSlot, RestBankGateway};
use config::Config;
use ports::{BankGateway, CredentialSlot};
use services::{AccountService, SessionService, TransferService};

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{Account, Credential, TransferReceipt, TransferRequest};

/// Main context for Ledgerline client operations
///
/// This is the primary entry point. It wires the configured gateway and
/// durable slot into the three services and owns the credential-watch
/// effect that keeps the account view synchronized.
pub struct ClientContext {
    pub config: Config,
    pub session: Arc<SessionService>,
    pub accounts: Arc<AccountService>,
    pub transfers: TransferService,
}

impl ClientContext {
    /// Create a context over the application data directory
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;

        let gateway: Arc<dyn BankGateway> = Arc::new(RestBankGateway::new_with_timeout(
            &config.api_base_url,
            config.request_timeout,
        )?);
        let slot: Arc<dyn CredentialSlot> = Arc::new(FileCredentialSlot::new(data_dir));

        Ok(Self::with_components(config, gateway, slot))
    }

    /// Assemble a context from explicit components.
    ///
    /// Components are injected rather than reached for ambiently, so tests
    /// substitute scripted gateways and in-memory slots per case.
    pub fn with_components(
        config: Config,
        gateway: Arc<dyn BankGateway>,
        slot: Arc<dyn CredentialSlot>,
    ) -> Self {
        let session = Arc::new(SessionService::new(gateway.clone(), slot));
        let accounts = Arc::new(AccountService::new(
            gateway.clone(),
            session.clone(),
            config.auto_logout_on_expiry,
        ));
        let transfers = TransferService::new(gateway, session.clone(), accounts.clone());

        Self {
            config,
            session,
            accounts,
            transfers,
        }
    }

    /// Start the credential-watch effect: the account view refreshes on
    /// every credential change and is discarded on logout.
    pub fn spawn_synchronizer(&self) -> JoinHandle<()> {
        tokio::spawn(
            Arc::clone(&self.accounts).watch_session(self.session.subscribe()),
        )
    }
}
