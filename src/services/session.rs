//! Session service - credential lifecycle
//!
//! Owns acquisition (login), durable persistence, and invalidation (logout)
//! of the session credential. Every change is published on a watch channel
//! so dependents can react without polling; the published state carries a
//! generation counter that lets in-flight work for a superseded credential
//! be discarded.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::domain::result::Result;
use crate::domain::Credential;
use crate::ports::{BankGateway, CredentialSlot};

/// Published session state.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub credential: Option<Credential>,
    /// Bumped on every credential change. A result computed under an older
    /// generation must not be applied.
    pub generation: u64,
}

impl SessionSnapshot {
    fn unauthenticated() -> Self {
        Self {
            credential: None,
            generation: 0,
        }
    }
}

/// Service owning the session credential
///
/// The single writer of both the in-memory credential and its durable copy.
pub struct SessionService {
    gateway: Arc<dyn BankGateway>,
    slot: Arc<dyn CredentialSlot>,
    state: watch::Sender<SessionSnapshot>,
}

impl SessionService {
    pub fn new(gateway: Arc<dyn BankGateway>, slot: Arc<dyn CredentialSlot>) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::unauthenticated());
        Self {
            gateway,
            slot,
            state,
        }
    }

    /// Exchange identity/secret for a credential.
    ///
    /// On success the credential is persisted to the durable slot first,
    /// then adopted in memory and announced to observers. On failure any
    /// existing credential is left untouched.
    pub async fn login(&self, identity: &str, secret: &str) -> Result<Credential> {
        let credential = self.gateway.login(identity, secret).await?;

        self.slot.store(&credential)?;
        self.adopt(Some(credential.clone()));
        info!("session established");

        Ok(credential)
    }

    /// Adopt the credential from the durable slot, if one survived a
    /// previous run.
    ///
    /// No collaborator is contacted; validity is confirmed lazily by the
    /// next authenticated request.
    pub fn restore(&self) -> Result<Option<Credential>> {
        let credential = self.slot.load()?;
        if let Some(ref restored) = credential {
            self.adopt(Some(restored.clone()));
            debug!("session restored from durable storage");
        }
        Ok(credential)
    }

    /// Clear the durable slot and the in-memory credential.
    ///
    /// Observers are signalled so credential-scoped state is discarded.
    /// Idempotent: logging out while logged out is a no-op.
    pub fn logout(&self) -> Result<()> {
        if self.state.borrow().credential.is_none() {
            return Ok(());
        }

        self.slot.clear()?;
        self.adopt(None);
        info!("session cleared");
        Ok(())
    }

    /// The current credential, if any.
    pub fn credential(&self) -> Option<Credential> {
        self.state.borrow().credential.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().credential.is_some()
    }

    /// The current state, including its generation.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// The current generation marker.
    pub fn generation(&self) -> u64 {
        self.state.borrow().generation
    }

    /// Subscribe to credential changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    fn adopt(&self, credential: Option<Credential>) {
        self.state.send_modify(|snapshot| {
            snapshot.credential = credential;
            snapshot.generation += 1;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::adapters::MemoryCredentialSlot;
    use crate::domain::result::Error;
    use crate::domain::{Account, TransferRequest};

    /// Gateway stub: accepts one identity/secret pair.
    struct StubGateway;

    #[async_trait]
    impl BankGateway for StubGateway {
        async fn login(&self, identity: &str, secret: &str) -> Result<Credential> {
            if identity == "a@x.com" && secret == "pw" {
                Ok(Credential::new("T1"))
            } else {
                Err(Error::InvalidCredentials)
            }
        }

        async fn fetch_accounts(&self, _credential: &Credential) -> Result<Vec<Account>> {
            Ok(Vec::new())
        }

        async fn submit_transfer(
            &self,
            _credential: &Credential,
            _transfer: &TransferRequest,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn service_with_slot(slot: MemoryCredentialSlot) -> (SessionService, Arc<MemoryCredentialSlot>) {
        let slot = Arc::new(slot);
        let service = SessionService::new(Arc::new(StubGateway), slot.clone());
        (service, slot)
    }

    #[tokio::test]
    async fn test_login_persists_and_adopts() {
        let (service, slot) = service_with_slot(MemoryCredentialSlot::new());

        let credential = service.login("a@x.com", "pw").await.unwrap();
        assert_eq!(credential.token(), "T1");
        assert_eq!(service.credential(), Some(Credential::new("T1")));
        assert_eq!(slot.load().unwrap(), Some(Credential::new("T1")));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_state_untouched() {
        let (service, slot) = service_with_slot(MemoryCredentialSlot::new());
        service.login("a@x.com", "pw").await.unwrap();
        let generation = service.generation();

        let result = service.login("a@x.com", "wrong").await;
        assert!(matches!(result, Err(Error::InvalidCredentials)));
        assert_eq!(service.credential(), Some(Credential::new("T1")));
        assert_eq!(slot.load().unwrap(), Some(Credential::new("T1")));
        assert_eq!(service.generation(), generation);
    }

    #[tokio::test]
    async fn test_restore_adopts_stored_credential() {
        let (service, _slot) =
            service_with_slot(MemoryCredentialSlot::holding(Credential::new("T0")));

        let restored = service.restore().unwrap();
        assert_eq!(restored, Some(Credential::new("T0")));
        assert!(service.is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_empty_slot_stays_unauthenticated() {
        let (service, _slot) = service_with_slot(MemoryCredentialSlot::new());

        assert_eq!(service.restore().unwrap(), None);
        assert!(!service.is_authenticated());
        assert_eq!(service.generation(), 0);
    }

    #[tokio::test]
    async fn test_logout_clears_slot_and_memory() {
        let (service, slot) = service_with_slot(MemoryCredentialSlot::new());
        service.login("a@x.com", "pw").await.unwrap();

        service.logout().unwrap();
        assert!(!service.is_authenticated());
        assert_eq!(slot.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_when_logged_out_is_noop() {
        let (service, _slot) = service_with_slot(MemoryCredentialSlot::new());
        let generation = service.generation();

        service.logout().unwrap();
        service.logout().unwrap();
        // No spurious change signals for dependents
        assert_eq!(service.generation(), generation);
    }

    #[tokio::test]
    async fn test_every_change_bumps_generation() {
        let (service, _slot) = service_with_slot(MemoryCredentialSlot::new());

        service.login("a@x.com", "pw").await.unwrap();
        let after_login = service.generation();
        service.logout().unwrap();
        let after_logout = service.generation();
        service.login("a@x.com", "pw").await.unwrap();
        let after_relogin = service.generation();

        assert!(after_login < after_logout);
        assert!(after_logout < after_relogin);
    }

    #[tokio::test]
    async fn test_subscribers_observe_changes() {
        let (service, _slot) = service_with_slot(MemoryCredentialSlot::new());
        let mut changes = service.subscribe();

        service.login("a@x.com", "pw").await.unwrap();
        changes.changed().await.unwrap();
        assert!(changes.borrow_and_update().credential.is_some());

        service.logout().unwrap();
        changes.changed().await.unwrap();
        assert!(changes.borrow_and_update().credential.is_none());
    }
}
