//! Bank gateway port - remote collaborator abstraction
//!
//! Defines the interface for the three collaborator calls this core makes:
//! the login exchange, the account fetch, and the transfer submission. The
//! services use this trait without knowing the wire details; the REST
//! adapter provides the production implementation and tests substitute
//! scripted ones.

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{Account, Credential, TransferRequest};

/// Remote banking service abstraction
///
/// Every method is a suspension point: the caller resumes only on the
/// collaborator's response or a transport error. Authenticated calls take
/// the credential explicitly, so a request without one cannot be issued.
#[async_trait]
pub trait BankGateway: Send + Sync {
    /// Exchange identity/secret for a session credential.
    ///
    /// Fails with `InvalidCredentials` when the service rejects the pair
    /// and `Remote` when the service cannot be reached.
    async fn login(&self, identity: &str, secret: &str) -> Result<Credential>;

    /// Fetch the authenticated user's account collection.
    ///
    /// Fails with `AuthExpired` when the service rejects the credential
    /// (unauthorized and forbidden status classes are equivalent).
    async fn fetch_accounts(&self, credential: &Credential) -> Result<Vec<Account>>;

    /// Submit a funds transfer.
    ///
    /// A remote rejection carries the collaborator's error payload when one
    /// is present. Not idempotent: two identical submissions that both
    /// reach the collaborator produce two transfers.
    async fn submit_transfer(
        &self,
        credential: &Credential,
        transfer: &TransferRequest,
    ) -> Result<()>;
}
