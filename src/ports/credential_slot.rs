//! Credential slot port - durable storage abstraction

use crate::domain::result::Result;
use crate::domain::Credential;

/// One durable key-value slot holding the session credential.
///
/// The slot survives process restarts; an empty slot means
/// "unauthenticated". The session service is the only writer.
pub trait CredentialSlot: Send + Sync {
    /// Read the stored credential, if any.
    fn load(&self) -> Result<Option<Credential>>;

    /// Persist the credential, replacing any previous value.
    fn store(&self, credential: &Credential) -> Result<()>;

    /// Remove the stored credential. Clearing an empty slot is a no-op.
    fn clear(&self) -> Result<()>;
}
