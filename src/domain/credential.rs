//! Session credential

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque bearer token proving an authenticated session.
///
/// At most one credential is active per client instance. The token value is
/// owned by the authentication service; this type never inspects it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, as attached to outgoing authenticated requests.
    pub fn token(&self) -> &str {
        &self.0
    }
}

// The token must never end up in log output, so Debug shows only a suffix.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tail: String = self
            .0
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        write!(f, "Credential(..{})", tail)
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self(token)
    }
}
