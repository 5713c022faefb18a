//! Credential slot adapters
//!
//! The production slot is one JSON file in the application data directory;
//! absence of the file means "unauthenticated". An in-memory slot is
//! provided for tests and embedding without a filesystem.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::result::{Error, Result};
use crate::domain::Credential;
use crate::ports::CredentialSlot;

/// File name of the durable slot inside the application data directory
const SESSION_FILE: &str = "session.json";

/// On-disk layout of the slot
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    credential: Credential,
}

/// Durable credential slot backed by a JSON file
#[derive(Debug)]
pub struct FileCredentialSlot {
    path: PathBuf,
}

impl FileCredentialSlot {
    /// Create a slot inside the given application data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialSlot for FileCredentialSlot {
    fn load(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<SessionFile>(&content) {
            Ok(file) => Ok(Some(file.credential)),
            Err(e) => {
                // An unreadable slot is treated as unauthenticated rather
                // than blocking startup.
                warn!("stored session is unreadable, ignoring it: {}", e);
                Ok(None)
            }
        }
    }

    fn store(&self, credential: &Credential) -> Result<()> {
        let file = SessionFile {
            credential: credential.clone(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory credential slot for tests
#[derive(Debug, Default)]
pub struct MemoryCredentialSlot {
    value: Mutex<Option<Credential>>,
}

impl MemoryCredentialSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-populated with a credential, as after a previous run.
    pub fn holding(credential: Credential) -> Self {
        Self {
            value: Mutex::new(Some(credential)),
        }
    }
}

impl CredentialSlot for MemoryCredentialSlot {
    fn load(&self) -> Result<Option<Credential>> {
        let value = self
            .value
            .lock()
            .map_err(|e| Error::storage(format!("lock poisoned: {}", e)))?;
        Ok(value.clone())
    }

    fn store(&self, credential: &Credential) -> Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|e| Error::storage(format!("lock poisoned: {}", e)))?;
        *value = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|e| Error::storage(format!("lock poisoned: {}", e)))?;
        *value = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_absent_slot() {
        let dir = tempdir().unwrap();
        let slot = FileCredentialSlot::new(dir.path());
        assert_eq!(slot.load().unwrap(), None);
    }

    #[test]
    fn test_store_then_load() {
        let dir = tempdir().unwrap();
        let slot = FileCredentialSlot::new(dir.path());

        slot.store(&Credential::new("T1")).unwrap();
        assert_eq!(slot.load().unwrap(), Some(Credential::new("T1")));

        // A second slot over the same directory sees the value (reload)
        let reopened = FileCredentialSlot::new(dir.path());
        assert_eq!(reopened.load().unwrap(), Some(Credential::new("T1")));
    }

    #[test]
    fn test_store_replaces_previous_value() {
        let dir = tempdir().unwrap();
        let slot = FileCredentialSlot::new(dir.path());

        slot.store(&Credential::new("T1")).unwrap();
        slot.store(&Credential::new("T2")).unwrap();
        assert_eq!(slot.load().unwrap(), Some(Credential::new("T2")));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let slot = FileCredentialSlot::new(dir.path());

        slot.store(&Credential::new("T1")).unwrap();
        slot.clear().unwrap();
        assert_eq!(slot.load().unwrap(), None);

        // Clearing an already-empty slot is a no-op
        slot.clear().unwrap();
        assert_eq!(slot.load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_slot_reads_as_unauthenticated() {
        let dir = tempdir().unwrap();
        let slot = FileCredentialSlot::new(dir.path());

        std::fs::write(slot.path(), "not json").unwrap();
        assert_eq!(slot.load().unwrap(), None);
    }

    #[test]
    fn test_memory_slot_round_trip() {
        let slot = MemoryCredentialSlot::new();
        assert_eq!(slot.load().unwrap(), None);

        slot.store(&Credential::new("T1")).unwrap();
        assert_eq!(slot.load().unwrap(), Some(Credential::new("T1")));

        slot.clear().unwrap();
        assert_eq!(slot.load().unwrap(), None);
    }
}
