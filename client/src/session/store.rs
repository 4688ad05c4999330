//! Persisted authentication flag
//!
//! One boolean under a well-known location in client-local durable storage:
//! the file contains `true` while a session is authenticated and is absent
//! otherwise. The flag is read once at startup and trusted as-is (it is a
//! cache of a verified claim, not the claim itself); it is written only by
//! login and logout. Single-process use is assumed, so there is no
//! concurrent-writer protocol.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

/// The stored value while authenticated
const FLAG_VALUE: &str = "true";

/// Durable storage for the authenticated flag
pub trait AuthFlagStore: Send + Sync {
    /// Whether the flag is currently set
    fn load(&self) -> bool;
    /// Set the flag
    fn store(&self);
    /// Remove the flag
    fn clear(&self);
}

/// File-backed flag store
pub struct FileAuthFlagStore {
    path: PathBuf,
}

impl FileAuthFlagStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AuthFlagStore for FileAuthFlagStore {
    fn load(&self) -> bool {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.trim() == FLAG_VALUE,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                warn!("Failed to read auth flag {:?}: {}", self.path, e);
                false
            }
        }
    }

    fn store(&self) {
        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warn!("Failed to create state directory {:?}: {}", parent, e);
            return;
        }
        if let Err(e) = fs::write(&self.path, FLAG_VALUE) {
            warn!("Failed to persist auth flag {:?}: {}", self.path, e);
        }
    }

    fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path)
            && e.kind() != ErrorKind::NotFound
        {
            warn!("Failed to clear auth flag {:?}: {}", self.path, e);
        }
    }
}

/// In-memory flag store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryAuthFlagStore {
    flag: AtomicBool,
}

impl MemoryAuthFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthFlagStore for MemoryAuthFlagStore {
    fn load(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn store(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    fn clear(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_flag_path() -> PathBuf {
        std::env::temp_dir()
            .join("parley-tests")
            .join(Uuid::new_v4().to_string())
            .join("authenticated")
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_flag_path();
        let store = FileAuthFlagStore::new(&path);

        assert!(!store.load());
        store.store();
        assert!(store.load());
        assert_eq!(fs::read_to_string(&path).unwrap(), "true");

        store.clear();
        assert!(!store.load());
        assert!(!path.exists());
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let store = FileAuthFlagStore::new(temp_flag_path());
        store.clear();
        store.clear();
        assert!(!store.load());
    }

    #[test]
    fn test_file_store_ignores_unexpected_content() {
        let path = temp_flag_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "yes please").unwrap();

        let store = FileAuthFlagStore::new(&path);
        assert!(!store.load());

        store.clear();
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryAuthFlagStore::new();
        assert!(!store.load());
        store.store();
        assert!(store.load());
        store.clear();
        assert!(!store.load());
    }
}
