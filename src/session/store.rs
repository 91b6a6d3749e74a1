use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::StoreError;

/// Key under which the opaque session token is stored.
pub const TOKEN_KEY: &str = "token";

/// Key under which the JSON-serialized user profile is stored.
pub const USER_KEY: &str = "user";

/// Durable client-side key-value storage for session credentials.
///
/// The two keys above are always written and cleared as a pair; callers must
/// never leave one behind without the other.
pub trait CredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// File-backed credential store: one file per key under a credentials
/// directory, surviving process restarts the way browser local storage
/// survives page reloads.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    /// Open a store rooted at an explicit directory, creating it if needed.
    pub fn new(dir: PathBuf) -> Result<Self, StoreError> {
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(Self { dir })
    }

    /// Open the store at the default credentials directory:
    /// `BALCAO_CONFIG_DIR` if set, else `$HOME/.config/balcao/cli`.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::new(default_credentials_dir()?)
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Filesystem path holding a key, for display purposes (`auth status`).
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.key_path(key)
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        fs::write(&path, value).map_err(|source| StoreError::Io { path, source })
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

pub fn default_credentials_dir() -> Result<PathBuf, StoreError> {
    if let Ok(custom_dir) = std::env::var("BALCAO_CONFIG_DIR") {
        return Ok(PathBuf::from(custom_dir));
    }

    let home = std::env::var("HOME")
        .map_err(|_| StoreError::Unavailable("HOME environment variable not set".to_string()))?;
    Ok(PathBuf::from(home).join(".config").join("balcao").join("cli"))
}

/// Ephemeral in-memory store for tests and stateless invocations.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_put_delete() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);

        store.put(TOKEN_KEY, "abc").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        store.delete(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn memory_store_delete_is_idempotent() {
        let store = MemoryCredentialStore::new();
        store.delete(USER_KEY).unwrap();
        store.delete(USER_KEY).unwrap();
    }
}
