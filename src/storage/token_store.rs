// src/storage/token_store.rs
// DOCUMENTATION: Persisted credential storage
// PURPOSE: Hold the access/refresh token pair under fixed key names

use crate::errors::{ClientError, ClientResult};
use crate::models::CredentialPair;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

/// Storage key of the access token
pub const ACCESS_TOKEN_KEY: &str = "token";

/// Storage key of the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// String key-value storage holding the credential pair
/// DOCUMENTATION: Implementors only provide get/set/remove; token helpers
/// are shared. Empty values read back as absent.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> ClientResult<()>;

    /// Remove every key in `keys` in one write
    fn remove(&self, keys: &[&str]) -> ClientResult<()>;

    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    fn set_access_token(&self, token: &str) -> ClientResult<()> {
        self.set(ACCESS_TOKEN_KEY, token)
    }

    fn set_refresh_token(&self, token: &str) -> ClientResult<()> {
        self.set(REFRESH_TOKEN_KEY, token)
    }

    /// Replace the stored pair
    fn save(&self, pair: &CredentialPair) -> ClientResult<()> {
        self.set_access_token(&pair.access_token)?;
        self.set_refresh_token(&pair.refresh_token)
    }

    /// Drop both tokens together
    fn clear(&self) -> ClientResult<()> {
        self.remove(&[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY])
    }
}

/// Process-local store, lost on exit
#[derive(Default)]
pub struct MemoryTokenStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(pair: &CredentialPair) -> Self {
        let store = Self::new();
        // Writes to the in-memory map cannot fail
        let _ = store.save(pair);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, keys: &[&str]) -> ClientResult<()> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        for key in keys {
            values.remove(*key);
        }
        Ok(())
    }
}

/// JSON-file store that survives restarts
/// DOCUMENTATION: The file is a flat object `{"token": ..., "refreshToken": ...}`
/// rewritten on every change; reads are served from memory
pub struct FileTokenStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileTokenStore {
    /// Open the store at `path`, loading existing values
    /// A missing file starts empty; an unreadable one is logged and ignored
    pub fn open(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref().to_path_buf();

        let values = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed token file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(ClientError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ClientError::Storage(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let raw = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, raw).map_err(|e| {
            ClientError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }

    fn remove(&self, keys: &[&str]) -> ClientResult<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        for key in keys {
            values.remove(*key);
        }
        self.persist(&values)
    }
}
