use web_sys::{window, Storage};

use super::backend::{StorageBackend, StorageError, Ttl};

/// `window.localStorage`. Has no notion of expiry, so the TTL is ignored.
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    fn storage(&self) -> Result<Storage, StorageError> {
        let window = window().ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StorageError::Unavailable("localStorage disabled".to_string())),
            Err(e) => Err(StorageError::Unavailable(format!("{:?}", e))),
        }
    }
}

impl StorageBackend for LocalStorageBackend {
    fn name(&self) -> &'static str {
        "localStorage"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str, _ttl: Ttl) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }
}
