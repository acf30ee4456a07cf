use log::debug;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("write rejected: {0}")]
    Rejected(String),
    #[error("cookie jar: {0}")]
    Cookie(String),
}

/// How long a value should outlive the current page, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ttl {
    pub days: u32,
}

impl Ttl {
    pub const fn days(days: u32) -> Self {
        Ttl { days }
    }

    pub fn max_age_secs(&self) -> u64 {
        self.days as u64 * 24 * 60 * 60
    }
}

/// A single place values can be persisted to. Backends report failures;
/// callers decide whether they matter.
pub trait StorageBackend {
    fn name(&self) -> &'static str;
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str, ttl: Ttl) -> Result<(), StorageError>;
}

/// Ordered list of backends. Reads return the first hit, writes go to every
/// backend in order. Neither operation fails.
#[derive(Default)]
pub struct TieredStore {
    backends: Vec<Box<dyn StorageBackend>>,
}

impl TieredStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: impl StorageBackend + 'static) -> Self {
        self.backends.push(Box::new(backend));
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        for backend in &self.backends {
            match backend.get(key) {
                Ok(Some(value)) => return Some(value),
                Ok(None) => continue,
                Err(e) => {
                    debug!("{} read of {} failed, falling back: {}", backend.name(), key, e);
                }
            }
        }
        None
    }

    pub fn set(&self, key: &str, value: &str, ttl: Ttl) {
        for backend in &self.backends {
            if let Err(e) = backend.set(key, value, ttl) {
                debug!("{} write of {} failed, ignoring: {}", backend.name(), key, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::{FailingBackend, MemoryBackend};

    #[test]
    fn test_ttl_max_age() {
        assert_eq!(Ttl::days(1).max_age_secs(), 86_400);
        assert_eq!(Ttl::days(180).max_age_secs(), 15_552_000);
        assert_eq!(Ttl::days(365).max_age_secs(), 31_536_000);
    }

    #[test]
    fn test_read_prefers_first_backend() {
        let durable = MemoryBackend::default();
        let cookies = MemoryBackend::default();
        durable.insert("k", "durable");
        cookies.insert("k", "cookie");

        let store = TieredStore::new()
            .with_backend(durable.clone())
            .with_backend(cookies.clone());
        assert_eq!(store.get("k").as_deref(), Some("durable"));
    }

    #[test]
    fn test_read_falls_back_on_miss() {
        let durable = MemoryBackend::default();
        let cookies = MemoryBackend::default();
        cookies.insert("k", "cookie");

        let store = TieredStore::new()
            .with_backend(durable)
            .with_backend(cookies);
        assert_eq!(store.get("k").as_deref(), Some("cookie"));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_read_falls_back_on_error() {
        let cookies = MemoryBackend::default();
        cookies.insert("k", "cookie");

        let store = TieredStore::new()
            .with_backend(FailingBackend)
            .with_backend(cookies);
        assert_eq!(store.get("k").as_deref(), Some("cookie"));
    }

    #[test]
    fn test_write_fans_out_past_failures() {
        let durable = MemoryBackend::default();
        let cookies = MemoryBackend::default();

        let store = TieredStore::new()
            .with_backend(FailingBackend)
            .with_backend(durable.clone())
            .with_backend(cookies.clone());
        store.set("k", "v", Ttl::days(180));

        assert_eq!(durable.value("k").as_deref(), Some("v"));
        assert_eq!(cookies.value("k").as_deref(), Some("v"));
        assert_eq!(cookies.ttl("k"), Some(Ttl::days(180)));
    }

    #[test]
    fn test_empty_store_is_total() {
        let store = TieredStore::new();
        store.set("k", "v", Ttl::days(1));
        assert_eq!(store.get("k"), None);
    }
}
