//! In-memory backends for tests. Clones share state, so a clone handed to a
//! fresh store behaves like the same browser after a reload.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::backend::{StorageBackend, StorageError, Ttl};

#[derive(Clone, Default)]
pub struct MemoryBackend {
    entries: Rc<RefCell<HashMap<String, (String, Ttl)>>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryBackend {
    /// Seeds a value without counting it as a write.
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), (value.to_string(), Ttl::days(0)));
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).map(|(v, _)| v.clone())
    }

    pub fn ttl(&self, key: &str) -> Option<Ttl> {
        self.entries.borrow().get(key).map(|(_, ttl)| *ttl)
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries
            .borrow()
            .iter()
            .map(|(k, (v, _))| (k.clone(), v.clone()))
            .collect()
    }
}

impl StorageBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str, ttl: Ttl) -> Result<(), StorageError> {
        self.writes.set(self.writes.get() + 1);
        self.entries
            .borrow_mut()
            .insert(key.to_string(), (value.to_string(), ttl));
        Ok(())
    }
}

/// Behaves like local storage in a sandboxed iframe: every call throws.
pub struct FailingBackend;

impl StorageBackend for FailingBackend {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("access denied".to_string()))
    }

    fn set(&self, _key: &str, _value: &str, _ttl: Ttl) -> Result<(), StorageError> {
        Err(StorageError::Rejected("quota exceeded".to_string()))
    }
}
