//! Storage backend trait and the in-memory implementation.

use crate::StorageResult;
use std::collections::HashMap;
use std::sync::Mutex;

/// Trait for credential storage backends.
pub trait CredentialBackend: Send + Sync {
    /// Store a value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Retrieve a value
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Delete a value, returning whether it existed
    fn delete(&self, key: &str) -> StorageResult<bool>;

    /// Check if a key exists
    fn has(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// In-memory backend, used by tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryBackend {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialBackend for MemoryBackend {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut data = self.data.lock().unwrap();
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let data = self.data.lock().unwrap();
        Ok(data.get(key).cloned())
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let mut data = self.data.lock().unwrap();
        Ok(data.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend() {
        let backend = MemoryBackend::new();

        backend.set("test_key", "test_value").unwrap();
        assert_eq!(
            backend.get("test_key").unwrap(),
            Some("test_value".to_string())
        );

        assert!(backend.has("test_key").unwrap());
        assert!(!backend.has("nonexistent").unwrap());

        assert!(backend.delete("test_key").unwrap());
        assert!(!backend.delete("test_key").unwrap());
        assert_eq!(backend.get("test_key").unwrap(), None);
    }

    #[test]
    fn test_memory_backend_overwrite() {
        let backend = MemoryBackend::new();

        backend.set("key", "first").unwrap();
        backend.set("key", "second").unwrap();
        assert_eq!(backend.get("key").unwrap(), Some("second".to_string()));
    }
}
