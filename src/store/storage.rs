use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, TaskflowError};

/// A string-keyed, string-valued persistence backend.
///
/// Values are whole documents: callers always replace a key's value in full.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Read and decode the JSON document stored under `key`.
pub fn read_json<S, T>(storage: &S, key: &str) -> Result<Option<T>>
where
    S: Storage + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = storage.get(key)? else {
        debug!(key, "no stored value");
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|source| TaskflowError::Corrupt {
        key: key.to_string(),
        source,
    })?;
    Ok(Some(value))
}

/// Encode `value` as JSON and replace the document stored under `key`.
pub fn write_json<S, T>(storage: &S, key: &str, value: &T) -> Result<()>
where
    S: Storage + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string_pretty(value)?;
    storage.set(key, &json)?;
    debug!(key, bytes = json.len(), "stored value");
    Ok(())
}

/// In-process backend. Clones share the same underlying map, so a test can
/// keep a handle and inspect what a store wrote.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.borrow_mut().remove(key)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.set("k", "v").unwrap();
        assert_eq!(handle.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(handle.len(), 1);
        assert_eq!(handle.remove("k").as_deref(), Some("v"));
        assert!(storage.is_empty());
    }

    #[test]
    fn read_json_missing_key_is_none() {
        let storage = MemoryStorage::new();
        let value: Option<Vec<u32>> = read_json(&storage, "absent").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn read_json_reports_corrupt_key() {
        let storage = MemoryStorage::new();
        storage.set("taskflow-tasks", "[{not json").unwrap();
        let err = read_json::<_, Vec<u32>>(&storage, "taskflow-tasks").unwrap_err();
        match err {
            TaskflowError::Corrupt { key, .. } => assert_eq!(key, "taskflow-tasks"),
            other => panic!("expected corrupt error, got {other:?}"),
        }
    }

    #[test]
    fn write_then_read_json() {
        let storage = MemoryStorage::new();
        write_json(&storage, "nums", &[3u32, 1, 2]).unwrap();
        let back: Vec<u32> = read_json(&storage, "nums").unwrap().unwrap();
        assert_eq!(back, vec![3, 1, 2]);
    }
}
