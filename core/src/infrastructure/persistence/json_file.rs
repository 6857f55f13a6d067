use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::warn;

use crate::domain::{common::entities::app_errors::CoreError, inventory::ports::LocalStore};

/// Key-value store persisted as one JSON object in a single file. Writes go
/// through a temp file and a rename so a crash cannot leave a half-written
/// store behind.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<Option<BTreeMap<String, String>>, CoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CoreError::StoreUnavailable(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let map = serde_json::from_str(&raw)
            .map_err(|e| CoreError::PersistenceCorrupt(format!("{}: {}", self.path.display(), e)))?;
        Ok(Some(map))
    }
}

impl LocalStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.load()?.and_then(|mut map| map.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        // A corrupt store is rebuilt rather than refused; losing broken state
        // beats refusing new writes.
        let mut map = match self.load() {
            Ok(Some(map)) => map,
            Ok(None) => BTreeMap::new(),
            Err(CoreError::PersistenceCorrupt(detail)) => {
                warn!("store file is corrupt, rebuilding: {}", detail);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), value.to_string());

        let raw = serde_json::to_string_pretty(&map)
            .map_err(|e| CoreError::StoreUnavailable(format!("serialize store: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    CoreError::StoreUnavailable(format!(
                        "failed to create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw).map_err(|e| {
            CoreError::StoreUnavailable(format!("failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            CoreError::StoreUnavailable(format!(
                "failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("store.json"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("store.json"));

        store.set("alpha", "one").unwrap();
        store.set("beta", "two").unwrap();

        assert_eq!(store.get("alpha").unwrap().as_deref(), Some("one"));
        assert_eq!(store.get("beta").unwrap().as_deref(), Some("two"));
        assert_eq!(store.get("gamma").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_surfaces_on_get() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{ this is not json").unwrap();

        let store = JsonFileStore::new(path);
        assert!(matches!(
            store.get("alpha"),
            Err(CoreError::PersistenceCorrupt(_))
        ));
    }

    #[test]
    fn test_set_rebuilds_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "garbage").unwrap();

        let store = JsonFileStore::new(path);
        store.set("alpha", "one").unwrap();
        assert_eq!(store.get("alpha").unwrap().as_deref(), Some("one"));
    }

    #[test]
    fn test_set_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/store.json");

        let store = JsonFileStore::new(path);
        store.set("alpha", "one").unwrap();
        assert_eq!(store.get("alpha").unwrap().as_deref(), Some("one"));
    }
}
