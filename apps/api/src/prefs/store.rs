use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use super::PreferenceError;

/// Key/value persistence for visitor preferences.
///
/// Carried by `AppContext` as `Arc<dyn PreferenceStore>` so the storage
/// mechanism can be swapped without touching callers.
pub trait PreferenceStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Process-local store. Used when no preferences file is configured.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat JSON object on disk, e.g. `{"language": "pt", "theme": "dark"}`.
///
/// A missing file reads as empty. Writes rewrite the whole file.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        Ok(self.load()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        // A corrupt file is replaced rather than blocking every future write.
        let mut values = self.load().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_read_write() {
        let store = MemoryPreferenceStore::default();
        assert_eq!(store.read("language").unwrap(), None);
        store.write("language", "pt").unwrap();
        assert_eq!(store.read("language").unwrap().as_deref(), Some("pt"));
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.read("theme").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        FilePreferenceStore::new(&path).write("theme", "dark").unwrap();
        FilePreferenceStore::new(&path).write("language", "pt").unwrap();

        let reopened = FilePreferenceStore::new(&path);
        assert_eq!(reopened.read("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.read("language").unwrap().as_deref(), Some("pt"));
    }

    #[test]
    fn test_file_store_corrupt_file_is_an_error_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FilePreferenceStore::new(&path);
        assert!(matches!(store.read("theme"), Err(PreferenceError::Json(_))));

        // Writing replaces the corrupt content.
        store.write("theme", "light").unwrap();
        assert_eq!(store.read("theme").unwrap().as_deref(), Some("light"));
    }
}
