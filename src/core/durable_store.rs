/*
 * A string-keyed store of JSON values that survives process restarts. The
 * application persists a small subset of its state here (user, auth token,
 * favorites, theme) and reads it back during restoration.
 *
 * `DurableStoreOperations` is the seam used by the rest of the crate. The
 * file-backed `CoreDurableStore` writes one `<key>.json` file per key into a
 * storage directory, replacing each file atomically so an interrupted write
 * leaves the previous value readable; `InMemoryDurableStore` keeps values in a map and is used
 * for tests and for sessions that have no usable storage directory.
 */
use crate::core::path_utils;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const STORAGE_FILE_EXTENSION: &str = "json";

pub struct StorageKeys;

impl StorageKeys {
    pub const AUTH_TOKEN: &'static str = "fitbuddy_auth_token";
    pub const USER: &'static str = "fitbuddy_user";
    pub const FAVORITES: &'static str = "fitbuddy_favorites";
    pub const THEME: &'static str = "fitbuddy_theme";
    // Reserved; nothing reads or writes stats yet.
    #[allow(dead_code)]
    pub const USER_STATS: &'static str = "fitbuddy_user_stats";
}

#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Serde(serde_json::Error),
    NoStorageDirectory,
    InvalidKey(String),
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serde(err)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "Storage I/O error: {e}"),
            StorageError::Serde(e) => write!(f, "Storage serialization error: {e}"),
            StorageError::NoStorageDirectory => {
                write!(f, "Could not determine storage directory")
            }
            StorageError::InvalidKey(key) => write!(f, "Invalid storage key: '{key}'"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serde(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;

pub trait DurableStoreOperations: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<Value>>;
    fn set_item(&self, key: &str, value: &Value) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/*
 * Reads `key` and deserializes it into `T`. A stored JSON `null` counts as
 * absent, matching how the store treats a missing key.
 */
pub fn get_typed<T: DeserializeOwned>(
    store: &dyn DurableStoreOperations,
    key: &str,
) -> Result<Option<T>> {
    match store.get_item(key)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

pub fn set_typed<T: Serialize>(store: &dyn DurableStoreOperations, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_value(value)?;
    store.set_item(key, &json)
}

fn is_valid_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || !key.chars().all(is_valid_key_char) {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

pub struct CoreDurableStore {
    storage_dir: PathBuf,
}

impl CoreDurableStore {
    pub fn new(storage_dir: PathBuf) -> Self {
        log::debug!("CoreDurableStore: Using storage directory {storage_dir:?}");
        CoreDurableStore { storage_dir }
    }

    /*
     * Opens the store in the app's durable storage directory, or in
     * `override_dir` when one is configured.
     */
    pub fn for_app(app_name: &str, override_dir: Option<&Path>) -> Result<Self> {
        let dir = path_utils::resolve_storage_dir(app_name, override_dir)
            .ok_or(StorageError::NoStorageDirectory)?;
        Ok(Self::new(dir))
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn path_for_key(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self
            .storage_dir
            .join(format!("{key}.{STORAGE_FILE_EXTENSION}")))
    }
}

impl DurableStoreOperations for CoreDurableStore {
    fn get_item(&self, key: &str) -> Result<Option<Value>> {
        let file_path = self.path_for_key(key)?;
        if !file_path.exists() {
            log::trace!("CoreDurableStore: No value stored for '{key}'.");
            return Ok(None);
        }
        let reader = BufReader::new(File::open(&file_path)?);
        let value: Value = serde_json::from_reader(reader)?;
        log::trace!("CoreDurableStore: Read '{key}' from {file_path:?}.");
        Ok(Some(value))
    }

    fn set_item(&self, key: &str, value: &Value) -> Result<()> {
        let file_path = self.path_for_key(key)?;
        if !self.storage_dir.exists() {
            fs::create_dir_all(&self.storage_dir)?;
        }
        let bytes = serde_json::to_vec(value)?;
        path_utils::write_atomically(&file_path, &bytes)?;
        log::debug!("CoreDurableStore: Wrote '{key}' to {file_path:?}.");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let file_path = self.path_for_key(key)?;
        match fs::remove_file(&file_path) {
            Ok(()) => {
                log::debug!("CoreDurableStore: Removed '{key}'.");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<()> {
        if !self.storage_dir.exists() {
            return Ok(());
        }
        let mut removed = 0usize;
        for entry in fs::read_dir(&self.storage_dir)? {
            let path = entry?.path();
            if path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(STORAGE_FILE_EXTENSION)
            {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        log::debug!("CoreDurableStore: Cleared {removed} stored values.");
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryDurableStore {
    values: Mutex<HashMap<String, Value>>,
}

impl InMemoryDurableStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_values(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        // A poisoned map still holds consistent JSON values.
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DurableStoreOperations for InMemoryDurableStore {
    fn get_item(&self, key: &str) -> Result<Option<Value>> {
        validate_key(key)?;
        Ok(self.lock_values().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &Value) -> Result<()> {
        validate_key(key)?;
        self.lock_values().insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.lock_values().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.lock_values().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::User;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample_user() -> User {
        User {
            id: "1".to_string(),
            username: "john_doe".to_string(),
            email: "john@example.com".to_string(),
        }
    }

    #[test]
    fn test_core_store_set_get_remove() {
        let dir = tempdir().unwrap();
        let store = CoreDurableStore::new(dir.path().to_path_buf());

        store
            .set_item(StorageKeys::AUTH_TOKEN, &json!("token_1"))
            .unwrap();
        assert_eq!(
            store.get_item(StorageKeys::AUTH_TOKEN).unwrap(),
            Some(json!("token_1"))
        );
        assert!(dir.path().join("fitbuddy_auth_token.json").exists());

        store.remove_item(StorageKeys::AUTH_TOKEN).unwrap();
        assert_eq!(store.get_item(StorageKeys::AUTH_TOKEN).unwrap(), None);
    }

    #[test]
    fn test_core_store_missing_key_is_absent() {
        let dir = tempdir().unwrap();
        let store = CoreDurableStore::new(dir.path().to_path_buf());

        assert_eq!(store.get_item(StorageKeys::USER).unwrap(), None);
        // Removing an absent key is not an error.
        assert!(store.remove_item(StorageKeys::USER).is_ok());
    }

    #[test]
    fn test_core_store_corrupt_file_is_serde_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("fitbuddy_user.json"), b"{not json").unwrap();
        let store = CoreDurableStore::new(dir.path().to_path_buf());

        match store.get_item(StorageKeys::USER) {
            Err(StorageError::Serde(_)) => {}
            other => panic!("Expected Serde error, got {other:?}"),
        }
    }

    #[test]
    fn test_core_store_clear_only_removes_json_files() {
        let dir = tempdir().unwrap();
        let store = CoreDurableStore::new(dir.path().to_path_buf());
        store.set_item(StorageKeys::THEME, &json!(true)).unwrap();
        store.set_item(StorageKeys::USER, &json!({"id": "1"})).unwrap();
        fs::write(dir.path().join("notes.txt"), b"keep me").unwrap();

        store.clear().unwrap();

        assert_eq!(store.get_item(StorageKeys::THEME).unwrap(), None);
        assert_eq!(store.get_item(StorageKeys::USER).unwrap(), None);
        assert!(dir.path().join("notes.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_core_store_write_failure_is_reported_and_old_value_kept() {
        let dev_full = Path::new("/dev/full");
        if !dev_full.exists() {
            return;
        }
        let dir = tempdir().unwrap();
        let store = CoreDurableStore::new(dir.path().to_path_buf());
        store
            .set_item(StorageKeys::FAVORITES, &json!([{"id": "1"}]))
            .unwrap();
        let target = dir.path().join("fitbuddy_favorites.json");
        std::os::unix::fs::symlink(dev_full, path_utils::temp_path_for(&target)).unwrap();

        let result = store.set_item(StorageKeys::FAVORITES, &json!([{"id": "2"}]));

        match result {
            Err(StorageError::Io(_)) => {}
            other => panic!("Expected Io error on a full disk, got {other:?}"),
        }
        assert_eq!(
            store.get_item(StorageKeys::FAVORITES).unwrap(),
            Some(json!([{"id": "1"}]))
        );
    }

    #[test]
    fn test_for_app_uses_override_directory() {
        let dir = tempdir().unwrap();
        let storage = dir.path().join("fitbuddy_storage");

        let store = CoreDurableStore::for_app("FitBuddyTest", Some(&storage)).unwrap();
        store.set_item(StorageKeys::THEME, &json!(true)).unwrap();

        assert_eq!(store.storage_dir(), storage.as_path());
        assert!(storage.join("fitbuddy_theme.json").is_file());
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let store = InMemoryDurableStore::new();
        match store.set_item("../escape", &json!(1)) {
            Err(StorageError::InvalidKey(key)) => assert_eq!(key, "../escape"),
            other => panic!("Expected InvalidKey, got {other:?}"),
        }
    }

    #[test]
    fn test_typed_helpers_round_trip_a_user() {
        let store = InMemoryDurableStore::new();
        set_typed(&store, StorageKeys::USER, &sample_user()).unwrap();

        let loaded: Option<User> = get_typed(&store, StorageKeys::USER).unwrap();
        assert_eq!(loaded, Some(sample_user()));
    }

    #[test]
    fn test_get_typed_treats_null_as_absent() {
        let store = InMemoryDurableStore::new();
        store.set_item(StorageKeys::FAVORITES, &Value::Null).unwrap();

        let loaded: Option<Vec<User>> = get_typed(&store, StorageKeys::FAVORITES).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_in_memory_clear_removes_everything() {
        let store = InMemoryDurableStore::new();
        store.set_item(StorageKeys::THEME, &json!(false)).unwrap();
        store.set_item(StorageKeys::AUTH_TOKEN, &json!("t")).unwrap();

        store.clear().unwrap();

        assert_eq!(store.get_item(StorageKeys::THEME).unwrap(), None);
        assert_eq!(store.get_item(StorageKeys::AUTH_TOKEN).unwrap(), None);
    }
}
