//! Durable storage of the [`Session`] between runs
//!
//! The store only knows how to read and write the serialized blob. Deciding
//! when a session needs refreshing is left to [`Session`] itself.

use anyhow::Context as _;
use marlin_shared::{const_config::client::CLIENT_SESSION_STORAGE_KEY, session::Session};
use std::{
    collections::HashMap,
    fmt::Debug,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::{debug, warn};

/// Key value storage that outlives the process, like browser local storage
pub trait SessionStorage: Debug + Send + Sync {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove_item(&self, key: &str) -> anyhow::Result<()>;
}

/// Keeps values for the lifetime of the process only
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    fn items(&self) -> anyhow::Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| anyhow::anyhow!("memory storage mutex poisoned"))
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.items()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        self.items()?.remove(key);
        Ok(())
    }
}

/// Stores each key as `<key>.json` inside a folder
#[derive(Debug, Clone)]
pub struct FileStorage {
    folder: PathBuf,
}

impl FileStorage {
    pub fn new<P: Into<PathBuf>>(folder: P) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    /// Uses `<platform config dir>/<app_name>`
    pub fn in_config_dir(app_name: &str) -> anyhow::Result<Self> {
        let folder = dirs::config_dir()
            .context("could not determine config directory")?
            .join(app_name);
        Ok(Self::new(folder))
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.folder.join(format!("{key}.json"))
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.item_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {path:?}")),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.folder)
            .with_context(|| format!("failed to create storage folder: {:?}", self.folder))?;
        let path = self.item_path(key);
        fs::write(&path, value).with_context(|| format!("failed to write {path:?}"))
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let path = self.item_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {path:?}")),
        }
    }
}

/// Reads and writes the [`Session`] under [`CLIENT_SESSION_STORAGE_KEY`]
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// A blob that no longer parses is removed so the next load starts clean
    pub fn load(&self) -> Option<Session> {
        let raw = match self.storage.get_item(CLIENT_SESSION_STORAGE_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(?err, "failed to read session");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(?err, "failed to parse stored session, removing it");
                marlin_shared::log_err_as_warn!(self.storage.remove_item(CLIENT_SESSION_STORAGE_KEY));
                None
            }
        }
    }

    /// Passing `None` removes any stored session
    #[tracing::instrument(skip(self))]
    pub fn save(&self, session: Option<&Session>) {
        let result = match session {
            Some(session) => serde_json::to_string(session)
                .context("failed to serialize session")
                .and_then(|raw| self.storage.set_item(CLIENT_SESSION_STORAGE_KEY, &raw)),
            None => self.storage.remove_item(CLIENT_SESSION_STORAGE_KEY),
        };
        match result {
            Ok(()) => debug!(is_present = session.is_some(), "session saved"),
            Err(err) => warn!(?err, "failed to save session"),
        }
    }

    pub fn clear(&self) {
        self.save(None);
    }

    pub fn is_admin(&self) -> bool {
        self.load().is_some_and(|session| session.is_admin())
    }
}

#[cfg(test)]
mod tests {
    use marlin_shared::uac::AuthorityRole;
    use marlin_time::Timestamp;

    use super::*;

    fn admin_session() -> Session {
        Session::new_login(
            "access".into(),
            Some("refresh".into()),
            AuthorityRole::Admin,
            Timestamp::from_secs_since_unix_epoch(1_700_000_000),
        )
    }

    #[test]
    fn save_then_load() {
        // Arrange
        let store = SessionStore::default();
        let session = admin_session();

        // Act
        store.save(Some(&session));

        // Assert
        assert_eq!(store.load(), Some(session));
        assert!(store.is_admin());
    }

    #[test]
    fn clear_removes_session() {
        let store = SessionStore::default();
        store.save(Some(&admin_session()));
        store.clear();
        assert_eq!(store.load(), None);
        assert!(!store.is_admin());
    }

    #[test]
    fn corrupt_blob_is_removed() {
        // Arrange
        let storage = Arc::new(MemoryStorage::default());
        storage
            .set_item(CLIENT_SESSION_STORAGE_KEY, "{not json")
            .unwrap();
        let store = SessionStore::new(storage.clone());

        // Act
        let actual = store.load();

        // Assert
        assert_eq!(actual, None);
        assert_eq!(storage.get_item(CLIENT_SESSION_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn non_admin_session_is_not_admin() {
        let store = SessionStore::default();
        let session = Session {
            role: AuthorityRole::User,
            ..admin_session()
        };
        store.save(Some(&session));
        assert!(!store.is_admin());
    }

    #[test]
    fn file_storage_persists_between_instances() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let session = admin_session();
        SessionStore::new(Arc::new(FileStorage::new(dir.path()))).save(Some(&session));

        // Act
        let actual = SessionStore::new(Arc::new(FileStorage::new(dir.path()))).load();

        // Assert
        assert_eq!(actual, Some(session));
        assert!(dir.path().join("session.json").exists());
    }

    #[test]
    fn file_storage_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("never-created"));
        assert!(storage.remove_item("session").is_ok());
        assert_eq!(storage.get_item("session").unwrap(), None);
    }
}
