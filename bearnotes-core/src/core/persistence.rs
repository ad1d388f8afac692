//! Local key-value storage and the repository that reads and writes the
//! application state snapshot through it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::settings::Settings;
use crate::core::state::{AppState, PersistedState};
use crate::core::theme::Theme;
use crate::{BearnotesError, Result};

/// Key under which the whole application state is stored.
pub const APP_STATE_KEY: &str = "app-state";

/// Key under which the theme is mirrored for early palette application.
pub const THEME_KEY: &str = "theme";

/// A string-to-string store that survives restarts.
pub trait KeyValueStore {
    /// Returns the value for `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Stores each key as `<key>.json` inside one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`BearnotesError::Io`] if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Opens the store in the configured [`Settings::data_directory`].
    ///
    /// # Errors
    ///
    /// Returns [`BearnotesError::Io`] if the directory cannot be created.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::open(&settings.data_directory)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validates `key` and returns its file path inside the store directory.
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(BearnotesError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        // Write beside the target and rename so a crash never leaves half a snapshot.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Volatile store, used in tests and for throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A store that keeps nothing; every read misses and every write succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStore;

impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn remove(&mut self, _key: &str) -> Result<()> {
        Ok(())
    }
}

/// Reads and writes the application state snapshot.
pub struct StateRepository<S> {
    store: S,
}

impl<S: KeyValueStore> StateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns the stored snapshot, or `None` if there is none or it cannot
    /// be read or parsed. Failures are logged, never returned.
    pub fn load(&self) -> Option<PersistedState> {
        let raw = match self.store.get(APP_STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("could not read saved state: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(e) => {
                log::warn!("discarding malformed saved state: {e}");
                None
            }
        }
    }

    /// Writes the whole state, and mirrors its theme under [`THEME_KEY`].
    ///
    /// # Errors
    ///
    /// Returns [`BearnotesError::Json`] if serialization fails or any error of
    /// the underlying store.
    pub fn save(&mut self, state: &AppState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.store.set(APP_STATE_KEY, &json)?;
        self.store.set(THEME_KEY, state.theme.id())?;
        Ok(())
    }

    /// The mirrored theme, readable without parsing the full snapshot.
    pub fn load_theme_preference(&self) -> Option<Theme> {
        match self.store.get(THEME_KEY) {
            Ok(Some(id)) => Theme::from_id(id.trim()),
            Ok(None) => None,
            Err(e) => {
                log::warn!("could not read theme preference: {e}");
                None
            }
        }
    }
}
