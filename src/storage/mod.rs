use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::{app_config_path, config_env_dirs, ConfigPathError, APP_DIR};

/// Key holding `"dark"` or `"light"`; absence means system.
pub const DEFAULT_PREFERENCE_KEY: &str = "theme";
const PREFERENCE_FILE: &str = "theme.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to read preference file: {path}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write preference file: {path}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to parse preference file")]
    Parse(#[from] serde_json::Error),
    #[error("preference file is not a JSON object: {path}")]
    NotAnObject { path: PathBuf },
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Durable key-value store holding the explicit preference.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Flat JSON object on disk. Unrelated keys survive writes.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn with_default_path() -> StorageResult<Self> {
        let (xdg_config_home, home) = config_env_dirs();
        Self::with_env_dirs(xdg_config_home.as_deref(), home.as_deref())
    }

    fn with_env_dirs(xdg_config_home: Option<&Path>, home: Option<&Path>) -> StorageResult<Self> {
        let path = app_config_path(APP_DIR, PREFERENCE_FILE, xdg_config_home, home).map_err(
            |error| match error {
                ConfigPathError::MissingHomeDirectory => StorageError::MissingHomeDirectory,
            },
        )?;
        Ok(Self::with_path(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StorageResult<Map<String, Value>> {
        let serialized = match fs::read_to_string(&self.path) {
            Ok(serialized) => serialized,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if serialized.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&serialized)? {
            Value::Object(entries) => Ok(entries),
            _ => Err(StorageError::NotAnObject {
                path: self.path.clone(),
            }),
        }
    }

    /// Like `load`, but an unreadable file is treated as empty so writes can
    /// replace it. The flag reports whether the contents were discarded.
    fn load_for_write(&self) -> StorageResult<(Map<String, Value>, bool)> {
        match self.load() {
            Ok(entries) => Ok((entries, false)),
            Err(err @ (StorageError::Parse(_) | StorageError::NotAnObject { .. })) => {
                tracing::warn!(
                    ?err,
                    path = %self.path.display(),
                    "discarding unreadable preference file"
                );
                Ok((Map::new(), true))
            }
            Err(err) => Err(err),
        }
    }

    fn save(&self, entries: &Map<String, Value>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let serialized = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, serialized).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.load()?;
        Ok(entries
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let (mut entries, _) = self.load_for_write()?;
        entries.insert(key.to_string(), Value::String(value.to_string()));
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let (mut entries, discarded) = self.load_for_write()?;
        if entries.remove(key).is_none() && !discarded {
            return Ok(());
        }
        self.save(&entries)
    }
}
