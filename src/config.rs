//! Worklog configuration.
//!
//! Loaded from `~/.worklog/config.toml`. The home directory can be moved
//! with `WORKLOG_HOME`. A missing file means defaults.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use tracing::debug;

use crate::storage::{JsonFileStore, KeyValueStore, Snapshot, SqliteStore, StorageError};

/// Environment variable overriding the worklog home directory.
pub const HOME_ENV: &str = "WORKLOG_HOME";

/// Which medium holds the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// `<data-dir>/work-log-storage.json`.
    #[default]
    Json,

    /// `<data-dir>/worklog.sqlite`.
    Sqlite,
}

/// Worklog configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub backend: Backend,

    /// Where data lives. Relative paths resolve against the home directory.
    pub data_dir: Option<PathBuf>,

    /// Registry contents for a fresh store.
    pub default_repositories: Option<Vec<String>>,

    /// Title for a fresh store.
    pub default_title: Option<String>,
}

impl Config {
    /// Load config from the worklog home directory.
    pub fn load(home: &Path) -> Result<Self, String> {
        Self::load_from(&home.join("config.toml"))
    }

    /// Load config from `path`. A missing file yields defaults; an invalid one is an error.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file; using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The worklog home: `$WORKLOG_HOME` if set, else `~/.worklog`.
    pub fn home() -> Option<PathBuf> {
        if let Ok(dir) = env::var(HOME_ENV)
            && !dir.is_empty()
        {
            return Some(PathBuf::from(dir));
        }
        dirs::home_dir().map(|h| h.join(".worklog"))
    }

    /// The data directory, resolved against `home`.
    pub fn data_dir(&self, home: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) => home.join(dir),
            None => home.to_path_buf(),
        }
    }

    /// The state a store starts from when nothing has been saved yet.
    pub fn seed(&self) -> Snapshot {
        let mut seed = Snapshot::default();
        if let Some(repositories) = &self.default_repositories {
            seed.repositories.clone_from(repositories);
        }
        if let Some(title) = &self.default_title {
            seed.app_title.clone_from(title);
        }
        seed
    }

    /// Opens the configured storage medium under the data directory.
    pub fn open_backend(&self, home: &Path) -> Result<Box<dyn KeyValueStore>, StorageError> {
        let dir = self.data_dir(home);
        match self.backend {
            Backend::Json => {
                let store = JsonFileStore::new(dir)?;
                debug!(root = %store.root().display(), "using JSON file storage");
                Ok(Box::new(store))
            }
            Backend::Sqlite => {
                fs::create_dir_all(&dir)?;
                let path = dir.join("worklog.sqlite");
                debug!(path = %path.display(), "using SQLite storage");
                Ok(Box::new(SqliteStore::open(path)?))
            }
        }
    }
}
