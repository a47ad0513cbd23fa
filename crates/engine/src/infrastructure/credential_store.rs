//! File-backed credential storage.
//!
//! The whole store is one JSON object. Every change rewrites the file through a
//! temporary file in the same directory, created owner-only and renamed into
//! place, so the key is never world-readable and a crash never leaves a torn
//! file behind.

use crate::infrastructure::ports::{CredentialError, CredentialStore};
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Key under which the weather provider's API key is stored.
pub const WEATHER_API_KEY: &str = "openweather_api_key";

type Entries = BTreeMap<String, String>;

/// Credential store persisted as a flat JSON object
///
/// Default location:
/// - Linux: ~/.config/tzgrid/credentials.json
/// - macOS: ~/Library/Application Support/io.tzgrid.tzgrid/credentials.json
/// - Windows: C:\Users\<User>\AppData\Roaming\tzgrid\tzgrid\config\credentials.json
pub struct FileCredentialStore {
    path: PathBuf,
    /// Mirrors the file; only replaced after a successful write.
    entries: Mutex<Entries>,
}

impl FileCredentialStore {
    /// Open the store at the platform config directory.
    pub fn open_default() -> Self {
        let path = ProjectDirs::from("io", "tzgrid", "tzgrid")
            .map(|dirs| dirs.config_dir().join("credentials.json"))
            .unwrap_or_else(|| PathBuf::from("tzgrid_credentials.json"));
        Self::open(path)
    }

    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable or corrupt one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_entries(&path).unwrap_or_else(|e| {
            tracing::warn!(path = ?path, error = %e, "Ignoring unreadable credential file");
            Entries::new()
        });
        tracing::debug!(path = ?path, keys = entries.len(), "Credential store opened");

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the entries, write it out, then commit.
    ///
    /// The lock is held across the write so concurrent updates land in order.
    fn update(&self, change: impl FnOnce(&mut Entries)) -> Result<(), CredentialError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        change(&mut next);
        if next == *entries {
            return Ok(());
        }

        let data = serde_json::to_vec_pretty(&next)?;
        write_private(&self.path, &data).map_err(|source| CredentialError::Write {
            path: self.path.clone(),
            source,
        })?;
        *entries = next;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn remove(&self, key: &str) -> Result<(), CredentialError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

fn read_entries(path: &Path) -> io::Result<Entries> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Entries::new()),
        Err(e) => return Err(e),
    };
    serde_json::from_slice(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Atomically replace `path` with `data`, readable by the owner only.
fn write_private(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(".credentials").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o600));
    }

    let mut file = builder.tempfile_in(dir)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
