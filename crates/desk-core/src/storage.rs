//! Session-scoped key/value storage.
//!
//! Values are plain strings, mirroring browser session storage. Two backends:
//! - `MemoryStorage`: lives as long as the process (an unnamed session)
//! - `FileSessionStorage`: `<DESK_HOME>/sessions/<id>.json`, lives until the
//!   session is discarded
//!
//! Session files are written with restricted permissions (0600) since they
//! hold credentials.

use std::collections::HashMap;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::paths;

const MAX_SESSION_ID_LEN: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read session file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write session file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("session file {} is unreadable: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid session id {0:?}: use 1-64 letters, digits, '_' or '-'")]
    InvalidSessionId(String),
}

/// Key/value backend for session-scoped state.
pub trait SessionStorage: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

// ============================================================================
// MemoryStorage
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// Session ids
// ============================================================================

/// Identifier of a named session. Used verbatim as a file stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a fresh random session id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SessionId {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s.len() <= MAX_SESSION_ID_LEN
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(StorageError::InvalidSessionId(s.to_string()))
        }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// FileSessionStorage
// ============================================================================

/// One JSON object file per named session.
///
/// The file is re-read on every access so that separate `desk` invocations
/// sharing a session see each other's writes.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    id: SessionId,
    path: PathBuf,
}

impl FileSessionStorage {
    /// Opens the session `id` under `<DESK_HOME>/sessions`.
    pub fn open(id: SessionId) -> Self {
        Self::open_in(&paths::sessions_dir(), id)
    }

    /// Opens the session `id` under an explicit directory.
    pub fn open_in(dir: &Path, id: SessionId) -> Self {
        let path = dir.join(format!("{}.json", id.as_str()));
        Self { id, path }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the session file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Ends the session by deleting its file. Missing files are fine.
    pub fn discard(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn read_entries(&self) -> Result<HashMap<String, String>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&contents).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Entries to modify before a write. An unparseable file is replaced,
    /// so a corrupt session never blocks saving or clearing the token.
    /// The flag reports whether that happened.
    fn entries_for_write(&self) -> Result<(HashMap<String, String>, bool), StorageError> {
        match self.read_entries() {
            Ok(entries) => Ok((entries, false)),
            Err(err @ StorageError::Parse { .. }) => {
                tracing::warn!(error = %err, "replacing unreadable session file");
                Ok((HashMap::new(), true))
            }
            Err(err) => Err(err),
        }
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let write_err = |source: io::Error| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = serde_json::to_string_pretty(entries).map_err(|source| {
            StorageError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&tmp_path).map_err(write_err)?;
        file.write_all(contents.as_bytes()).map_err(write_err)?;
        drop(file);
        fs::rename(&tmp_path, &self.path).map_err(write_err)
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let (mut entries, _) = self.entries_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.exists() {
            return Ok(());
        }
        let (mut entries, replaced) = self.entries_for_write()?;
        if entries.remove(key).is_some() || replaced {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}
