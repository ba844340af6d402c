//! File-backed game storage.

use std::io::Write;
use std::path::{Path, PathBuf};

use pbplog_core::GameLog;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::StoreError;

/// Name the game is saved under; the file is `<STORAGE_KEY>.json`.
pub const STORAGE_KEY: &str = "pbp_creator_v3";

/// `<platform data dir>/pbplog/pbp_creator_v3.json`.
pub fn default_path() -> Result<PathBuf, StoreError> {
    dirs::data_dir()
        .map(|dir| dir.join("pbplog").join(format!("{STORAGE_KEY}.json")))
        .ok_or(StoreError::NoDataDir)
}

/// A single saved game on disk.
///
/// Loading is forgiving: a missing file is a blank game, absent or out-of-range
/// fields take their defaults, and a file that no longer parses is copied to
/// [`JsonStore::backup_path`] and read as a blank game.
/// Saving writes a sibling temp file and renames it over the old one.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the game at [`default_path`].
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::open(default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<GameLog, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved game, starting blank");
                return Ok(GameLog::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut log = match serde_json::from_str::<GameLog>(&raw) {
            Ok(log) => log,
            Err(e) => {
                let backup = self.backup_path();
                std::fs::copy(&self.path, &backup).map_err(|source| StoreError::Io {
                    path: backup.clone(),
                    source,
                })?;
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %e,
                    "saved game unreadable, starting blank"
                );
                GameLog::default()
            }
        };
        log.normalize();
        debug!(path = %self.path.display(), plays = log.plays().len(), "loaded game");
        Ok(log)
    }

    /// Where an unreadable game file is copied before it can be overwritten.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }

    pub fn save(&self, log: &GameLog) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        serde_json::to_writer_pretty(&mut tmp, log)?;
        tmp.write_all(b"\n")
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|source| StoreError::Io {
                path: tmp.path().to_path_buf(),
                source,
            })?;
        tmp.persist(&self.path)?;

        info!(path = %self.path.display(), plays = log.plays().len(), "saved game");
        Ok(())
    }
}
