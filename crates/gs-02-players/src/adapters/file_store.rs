use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::SessionConfig;
use crate::domain::{sanitize_id, PlayerRecord, StoreError, StoreResult};
use crate::ports::PlayerStore;

/// Extension of JSON player records.
pub const RECORD_EXTENSION: &str = ".json";

/// File-backed player store.
///
/// Permission records are plain text, one entry per line, under
/// `permissions_dir`. Player records are pretty-printed JSON under
/// `players_dir`. Every write goes to a temp file first and is renamed into
/// place, so a crash never leaves a half-written record.
pub struct FilePlayerStore {
    permissions_dir: PathBuf,
    players_dir: PathBuf,
}

impl FilePlayerStore {
    /// Create a store over the directories in `config`, creating them if
    /// needed.
    pub fn open(config: &SessionConfig) -> StoreResult<Self> {
        for dir in [&config.permissions_dir, &config.players_dir] {
            std::fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        }
        tracing::info!(
            permissions_dir = %config.permissions_dir.display(),
            players_dir = %config.players_dir.display(),
            "Opened player store"
        );
        Ok(Self {
            permissions_dir: config.permissions_dir.clone(),
            players_dir: config.players_dir.clone(),
        })
    }

    fn permission_path(&self, name: &str) -> PathBuf {
        self.permissions_dir.join(name)
    }

    fn record_path(&self, guid: &str) -> PathBuf {
        self.players_dir
            .join(format!("{}{}", sanitize_id(guid), RECORD_EXTENSION))
    }

    fn read_optional(path: &Path) -> StoreResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        let mut file =
            std::fs::File::create(&temp_path).map_err(|e| StoreError::io(&temp_path, e))?;
        file.write_all(bytes)
            .map_err(|e| StoreError::io(&temp_path, e))?;
        file.sync_all().map_err(|e| StoreError::io(&temp_path, e))?;

        std::fs::rename(&temp_path, path).map_err(|e| StoreError::io(path, e))
    }
}

impl PlayerStore for FilePlayerStore {
    fn read_permissions(&self, name: &str) -> StoreResult<Option<Vec<String>>> {
        let path = self.permission_path(name);
        let Some(text) = Self::read_optional(&path)? else {
            return Ok(None);
        };
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Some(lines))
    }

    fn write_permissions(&self, name: &str, lines: &[String]) -> StoreResult<()> {
        let mut text = String::new();
        for line in lines {
            text.push_str(line);
            text.push('\n');
        }
        Self::write_atomic(&self.permission_path(name), text.as_bytes())
    }

    fn delete_permissions(&self, name: &str) -> StoreResult<bool> {
        let path = self.permission_path(name);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn load_record(&self, guid: &str) -> StoreResult<Option<PlayerRecord>> {
        let path = self.record_path(guid);
        let Some(text) = Self::read_optional(&path)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StoreError::Record {
                path,
                message: e.to_string(),
            })
    }

    fn save_record(&self, record: &PlayerRecord) -> StoreResult<()> {
        let path = self.record_path(&record.guid);
        let json = serde_json::to_vec_pretty(record).map_err(|e| StoreError::Record {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Self::write_atomic(&path, &json)
    }
}
