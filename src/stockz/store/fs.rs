use super::lines::{decode_records, encode_records};
use super::DataStore;
use crate::error::{Result, StockzError};
use crate::inventory::SessionState;
use crate::model::Record;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "inventory.txt";
const STATE_FILENAME: &str = "state.json";

/// Keeps the inventory as files in a single data directory.
pub struct FileStore {
    root: PathBuf,
    data_file: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            data_file: DEFAULT_DATA_FILE.to_string(),
        }
    }

    pub fn with_data_file(mut self, name: &str) -> Self {
        if !name.trim().is_empty() {
            self.data_file = name.trim().to_string();
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn records_path(&self) -> PathBuf {
        self.root.join(&self.data_file)
    }

    pub fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(StockzError::Io)?;
        }
        Ok(())
    }

    /// Writes to a sibling temp file first and renames it over the target, so
    /// a crash mid-write never leaves a truncated file behind.
    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        self.ensure_dir()?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StockzError::Store(format!("invalid path {}", path.display())))?;
        let tmp = path.with_file_name(format!(".{}.tmp", file_name));
        fs::write(&tmp, content).map_err(StockzError::Io)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(StockzError::Io(e));
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load_records(&self) -> Result<Vec<Record>> {
        let path = self.records_path();
        if !path.exists() {
            log::debug!("No data file at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        match fs::read_to_string(&path) {
            Ok(content) => {
                let records = decode_records(&content);
                log::debug!("Loaded {} records from {}", records.len(), path.display());
                Ok(records)
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    fn save_records(&mut self, records: &[Record]) -> Result<()> {
        let path = self.records_path();
        self.write_atomic(&path, &encode_records(records))?;
        log::debug!("Saved {} records to {}", records.len(), path.display());
        Ok(())
    }

    fn load_state(&self) -> Result<SessionState> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(SessionState::default());
        }
        let parsed = fs::read_to_string(&path)
            .map_err(StockzError::Io)
            .and_then(|content| serde_json::from_str(&content).map_err(StockzError::Serialization));
        match parsed {
            Ok(state) => Ok(state),
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {}", path.display(), e);
                Ok(SessionState::default())
            }
        }
    }

    fn save_state(&mut self, state: &SessionState) -> Result<()> {
        let content = serde_json::to_string_pretty(state).map_err(StockzError::Serialization)?;
        self.write_atomic(&self.state_path(), &content)
    }

    fn location(&self) -> Option<PathBuf> {
        Some(self.records_path())
    }
}
