use crate::error::{Result, StockzError};
use crate::store::fs::DEFAULT_DATA_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_MIN_RECORDS: usize = 10;

/// Configuration for stockz, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockzConfig {
    /// Record file name inside the data directory
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Whether to add the sample records when the store is nearly empty
    #[serde(default = "default_seed")]
    pub seed_sample_data: bool,

    /// Seeding happens when fewer records than this are loaded
    #[serde(default = "default_min_records")]
    pub min_records: usize,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_seed() -> bool {
    true
}

fn default_min_records() -> usize {
    DEFAULT_MIN_RECORDS
}

impl Default for StockzConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            seed_sample_data: default_seed(),
            min_records: DEFAULT_MIN_RECORDS,
        }
    }
}

impl StockzConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StockzError::Io)?;
        let config: StockzConfig =
            serde_json::from_str(&content).map_err(StockzError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StockzError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StockzError::Serialization)?;
        fs::write(config_path, content).map_err(StockzError::Io)?;
        Ok(())
    }

    /// True when a freshly loaded store of `loaded` records should be seeded.
    pub fn wants_seed(&self, loaded: usize) -> bool {
        self.seed_sample_data && loaded < self.min_records
    }
}
