//! # Storage Layer
//!
//! The [`DataStore`] trait hides where the inventory lives. Commands only ever
//! call it with the complete record set: there are no partial or incremental
//! writes.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage in a data directory
//! - [`memory::InMemoryStore`]: no persistence, for tests
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── inventory.txt   # id|productName|price|date|category, one record per line
//! ├── state.json      # custom categories and the last sort
//! └── config.json     # StockzConfig
//! ```
//!
//! The record file format is described in [`lines`].

use crate::error::Result;
use crate::inventory::SessionState;
use crate::model::Record;
use std::path::PathBuf;

pub mod fs;
pub mod lines;
pub mod memory;

pub trait DataStore {
    /// Load all records in stored order. A missing file is an empty store.
    fn load_records(&self) -> Result<Vec<Record>>;

    /// Replace the stored records with `records`.
    fn save_records(&mut self, records: &[Record]) -> Result<()>;

    fn load_state(&self) -> Result<SessionState>;

    fn save_state(&mut self, state: &SessionState) -> Result<()>;

    /// Where the records are kept, for user-facing messages.
    fn location(&self) -> Option<PathBuf>;
}
