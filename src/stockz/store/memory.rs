use super::DataStore;
use crate::error::{Result, StockzError};
use crate::inventory::SessionState;
use crate::model::Record;
use std::path::PathBuf;

/// In-memory storage for tests.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    records: Vec<Record>,
    state: SessionState,
    saves: usize,
    fail_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Makes every following save fail with a store error.
    pub fn simulate_write_error(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn stored_records(&self) -> &[Record] {
        &self.records
    }

    pub fn stored_state(&self) -> &SessionState {
        &self.state
    }

    /// Number of successful record saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(StockzError::Store("simulated write failure".to_string()));
        }
        Ok(())
    }
}

impl DataStore for InMemoryStore {
    fn load_records(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn save_records(&mut self, records: &[Record]) -> Result<()> {
        self.check_writable()?;
        self.records = records.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn load_state(&self) -> Result<SessionState> {
        Ok(self.state.clone())
    }

    fn save_state(&mut self, state: &SessionState) -> Result<()> {
        self.check_writable()?;
        self.state = state.clone();
        Ok(())
    }

    fn location(&self) -> Option<PathBuf> {
        None
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::date::StockDate;
    use crate::inventory::{sample_records, Inventory};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_samples(mut self) -> Self {
            self.store.records.extend(sample_records());
            self
        }

        pub fn with_record(mut self, id: u32, name: &str, price: f64, date: &str, category: &str) -> Self {
            let date = StockDate::parse(date).unwrap();
            self.store
                .records
                .push(Record::new(id, name, price, date, category));
            self
        }

        /// The inventory a session would start with, without seeding.
        pub fn inventory(&self) -> Inventory {
            Inventory::from_parts(self.store.records.clone(), self.store.state.clone())
        }

        pub fn build(self) -> (InMemoryStore, Inventory) {
            let inventory = self.inventory();
            (self.store, inventory)
        }
    }
}
