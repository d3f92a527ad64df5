//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. Both the one-shot
//! subcommands and the interactive session go through it.
//!
//! The facade owns the storage backend and the in-memory [`Inventory`]. It:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (category names or menu indexes into [`CategoryRef`])
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no terminal I/O and no formatting.
//!
//! ## Generic Over DataStore
//!
//! - Production: `StockzApi<FileStore>`
//! - Testing: `StockzApi<InMemoryStore>`

use crate::catalog::{CategoryCatalog, CategoryRef};
use crate::commands;
use crate::config::StockzConfig;
use crate::error::Result;
use crate::inventory::{Inventory, NewStock};
use crate::records::RecordUpdate;
use crate::sort::SortSpec;
use crate::store::DataStore;
use std::path::Path;

pub use crate::commands::search::SearchQuery;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct StockzApi<S: DataStore> {
    store: S,
    inventory: Inventory,
}

impl<S: DataStore> StockzApi<S> {
    /// Loads the inventory from `store`. The returned result carries any
    /// messages produced while loading (sample seeding, save failures).
    pub fn open(mut store: S, config: &StockzConfig) -> Result<(Self, CmdResult)> {
        let (inventory, result) = commands::init::load(&mut store, config)?;
        Ok((Self { store, inventory }, result))
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        self.inventory.catalog()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves a menu index or a category name.
    pub fn resolve_category(&self, input: &str) -> Result<CategoryRef> {
        self.inventory.catalog().lookup(input)
    }

    pub fn add_stock(&mut self, stock: &NewStock) -> Result<CmdResult> {
        commands::insert::run(&mut self.store, &mut self.inventory, stock)
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.inventory)
    }

    pub fn search(&self, query: &SearchQuery) -> Result<CmdResult> {
        commands::search::run(&self.inventory, query)
    }

    pub fn update(&mut self, id: u32, update: &RecordUpdate) -> Result<CmdResult> {
        commands::update::run(&mut self.store, &mut self.inventory, id, update)
    }

    pub fn delete(&mut self, id: u32) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, &mut self.inventory, id)
    }

    pub fn sort(&mut self, spec: SortSpec) -> Result<CmdResult> {
        commands::sort::run(&mut self.store, &mut self.inventory, spec)
    }

    pub fn resort(&mut self) -> Result<CmdResult> {
        commands::sort::repeat(&mut self.store, &mut self.inventory)
    }

    pub fn categories(&self) -> Result<CmdResult> {
        commands::category::list(&self.inventory)
    }

    pub fn products(&self, category: &str) -> Result<CmdResult> {
        let category = self.resolve_category(category)?;
        commands::category::products(&self.inventory, category)
    }

    pub fn create_category<P: AsRef<str>>(&mut self, name: &str, products: &[P]) -> Result<CmdResult> {
        commands::category::create(&mut self.store, &mut self.inventory, name, products)
    }

    pub fn next_id(&self, category: CategoryRef) -> Result<u32> {
        self.inventory.next_id(category)
    }

    pub fn export_report(&self, dir: &Path) -> Result<CmdResult> {
        commands::report::run(&self.inventory, dir)
    }
}
