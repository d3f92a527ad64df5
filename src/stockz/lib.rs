//! # Stockz Architecture
//!
//! Stockz keeps a small retail stock inventory: individually identified items
//! grouped into product categories, with search, update, sorting and a text
//! report. The core is a library; the `stockz` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Subcommands and the interactive menu session             │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the store and the in-memory Inventory               │
//! │  - Normalizes inputs (names / menu indexes → CategoryRef)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Mutates the Inventory, persists, returns CmdResult       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┐  ┌──────────────────────────┐
//! │  Domain (inventory, records, │  │  Storage Layer (store/)  │
//! │  catalog, ids, sort, date)   │  │  DataStore trait         │
//! └──────────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! ## Record IDs
//!
//! Every category owns a numeric band of IDs (see [`catalog`]), and new items
//! get the next ID after the highest one already in that band ([`ids`]). IDs
//! are unique across the whole store no matter which category label a record
//! carries.
//!
//! ## Persistence
//!
//! Every mutating command rewrites the complete record file and the session
//! state. A failed write is reported as an error message on the command
//! result; the in-memory inventory keeps the change.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`inventory`]: The aggregate of records, catalog and sort memory
//! - [`records`]: The ordered, bounded record collection
//! - [`catalog`]: Built-in and custom categories
//! - [`ids`]: Per-category ID allocation
//! - [`sort`]: Bubble and selection sorts and sort specs
//! - [`date`]: Validated `DD/MM/YYYY` dates
//! - [`model`]: The `Record` type and field validation
//! - [`store`]: Storage abstraction and implementations
//! - [`text`]: Width-aware cell padding for tables
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod date;
pub mod error;
pub mod ids;
pub mod inventory;
pub mod model;
pub mod records;
pub mod sort;
pub mod store;
pub mod text;
