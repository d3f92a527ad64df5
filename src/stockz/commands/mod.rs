use crate::catalog::CategoryEntry;
use crate::inventory::Inventory;
use crate::model::Record;
use crate::records::StockSummary;
use crate::sort::SortSpec;
use crate::store::DataStore;
use std::path::PathBuf;

pub mod category;
pub mod delete;
pub mod init;
pub mod insert;
pub mod list;
pub mod report;
pub mod search;
pub mod sort;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<Record>,
    pub listed_records: Vec<Record>,
    pub categories: Vec<CategoryEntry>,
    pub products: Vec<String>,
    pub summary: Option<StockSummary>,
    pub sort: Option<SortSpec>,
    pub report_path: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<Record>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_categories(mut self, categories: Vec<CategoryEntry>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_products(mut self, products: Vec<String>) -> Self {
        self.products = products;
        self
    }

    pub fn with_summary(mut self, summary: StockSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_sort(mut self, spec: SortSpec) -> Self {
        self.sort = Some(spec);
        self
    }

    pub fn with_report_path(mut self, path: PathBuf) -> Self {
        self.report_path = Some(path);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}

/// Writes the full record set and the session state. A failure is reported on
/// `result` rather than returned: the in-memory change already happened and
/// stays valid.
pub(crate) fn persist<S: DataStore>(store: &mut S, inventory: &Inventory, result: &mut CmdResult) {
    let saved = store
        .save_records(inventory.records().records())
        .and_then(|_| store.save_state(&inventory.state()));
    if let Err(e) = saved {
        log::error!("Failed to save inventory: {}", e);
        result.add_message(CmdMessage::error(format!(
            "Changes were applied but could not be saved: {}",
            e
        )));
    }
}
