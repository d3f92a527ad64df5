use crate::commands::{CmdMessage, CmdResult};
use crate::date::StockDate;
use crate::error::{Result, StockzError};
use crate::inventory::Inventory;
use crate::model::Record;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    Id(u32),
    Date(StockDate),
    /// Case-insensitive substring of the product name.
    Name(String),
    /// Case-insensitive category label.
    Category(String),
}

/// Runs a lookup. An ID that is not in the store is an error; the other
/// queries return an empty listing with an info message.
pub fn run(inventory: &Inventory, query: &SearchQuery) -> Result<CmdResult> {
    let records = inventory.records();
    let found: Vec<Record> = match query {
        SearchQuery::Id(id) => {
            let record = records.find_by_id(*id).ok_or(StockzError::NotFound(*id))?;
            vec![record.clone()]
        }
        SearchQuery::Date(date) => records.find_by_date(date).into_iter().cloned().collect(),
        SearchQuery::Name(fragment) => records.find_by_name(fragment).into_iter().cloned().collect(),
        SearchQuery::Category(name) => records.find_by_category(name).into_iter().cloned().collect(),
    };

    let mut result = CmdResult::default();
    if found.is_empty() {
        result.add_message(CmdMessage::info("No matching records"));
    }
    Ok(result.with_listed_records(found))
}
