use crate::date::StockDate;
use crate::error::{Result, StockzError};
use crate::model::{truncate_chars, validate_price, Record, MAX_RECORDS, MAX_RECORD_CATEGORY};
use std::collections::HashSet;

/// Fields that may change on an existing record. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    pub price: Option<f64>,
    pub date: Option<StockDate>,
}

/// Item count and value for one category label.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub count: usize,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockSummary {
    /// One entry per category label, in order of first appearance.
    pub categories: Vec<CategoryTotal>,
    pub total_count: usize,
    pub total_value: f64,
}

/// The ordered, capacity-bounded record collection.
///
/// IDs are unique across the whole store. Order is insertion order until a
/// sort rearranges it; deletion keeps the relative order of the rest.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from previously persisted records. Records past the
    /// capacity limit or repeating an earlier ID are dropped.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(records.len().min(MAX_RECORDS));
        for record in records {
            if kept.len() == MAX_RECORDS {
                log::warn!("Store is full ({} records), ignoring the rest", MAX_RECORDS);
                break;
            }
            if !seen.insert(record.id) {
                log::warn!("Ignoring record with duplicate ID {}", record.id);
                continue;
            }
            kept.push(record);
        }
        Self { records: kept }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Mutable view for in-place reordering. The length cannot change through it.
    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn remaining_capacity(&self) -> usize {
        MAX_RECORDS - self.records.len()
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Validates a record against the store invariants without inserting it.
    pub fn check_insert(&self, record: &Record) -> Result<()> {
        if self.records.len() >= MAX_RECORDS {
            return Err(StockzError::CapacityExceeded(format!(
                "maximum records limit reached ({})",
                MAX_RECORDS
            )));
        }
        if record.id == 0 {
            return Err(StockzError::InvalidId(record.id));
        }
        if self.contains_id(record.id) {
            return Err(StockzError::DuplicateId(record.id));
        }
        validate_price(record.price)?;
        Ok(())
    }

    pub fn insert(&mut self, record: Record) -> Result<()> {
        self.check_insert(&record)?;
        self.records.push(record);
        Ok(())
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn find_by_date(&self, date: &StockDate) -> Vec<&Record> {
        self.records.iter().filter(|r| &r.date == date).collect()
    }

    /// Case-insensitive exact match on the category label. The name is cut
    /// to the stored label width first, so a full category name matches.
    pub fn find_by_category(&self, name: &str) -> Vec<&Record> {
        let needle = truncate_chars(name.trim(), MAX_RECORD_CATEGORY).to_lowercase();
        self.records
            .iter()
            .filter(|r| r.category.to_lowercase() == needle)
            .collect()
    }

    /// Case-insensitive substring match on the product name.
    pub fn find_by_name(&self, fragment: &str) -> Vec<&Record> {
        let needle = fragment.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.product_name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Applies the supplied fields. Every field is validated before anything
    /// is written. Returns whether the record actually changed.
    pub fn update(&mut self, id: u32, update: &RecordUpdate) -> Result<bool> {
        let price = update.price.map(validate_price).transpose()?;
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StockzError::NotFound(id))?;

        let mut changed = false;
        if let Some(price) = price {
            if record.price != price {
                record.price = price;
                changed = true;
            }
        }
        if let Some(date) = update.date {
            if record.date != date {
                record.date = date;
                changed = true;
            }
        }
        Ok(changed)
    }

    pub fn delete(&mut self, id: u32) -> Result<Record> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(StockzError::NotFound(id))?;
        Ok(self.records.remove(pos))
    }

    pub fn category_totals(&self) -> StockSummary {
        let mut summary = StockSummary::default();
        for record in &self.records {
            summary.total_count += 1;
            summary.total_value += record.price;
            match summary
                .categories
                .iter_mut()
                .find(|t| t.category == record.category)
            {
                Some(total) => {
                    total.count += 1;
                    total.value += record.price;
                }
                None => summary.categories.push(CategoryTotal {
                    category: record.category.clone(),
                    count: 1,
                    value: record.price,
                }),
            }
        }
        summary
    }
}
