use crate::date::StockDate;
use crate::error::{Result, StockzError};

/// Maximum number of records the inventory holds.
pub const MAX_RECORDS: usize = 500;
/// Longest product name kept on a record.
pub const MAX_PRODUCT_NAME: usize = 49;
/// Longest category label kept on a record.
pub const MAX_RECORD_CATEGORY: usize = 19;
pub const MAX_PRICE: f64 = 100_000.0;

/// A single stock item.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: u32,
    pub product_name: String,
    pub price: f64,
    pub date: StockDate,
    pub category: String,
}

impl Record {
    /// Builds a record, truncating the name and category label to their
    /// stored widths and rounding the price to cents.
    pub fn new(
        id: u32,
        product_name: impl Into<String>,
        price: f64,
        date: StockDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            product_name: truncate_chars(&product_name.into(), MAX_PRODUCT_NAME),
            price: round_cents(price),
            date,
            category: truncate_chars(&category.into(), MAX_RECORD_CATEGORY),
        }
    }
}

pub fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Prices must be finite and lie in (0, 100000] once rounded to cents.
pub fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() {
        return Err(StockzError::InvalidPrice("price must be a number".into()));
    }
    let rounded = round_cents(price);
    if rounded <= 0.0 {
        return Err(StockzError::InvalidPrice(
            "price must be a positive number".into(),
        ));
    }
    if rounded > MAX_PRICE {
        return Err(StockzError::InvalidPrice(
            "price value too large (max $100,000)".into(),
        ));
    }
    Ok(rounded)
}

/// Free-text names end up verbatim in the `|`-delimited record file, so the
/// delimiter and line breaks are refused here.
pub fn validate_name(name: &str, what: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StockzError::InvalidName(format!("{} cannot be empty", what)));
    }
    if trimmed.contains(['|', '\n', '\r']) {
        return Err(StockzError::InvalidName(format!(
            "{} cannot contain '|' or line breaks",
            what
        )));
    }
    Ok(trimmed.to_string())
}

pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
