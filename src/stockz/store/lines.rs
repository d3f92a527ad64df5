//! Line-oriented record codec.
//!
//! Each record is one line: `id|productName|price|date|category`, with the
//! price written with exactly two decimals and the date as `DD/MM/YYYY`.
//! Fields are not escaped; names containing `|` are refused before they reach
//! the store.
//!
//! Decoding is lenient. A line with the wrong number of fields, or whose id,
//! price or date does not parse or is out of range, is skipped with a warning
//! instead of failing the whole load.

use crate::date::StockDate;
use crate::model::{validate_price, Record};

pub const DELIMITER: char = '|';
const FIELD_COUNT: usize = 5;

pub fn encode_record(record: &Record) -> String {
    format!(
        "{}|{}|{:.2}|{}|{}",
        record.id, record.product_name, record.price, record.date, record.category
    )
}

pub fn encode_records(records: &[Record]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&encode_record(record));
        out.push('\n');
    }
    out
}

/// Parses one line, returning why it was rejected on failure.
pub fn decode_line(line: &str) -> Result<Record, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            fields.len()
        ));
    }

    let id: u32 = fields[0]
        .trim()
        .parse()
        .map_err(|_| format!("bad id '{}'", fields[0]))?;
    if id == 0 {
        return Err("id must be positive".to_string());
    }
    let price: f64 = fields[2]
        .trim()
        .parse()
        .map_err(|_| format!("bad price '{}'", fields[2]))?;
    let price = validate_price(price).map_err(|e| e.to_string())?;
    let date = StockDate::parse(fields[3].trim()).map_err(|e| e.to_string())?;

    Ok(Record::new(id, fields[1], price, date, fields[4]))
}

pub fn decode_records(content: &str) -> Vec<Record> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(n, line)| match decode_line(line) {
            Ok(record) => Some(record),
            Err(reason) => {
                log::warn!("Skipping line {}: {}", n + 1, reason);
                None
            }
        })
        .collect()
}
