//! Stock report export.
//!
//! The report is a plain-text snapshot: a header with the generation time,
//! every record in current store order, a per-category summary for each
//! category label present in the store, and the grand total.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StockzError};
use crate::inventory::Inventory;
use crate::model::Record;
use crate::text::pad_to_width;
use chrono::{Local, NaiveDateTime};
use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const RULE: &str = "==============================================================";
const THIN_RULE: &str = "--------------------------------------------------------------";
const TABLE_RULE: &str =
    "+------------+--------------------------------------+------------+------------+----------------------+";
const NAME_WIDTH: usize = 36;
const CATEGORY_WIDTH: usize = 20;

pub fn report_filename(generated: NaiveDateTime) -> String {
    format!("stock_report_{}.txt", generated.format("%Y%m%d_%H%M%S"))
}

/// Writes a report into `dir`, creating the directory if needed.
pub fn run(inventory: &Inventory, dir: &Path) -> Result<CmdResult> {
    let generated = Local::now().naive_local();
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(StockzError::Io)?;
    }
    let path = dir.join(report_filename(generated));
    fs::write(&path, render(inventory, generated)).map_err(StockzError::Io)?;
    log::info!("Report written to {}", path.display());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Stock report exported: {}",
        path.display()
    )));
    Ok(result
        .with_summary(inventory.records().category_totals())
        .with_report_path(path))
}

pub fn render(inventory: &Inventory, generated: NaiveDateTime) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails.
    let _ = write_report(&mut out, inventory, generated);
    out
}

fn write_report(out: &mut String, inventory: &Inventory, generated: NaiveDateTime) -> fmt::Result {
    let records = inventory.records();

    writeln!(out, "{}", RULE)?;
    writeln!(out, "{:^62}", "STOCKZ INVENTORY")?;
    writeln!(out, "{:^62}", "STOCK REPORT")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;
    writeln!(out, "Generated on: {}", generated.format("%a %b %e %H:%M:%S %Y"))?;
    writeln!(out, "Total Records: {}", records.len())?;
    writeln!(out)?;

    if records.is_empty() {
        return writeln!(out, "No records in stock.");
    }

    writeln!(out, "{}", TABLE_RULE)?;
    writeln!(
        out,
        "| {:<10} | {} | {:<10} | {:<10} | {} |",
        "Product ID",
        pad_to_width("Product Name", NAME_WIDTH),
        "Price",
        "Date",
        pad_to_width("Category", CATEGORY_WIDTH)
    )?;
    writeln!(out, "{}", TABLE_RULE)?;
    for record in records.records() {
        writeln!(out, "{}", table_row(record))?;
    }
    writeln!(out, "{}", TABLE_RULE)?;

    let summary = records.category_totals();
    let label_width = summary
        .categories
        .iter()
        .map(|t| t.category.width())
        .max()
        .unwrap_or(0)
        .max("TOTAL".len());

    writeln!(out)?;
    writeln!(out, "{}", THIN_RULE)?;
    writeln!(out, "{:^62}", "SUMMARY BY CATEGORY")?;
    writeln!(out, "{}", THIN_RULE)?;
    for total in &summary.categories {
        writeln!(
            out,
            "{} : {} items, Total Value: ${:.2}",
            pad_to_width(&total.category, label_width),
            total.count,
            total.value
        )?;
    }
    writeln!(out, "{}", THIN_RULE)?;
    writeln!(
        out,
        "{} : {} items, Total Value: ${:.2}",
        pad_to_width("TOTAL", label_width),
        summary.total_count,
        summary.total_value
    )
}

fn table_row(record: &Record) -> String {
    format!(
        "| {:<10} | {} | ${:<9.2} | {:<10} | {} |",
        record.id,
        pad_to_width(&record.product_name, NAME_WIDTH),
        record.price,
        record.date.to_string(),
        pad_to_width(&record.category, CATEGORY_WIDTH)
    )
}
