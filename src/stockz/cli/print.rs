use colored::Colorize;
use std::io::{self, Write};
use stockz::api::{CmdMessage, MessageLevel};
use stockz::catalog::CategoryEntry;
use stockz::model::Record;
use stockz::records::StockSummary;
use stockz::text::pad_to_width;
use unicode_width::UnicodeWidthStr;

const ID_WIDTH: usize = 10;
const NAME_WIDTH: usize = 36;
const PRICE_WIDTH: usize = 12;
const DATE_WIDTH: usize = 10;
const CATEGORY_WIDTH: usize = 20;

pub(super) fn write_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

pub(super) fn write_records<W: Write>(out: &mut W, records: &[Record]) -> io::Result<()> {
    if records.is_empty() {
        writeln!(out, "No records found.")?;
        return Ok(());
    }

    let rule = table_rule();
    writeln!(out, "{}", rule)?;
    writeln!(
        out,
        "{}",
        table_line(["Product ID", "Product Name", "Price", "Date", "Category"]).bold()
    )?;
    writeln!(out, "{}", rule)?;
    for record in records {
        let id = record.id.to_string();
        let price = format!("${:.2}", record.price);
        let date = record.date.to_string();
        writeln!(
            out,
            "{}",
            table_line([&id, &record.product_name, &price, &date, &record.category])
        )?;
    }
    writeln!(out, "{}", rule)?;
    writeln!(out, "Total Records: {}", records.len())
}

/// Vertical view of a single record.
pub(super) fn write_record_detail<W: Write>(out: &mut W, record: &Record) -> io::Result<()> {
    writeln!(out, "{:<14}: {}", "Product ID", record.id.to_string().yellow())?;
    writeln!(out, "{:<14}: {}", "Product Name", record.product_name.bold())?;
    writeln!(out, "{:<14}: ${:.2}", "Price", record.price)?;
    writeln!(out, "{:<14}: {}", "Date", record.date)?;
    writeln!(out, "{:<14}: {}", "Category", record.category)
}

pub(super) fn write_summary<W: Write>(out: &mut W, summary: &StockSummary) -> io::Result<()> {
    if summary.total_count == 0 {
        return Ok(());
    }
    let label_width = summary
        .categories
        .iter()
        .map(|t| t.category.width())
        .max()
        .unwrap_or(0)
        .max("TOTAL".len());
    writeln!(out)?;
    for total in &summary.categories {
        writeln!(
            out,
            "{} : {} items, ${:.2}",
            pad_to_width(&total.category, label_width),
            total.count,
            total.value
        )?;
    }
    writeln!(
        out,
        "{}",
        format!(
            "{} : {} items, ${:.2}",
            pad_to_width("TOTAL", label_width),
            summary.total_count,
            summary.total_value
        )
        .bold()
    )
}

pub(super) fn write_categories<W: Write>(out: &mut W, categories: &[CategoryEntry]) -> io::Result<()> {
    for entry in categories {
        writeln!(
            out,
            "  {:>2}. {} {}",
            entry.index,
            pad_to_width(&entry.name, 30),
            format!("(IDs {}-{})", entry.base_id + 1, entry.base_id + 999).dimmed()
        )?;
    }
    Ok(())
}

pub(super) fn write_products<W: Write>(out: &mut W, products: &[String]) -> io::Result<()> {
    for (i, product) in products.iter().enumerate() {
        writeln!(out, "  {:>2}. {}", i + 1, product)?;
    }
    Ok(())
}

fn table_rule() -> String {
    let cells: Vec<String> = [ID_WIDTH, NAME_WIDTH, PRICE_WIDTH, DATE_WIDTH, CATEGORY_WIDTH]
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect();
    format!("+{}+", cells.join("+"))
}

fn table_line(cells: [&str; 5]) -> String {
    let widths = [ID_WIDTH, NAME_WIDTH, PRICE_WIDTH, DATE_WIDTH, CATEGORY_WIDTH];
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_to_width(cell, width))
        .collect();
    format!("| {} |", padded.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockz::date::StockDate;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn record_table_rows_line_up() {
        let date = StockDate::parse("15/01/2024").unwrap();
        let records = vec![
            Record::new(1001, "iPhone 15 Pro", 999.0, date, "iPhones"),
            Record::new(6001, "Ein sehr langer Produktname für ein Zubehörteil", 19.99, date, "Zubehör"),
        ];
        let text = render(|out| write_records(out, &records));
        let widths: Vec<usize> = text
            .lines()
            .filter(|l| l.starts_with('|') || l.starts_with('+'))
            .map(|l| l.width())
            .collect();
        assert_eq!(widths.len(), 6);
        assert!(widths.iter().all(|w| *w == widths[0]));
        assert!(text.contains("$999.00"));
        assert!(text.contains("Total Records: 2"));
    }

    #[test]
    fn empty_listing() {
        let text = render(|out| write_records(out, &[]));
        assert_eq!(text, "No records found.\n");
    }

    #[test]
    fn messages_are_written_in_order() {
        let messages = vec![CmdMessage::success("one"), CmdMessage::error("two")];
        let text = render(|out| write_messages(out, &messages));
        assert_eq!(text, "one\ntwo\n");
    }
}
