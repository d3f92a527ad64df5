//! Interactive menu session.
//!
//! The session reads one line per prompt from any `BufRead` and writes to any
//! `Write`, so it can be driven by a terminal, a pipe or a test buffer. End of
//! input at any prompt ends the session; every change has already been saved
//! by then.
//!
//! Errors from an action are printed and the main menu comes back. Invalid
//! field input is re-prompted in place. "B" at the category or product step
//! goes back one level and drops what was entered so far.

use super::print::{
    write_categories, write_messages, write_products, write_record_detail, write_records,
    write_summary,
};
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use stockz::api::{CmdResult, SearchQuery, StockzApi};
use stockz::catalog::{CategoryRef, MAX_PRODUCTS_PER_CUSTOM};
use stockz::date::StockDate;
use stockz::error::Result;
use stockz::inventory::{NewStock, ProductChoice, MAX_BATCH_QUANTITY};
use stockz::model::validate_price;
use stockz::records::RecordUpdate;
use stockz::sort::{SortAlgorithm, SortField, SortOrder, SortSpec};
use stockz::store::DataStore;

const RULE: &str = "==============================================================";
const THIN_RULE: &str = "--------------------------------------------------------------";

/// `Ok(None)` from any step means the input ended.
type Step<T> = Result<Option<T>>;

enum Pick<T> {
    Back,
    Picked(T),
}

pub struct Session<'a, S: DataStore, R: BufRead, W: Write> {
    api: &'a mut StockzApi<S>,
    input: R,
    out: W,
    report_dir: PathBuf,
    terminal: bool,
    unsaved: bool,
}

impl<'a, S: DataStore, R: BufRead, W: Write> Session<'a, S, R, W> {
    pub fn new(api: &'a mut StockzApi<S>, input: R, out: W, report_dir: PathBuf) -> Self {
        Self {
            api,
            input,
            out,
            report_dir,
            terminal: false,
            unsaved: false,
        }
    }

    /// On a terminal the session pauses after each action and clears the screen.
    pub fn on_terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    pub fn run(&mut self) -> Result<()> {
        self.clear()?;
        writeln!(self.out, "{}", RULE)?;
        writeln!(self.out, "{}", format!("{:^62}", "STOCKZ INVENTORY").bold())?;
        writeln!(self.out, "{}", RULE)?;

        loop {
            self.main_menu()?;
            let Some(choice) = self.prompt(">>> Enter your choice (1-9): ")? else {
                break;
            };
            let outcome = match choice.as_str() {
                "1" => self.insert(),
                "2" => self.show_all(),
                "3" => self.search(),
                "4" => self.update(),
                "5" => self.delete(),
                "6" => self.sort(),
                "7" => self.create_category(),
                "8" => self.export_report(),
                "9" | "q" | "Q" => break,
                _ => self
                    .error("Invalid choice! Please select 1-9.")
                    .map(|_| Some(())),
            };
            match outcome {
                Ok(Some(())) => {}
                Ok(None) => break,
                Err(e) if e.is_user_error() => self.error(&e.to_string())?,
                Err(e) => {
                    log::error!("Action failed: {}", e);
                    self.error(&e.to_string())?;
                    writeln!(self.out, "{}", "The inventory in memory is unchanged.".yellow())?;
                }
            }
            if !self.pause()? {
                break;
            }
        }

        if self.unsaved {
            writeln!(
                self.out,
                "\n{}",
                "Some changes could not be saved to disk. Goodbye.".red()
            )?;
        } else {
            writeln!(self.out, "\nAll changes are saved. Goodbye.")?;
        }
        Ok(())
    }

    fn main_menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", RULE)?;
        writeln!(self.out, "{:^62}", "MAIN MENU")?;
        writeln!(self.out, "{}", RULE)?;
        for line in [
            "1. Insert New Record",
            "2. Display All Records",
            "3. Search Records",
            "4. Update Record",
            "5. Delete Record",
            "6. Sort Records",
            "7. Create Category",
            "8. Export Report",
            "9. Exit",
        ] {
            writeln!(self.out, "  {}", line)?;
        }
        writeln!(self.out, "{}", RULE)?;
        Ok(())
    }

    // --- Actions ---

    fn insert(&mut self) -> Step<()> {
        loop {
            self.heading("INSERT NEW RECORD")?;
            let category = match self.choose_category()? {
                None => return Ok(None),
                Some(Pick::Back) => return Ok(Some(())),
                Some(Pick::Picked(category)) => category,
            };
            let product = match self.choose_product(category)? {
                None => return Ok(None),
                Some(Pick::Back) => continue,
                Some(Pick::Picked(product)) => product,
            };

            let quantity_label = format!("Enter quantity to add (1-{}): ", MAX_BATCH_QUANTITY);
            let Some(quantity) = self.ask(&quantity_label, |s| match s.parse::<usize>() {
                Ok(n) if (1..=MAX_BATCH_QUANTITY).contains(&n) => Ok(n),
                _ => Err(format!("Quantity must be between 1 and {}!", MAX_BATCH_QUANTITY)),
            })?
            else {
                return Ok(None);
            };
            let Some(price) = self.ask("Enter Price ($): ", parse_price)? else {
                return Ok(None);
            };
            let Some(date) = self.ask("Enter Date (DD/MM/YYYY): ", parse_date)? else {
                return Ok(None);
            };

            let stock = NewStock {
                category,
                product,
                price,
                date,
                quantity,
            };
            let result = self.api.add_stock(&stock)?;
            self.show(&result)?;

            let Some(again) = self.prompt("Add more items? (y/N): ")? else {
                return Ok(None);
            };
            if !again.eq_ignore_ascii_case("y") {
                return Ok(Some(()));
            }
        }
    }

    fn choose_category(&mut self) -> Step<Pick<CategoryRef>> {
        loop {
            writeln!(self.out, "{}", THIN_RULE)?;
            writeln!(self.out, "{:^62}", "SELECT CATEGORY")?;
            writeln!(self.out, "{}", THIN_RULE)?;
            let categories = self.api.inventory().list_categories();
            write_categories(&mut self.out, &categories)?;
            writeln!(self.out, "   C. Create New Category")?;
            writeln!(self.out, "   B. Back to Main Menu")?;

            loop {
                let label = format!(
                    "Select category (1-{}, C to create, B to go back): ",
                    categories.len()
                );
                let Some(input) = self.prompt(&label)? else {
                    return Ok(None);
                };
                if input.eq_ignore_ascii_case("b") {
                    return Ok(Some(Pick::Back));
                }
                if input.eq_ignore_ascii_case("c") {
                    if let Err(e) = self.create_category_inner() {
                        self.error(&e.to_string())?;
                    }
                    break;
                }
                match self.api.resolve_category(&input) {
                    Ok(category) => return Ok(Some(Pick::Picked(category))),
                    Err(_) => self.error("Invalid choice! Please try again.")?,
                }
            }
        }
    }

    fn choose_product(&mut self, category: CategoryRef) -> Step<Pick<ProductChoice>> {
        let products = self.api.inventory().products_of(category)?;
        writeln!(self.out, "{}", THIN_RULE)?;
        writeln!(self.out, "{:^62}", "SELECT PRODUCT")?;
        writeln!(self.out, "{}", THIN_RULE)?;

        if products.is_empty() {
            writeln!(self.out, "  (No products defined - enter a product name)")?;
            loop {
                let Some(input) = self.prompt("Product name (B to go back): ")? else {
                    return Ok(None);
                };
                if input.eq_ignore_ascii_case("b") {
                    return Ok(Some(Pick::Back));
                }
                if input.is_empty() {
                    self.error("Product name cannot be empty!")?;
                    continue;
                }
                return Ok(Some(Pick::Picked(ProductChoice::Named(input))));
            }
        }

        write_products(&mut self.out, &products)?;
        writeln!(self.out, "   B. Back to Category Menu")?;
        let label = format!("Select product (1-{}, B to go back): ", products.len());
        loop {
            let Some(input) = self.prompt(&label)? else {
                return Ok(None);
            };
            if input.eq_ignore_ascii_case("b") {
                return Ok(Some(Pick::Back));
            }
            match input.parse::<usize>() {
                Ok(n) if (1..=products.len()).contains(&n) => {
                    return Ok(Some(Pick::Picked(ProductChoice::Listed(n))))
                }
                _ => self.error("Invalid choice! Please try again.")?,
            }
        }
    }

    fn show_all(&mut self) -> Step<()> {
        self.heading("ALL RECORDS")?;
        let result = self.api.list()?;
        write_records(&mut self.out, &result.listed_records)?;
        if let Some(summary) = &result.summary {
            write_summary(&mut self.out, summary)?;
        }
        Ok(Some(()))
    }

    fn search(&mut self) -> Step<()> {
        self.heading("SEARCH RECORDS")?;
        for line in [
            "1. By ID",
            "2. By Date",
            "3. By Product Name",
            "4. By Category",
            "5. Back to Main Menu",
        ] {
            writeln!(self.out, "  {}", line)?;
        }
        let Some(choice) = self.ask("Enter your choice (1-5): ", |s| match s.parse::<u8>() {
            Ok(n) if (1..=5).contains(&n) => Ok(n),
            _ => Err("Invalid choice! Please select 1-5.".to_string()),
        })?
        else {
            return Ok(None);
        };

        let query = match choice {
            1 => self.ask("Enter Product ID: ", parse_id)?.map(SearchQuery::Id),
            2 => self
                .ask("Enter Date (DD/MM/YYYY): ", parse_date)?
                .map(SearchQuery::Date),
            3 => self
                .ask("Enter part of the product name: ", non_empty)?
                .map(SearchQuery::Name),
            4 => self.ask("Enter category: ", non_empty)?.map(SearchQuery::Category),
            _ => return Ok(Some(())),
        };
        let Some(query) = query else {
            return Ok(None);
        };

        let result = self.api.search(&query)?;
        match (&query, result.listed_records.first()) {
            (SearchQuery::Id(_), Some(record)) => {
                writeln!(self.out, "\n{}", "Record Found!".green())?;
                write_record_detail(&mut self.out, record)?;
            }
            _ if result.listed_records.is_empty() => {}
            _ => write_records(&mut self.out, &result.listed_records)?,
        }
        write_messages(&mut self.out, &result.messages)?;
        Ok(Some(()))
    }

    fn update(&mut self) -> Step<()> {
        self.heading("UPDATE RECORD")?;
        let Some(id) = self.ask("Enter Product ID to update: ", parse_id)? else {
            return Ok(None);
        };
        let current = self.api.search(&SearchQuery::Id(id))?;
        if let Some(record) = current.listed_records.first() {
            write_record_detail(&mut self.out, record)?;
        }

        let Some(price) = self.ask("New price (blank to keep): ", |s| {
            if s.is_empty() {
                Ok(None)
            } else {
                parse_price(s).map(Some)
            }
        })?
        else {
            return Ok(None);
        };
        let Some(date) = self.ask("New date DD/MM/YYYY (blank to keep): ", |s| {
            if s.is_empty() {
                Ok(None)
            } else {
                parse_date(s).map(Some)
            }
        })?
        else {
            return Ok(None);
        };

        let result = self.api.update(id, &RecordUpdate { price, date })?;
        self.show(&result)?;
        Ok(Some(()))
    }

    fn delete(&mut self) -> Step<()> {
        self.heading("DELETE RECORD")?;
        let Some(id) = self.ask("Enter Product ID to delete: ", parse_id)? else {
            return Ok(None);
        };
        let current = self.api.search(&SearchQuery::Id(id))?;
        if let Some(record) = current.listed_records.first() {
            write_record_detail(&mut self.out, record)?;
        }
        let Some(answer) = self.prompt("Delete this record? (y/N): ")? else {
            return Ok(None);
        };
        if !answer.eq_ignore_ascii_case("y") {
            writeln!(self.out, "{}", "Delete cancelled.".dimmed())?;
            return Ok(Some(()));
        }
        let result = self.api.delete(id)?;
        self.show(&result)?;
        Ok(Some(()))
    }

    fn sort(&mut self) -> Step<()> {
        loop {
            self.heading("SORT MENU")?;
            for line in [
                "1. Ascending",
                "2. Descending",
                "3. Resort (reapply last sort)",
                "4. Back to Main Menu",
            ] {
                writeln!(self.out, "  {}", line)?;
            }
            let Some(choice) = self.ask("Enter your choice (1-4): ", |s| match s.parse::<u8>() {
                Ok(n) if (1..=4).contains(&n) => Ok(n),
                _ => Err("Invalid choice! Please select 1-4.".to_string()),
            })?
            else {
                return Ok(None);
            };

            let order = match choice {
                1 => SortOrder::Ascending,
                2 => SortOrder::Descending,
                3 => {
                    let result = self.api.resort()?;
                    self.show_sorted(&result)?;
                    return Ok(Some(()));
                }
                _ => return Ok(Some(())),
            };

            let title = match order {
                SortOrder::Ascending => "ASCENDING SORT OPTIONS",
                SortOrder::Descending => "DESCENDING SORT OPTIONS",
            };
            writeln!(self.out, "{}", THIN_RULE)?;
            writeln!(self.out, "{:^62}", title)?;
            writeln!(self.out, "{}", THIN_RULE)?;
            for line in [
                "1. Sort by Price (Bubble Sort)",
                "2. Sort by Price (Selection Sort)",
                "3. Sort by ID (Bubble Sort)",
                "4. Sort by ID (Selection Sort)",
                "5. Sort by Date (Bubble Sort)",
                "6. Sort by Date (Selection Sort)",
                "7. Back to Sort Menu",
            ] {
                writeln!(self.out, "  {}", line)?;
            }
            let Some(option) = self.ask("Enter your choice (1-7): ", |s| match s.parse::<u8>() {
                Ok(n) if (1..=7).contains(&n) => Ok(n),
                _ => Err("Invalid choice! Please select 1-7.".to_string()),
            })?
            else {
                return Ok(None);
            };
            if option == 7 {
                continue;
            }

            let field = match option {
                1 | 2 => SortField::Price,
                3 | 4 => SortField::Id,
                _ => SortField::Date,
            };
            let algorithm = if option % 2 == 1 {
                SortAlgorithm::Bubble
            } else {
                SortAlgorithm::Selection
            };
            let result = self.api.sort(SortSpec::new(field, algorithm, order))?;
            self.show_sorted(&result)?;
            return Ok(Some(()));
        }
    }

    fn create_category(&mut self) -> Step<()> {
        self.heading("CREATE CATEGORY")?;
        self.create_category_inner()
    }

    fn create_category_inner(&mut self) -> Step<()> {
        let Some(name) = self.ask("Enter new category name: ", non_empty)? else {
            return Ok(None);
        };
        let count_label = format!(
            "How many products to add for '{}' (0-{}): ",
            name, MAX_PRODUCTS_PER_CUSTOM
        );
        let Some(count) = self.ask(&count_label, |s| match s.parse::<usize>() {
            Ok(n) if n <= MAX_PRODUCTS_PER_CUSTOM => Ok(n),
            _ => Err(format!(
                "Enter a number between 0 and {}.",
                MAX_PRODUCTS_PER_CUSTOM
            )),
        })?
        else {
            return Ok(None);
        };

        let mut products = Vec::with_capacity(count);
        for i in 0..count {
            let Some(product) = self.prompt(&format!("Enter name for product {}: ", i + 1))? else {
                return Ok(None);
            };
            if product.is_empty() {
                writeln!(self.out, "{}", "Empty name - skipping.".yellow())?;
                continue;
            }
            products.push(product);
        }

        let result = self.api.create_category(&name, &products)?;
        self.show(&result)?;
        Ok(Some(()))
    }

    fn export_report(&mut self) -> Step<()> {
        let dir = self.report_dir.clone();
        let result = self.api.export_report(&dir)?;
        write_messages(&mut self.out, &result.messages)?;
        Ok(Some(()))
    }

    // --- Helpers ---

    /// Prints the messages of a mutating action and remembers failed saves.
    fn show(&mut self, result: &CmdResult) -> Result<()> {
        self.unsaved |= result.has_errors();
        write_messages(&mut self.out, &result.messages)?;
        Ok(())
    }

    fn show_sorted(&mut self, result: &CmdResult) -> Result<()> {
        self.show(result)?;
        write_records(&mut self.out, &result.listed_records)?;
        Ok(())
    }

    fn heading(&mut self, title: &str) -> Result<()> {
        writeln!(self.out, "\n{}", RULE)?;
        writeln!(self.out, "{}", format!("{:^62}", title).bold())?;
        writeln!(self.out, "{}", RULE)?;
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{} {}", "[ERROR]".red().bold(), message)?;
        Ok(())
    }

    /// Writes `label` and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompts until `parse` accepts the input.
    fn ask<T, F>(&mut self, label: &str, parse: F) -> Step<T>
    where
        F: Fn(&str) -> std::result::Result<T, String>,
    {
        loop {
            let Some(line) = self.prompt(label)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(message) => self.error(&message)?,
            }
        }
    }

    /// Waits for Enter and clears the screen, on a terminal only. Returns
    /// false when the input ended.
    fn pause(&mut self) -> Result<bool> {
        if !self.terminal {
            return Ok(true);
        }
        if self.prompt("\nPress Enter to return to main menu...")?.is_none() {
            return Ok(false);
        }
        self.clear()?;
        Ok(true)
    }

    fn clear(&mut self) -> Result<()> {
        if self.terminal {
            console::Term::stdout().clear_screen()?;
        }
        Ok(())
    }
}

fn parse_id(s: &str) -> std::result::Result<u32, String> {
    s.parse::<u32>()
        .map_err(|_| "Invalid ID format!".to_string())
}

fn parse_price(s: &str) -> std::result::Result<f64, String> {
    let price: f64 = s
        .trim_start_matches('$')
        .parse()
        .map_err(|_| "Invalid price format!".to_string())?;
    validate_price(price).map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> std::result::Result<StockDate, String> {
    StockDate::parse(s).map_err(|e| e.to_string())
}

fn non_empty(s: &str) -> std::result::Result<String, String> {
    if s.is_empty() {
        Err("Input cannot be empty!".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockz::config::StockzConfig;
    use stockz::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn api(seed: bool) -> StockzApi<InMemoryStore> {
        let config = StockzConfig {
            seed_sample_data: seed,
            ..StockzConfig::default()
        };
        StockzApi::open(InMemoryStore::new(), &config).unwrap().0
    }

    fn drive(api: &mut StockzApi<InMemoryStore>, script: &str) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        Session::new(api, script.as_bytes(), &mut out, std::env::temp_dir())
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn ids(api: &StockzApi<InMemoryStore>) -> Vec<u32> {
        api.inventory().records().records().iter().map(|r| r.id).collect()
    }

    #[test]
    fn insert_batch_through_menus() {
        let mut api = api(false);
        let out = drive(&mut api, "1\n1\n3\n2\n999\n15/01/2024\nn\n9\n");
        assert_eq!(ids(&api), vec![1001, 1002]);
        assert!(out.contains("Added iPhone 15 (ID: 1001)"));
        assert!(out.contains("Goodbye"));
    }

    #[test]
    fn bad_field_input_is_reprompted() {
        let mut api = api(false);
        let out = drive(&mut api, "1\n2\n1\n9\n1\n-5\nabc\n1299\n31/02/2024\n20/01/2024\nn\n9\n");
        assert!(out.contains("Quantity must be between 1 and 5!"));
        assert!(out.contains("Invalid price format!"));
        assert!(out.contains("Invalid price"));
        assert!(out.contains("Invalid date"));
        assert_eq!(ids(&api), vec![2001]);
    }

    #[test]
    fn back_from_product_returns_to_categories() {
        let mut api = api(false);
        drive(&mut api, "1\n1\nb\n5\n3\n1\n249\n05/02/2024\nn\n9\n");
        assert_eq!(ids(&api), vec![5001]);
        assert_eq!(
            api.inventory().records().records()[0].product_name,
            "Watch SE"
        );
    }

    #[test]
    fn back_from_categories_returns_to_main_menu() {
        let mut api = api(false);
        let out = drive(&mut api, "1\nb\n2\n9\n");
        assert!(out.contains("No records found."));
        assert!(ids(&api).is_empty());
    }

    #[test]
    fn create_category_inline_then_add_free_text_product() {
        let mut api = api(false);
        let script = "1\nc\nAccessories\n0\n6\nMagSafe Charger\n1\n39\n01/03/2024\nn\n9\n";
        drive(&mut api, script);
        let record = &api.inventory().records().records()[0];
        assert_eq!(record.id, 6001);
        assert_eq!(record.category, "Accessories");
        assert_eq!(record.product_name, "MagSafe Charger");
    }

    #[test]
    fn sort_descending_by_price_with_selection() {
        let mut api = api(false);
        drive(
            &mut api,
            "1\n1\n2\n2\n999\n15/01/2024\ny\n2\n1\n1\n1999\n20/01/2024\nn\n9\n",
        );
        assert_eq!(ids(&api), vec![1001, 1002, 2001]);

        let out = drive(&mut api, "6\n2\n2\n9\n");
        assert!(out.contains("Price (Descending, Selection Sort)"));
        assert_eq!(ids(&api), vec![2001, 1002, 1001]);

        drive(&mut api, "6\n3\n9\n");
        assert_eq!(ids(&api), vec![2001, 1002, 1001]);
    }

    #[test]
    fn resort_without_prior_sort_reports_error() {
        let mut api = api(true);
        let out = drive(&mut api, "6\n3\n9\n");
        assert!(out.contains("[ERROR] No previous sort to reapply"));
    }

    #[test]
    fn search_update_delete() {
        let mut api = api(true);
        let out = drive(&mut api, "3\n1\n3001\n9\n");
        assert!(out.contains("iPad Pro M2"));

        drive(&mut api, "4\n3001\n1049.50\n\n9\n");
        let record = api.inventory().records().find_by_id(3001).unwrap();
        assert_eq!(record.price, 1049.5);
        assert_eq!(record.date.to_string(), "25/01/2024");

        drive(&mut api, "5\n3001\ny\n9\n");
        assert!(api.inventory().records().find_by_id(3001).is_none());

        let out = drive(&mut api, "5\n3001\n9\n");
        assert!(out.contains("Record with ID 3001 not found"));
    }

    #[test]
    fn report_goes_to_report_dir() {
        colored::control::set_override(false);
        let dir = TempDir::new().unwrap();
        let mut api = api(true);
        let mut out = Vec::new();
        Session::new(&mut api, "8\n9\n".as_bytes(), &mut out, dir.path().to_path_buf())
            .run()
            .unwrap();
        let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(written.len(), 1);
    }

    #[test]
    fn end_of_input_ends_session() {
        let mut api = api(false);
        let out = drive(&mut api, "1\n1\n");
        assert!(out.contains("Goodbye"));
    }

    #[test]
    fn failed_report_write_keeps_session_running() {
        colored::control::set_override(false);
        let dir = TempDir::new().unwrap();
        let blocked = dir.path().join("not-a-dir");
        std::fs::write(&blocked, "").unwrap();
        let mut api = api(true);
        let mut out = Vec::new();
        Session::new(&mut api, "8\n2\n9\n".as_bytes(), &mut out, blocked)
            .run()
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("[ERROR] IO error"));
        assert!(out.contains("The inventory in memory is unchanged."));
        assert!(out.contains("Total Records: 10"));
    }

    #[test]
    fn failed_save_is_reported_on_exit() {
        let mut store = InMemoryStore::new();
        store.simulate_write_error(true);
        let config = StockzConfig {
            seed_sample_data: false,
            ..StockzConfig::default()
        };
        let mut api = StockzApi::open(store, &config).unwrap().0;
        let out = drive(&mut api, "1\n1\n3\n1\n799\n15/01/2024\nn\n9\n");
        assert_eq!(ids(&api), vec![1001]);
        assert!(out.contains("could not be saved"));
        assert!(out.contains("Some changes could not be saved to disk. Goodbye."));
        assert!(!out.contains("All changes are saved"));
    }
}
