//! # CLI Layer
//!
//! The CLI is **one client** of the stockz library. It is the only place that:
//! - Parses arguments
//! - Writes to stdout/stderr and reads stdin
//! - Decides exit codes
//!
//! ## Structure
//!
//! - `run()`: parses arguments, sets up logging and dispatches
//! - `init_context()`: resolves the data directory, loads config and opens the API
//! - `handle_*()`: one handler per subcommand, formatting the `CmdResult`
//!
//! Without a subcommand, or with `shell`, the interactive session starts.

use super::print::{
    write_categories, write_messages, write_products, write_record_detail, write_records,
    write_summary,
};
use super::session::Session;
use super::setup::{Cli, Commands, FindArgs, SortKey};
use clap::Parser;
use directories::ProjectDirs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use stockz::api::{CmdResult, SearchQuery, StockzApi};
use stockz::config::StockzConfig;
use stockz::date::StockDate;
use stockz::error::{Result, StockzError};
use stockz::inventory::{NewStock, ProductChoice};
use stockz::records::RecordUpdate;
use stockz::sort::{SortAlgorithm, SortField, SortOrder, SortSpec};
use stockz::store::fs::FileStore;

const HOME_ENV: &str = "STOCKZ_HOME";

struct AppContext {
    api: StockzApi<FileStore>,
    data_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !console::Term::stdout().is_term() {
        colored::control::set_override(false);
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        None | Some(Commands::Shell) => handle_shell(&mut ctx),
        Some(Commands::Add {
            category,
            product,
            name,
            price,
            date,
            quantity,
        }) => handle_add(&mut ctx, &category, product, name, price, &date, quantity),
        Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Find(args)) => handle_find(&ctx, args),
        Some(Commands::Update { id, price, date }) => handle_update(&mut ctx, id, price, date),
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, id),
        Some(Commands::Sort {
            field,
            desc,
            selection,
            bubble,
        }) => handle_sort(&mut ctx, field, desc, selection, bubble),
        Some(Commands::Resort) => handle_resort(&mut ctx),
        Some(Commands::Categories) => handle_categories(&ctx),
        Some(Commands::Products { category }) => handle_products(&ctx, &category),
        Some(Commands::CategoryCreate { name, products }) => {
            handle_category_create(&mut ctx, &name, &products)
        }
        Some(Commands::Report { out }) => handle_report(&ctx, out),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init();
}

/// `--data-dir`, then `$STOCKZ_HOME`, then the platform data directory.
fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("", "", "stockz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            StockzError::Store(format!(
                "Could not determine a data directory; pass --data-dir or set {}",
                HOME_ENV
            ))
        })
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    log::debug!("Using data directory {}", data_dir.display());

    let config = StockzConfig::load(&data_dir)?;
    let store = FileStore::new(data_dir.clone()).with_data_file(&config.data_file);
    let (api, startup) = StockzApi::open(store, &config)?;

    let mut stdout = io::stdout().lock();
    write_messages(&mut stdout, &startup.messages)?;

    Ok(AppContext { api, data_dir })
}

/// Prints the messages and turns a failed save into a failing exit status.
fn finish(result: &CmdResult) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_messages(&mut stdout, &result.messages)?;
    stdout.flush()?;
    if result.has_errors() {
        return Err(StockzError::Store("changes could not be saved".to_string()));
    }
    Ok(())
}

fn handle_shell(ctx: &mut AppContext) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let terminal = console::user_attended() && stdin.is_terminal();
    Session::new(&mut ctx.api, stdin.lock(), stdout.lock(), ctx.data_dir.clone())
        .on_terminal(terminal)
        .run()
}

fn handle_add(
    ctx: &mut AppContext,
    category: &str,
    product: Option<usize>,
    name: Option<String>,
    price: f64,
    date: &str,
    quantity: usize,
) -> Result<()> {
    let category = ctx.api.resolve_category(category)?;
    let product = match (product, name) {
        (Some(n), _) => ProductChoice::Listed(n),
        (None, Some(name)) => ProductChoice::Named(name),
        (None, None) => {
            return Err(StockzError::InvalidName(
                "choose a product with --product <n> or --name <text>".to_string(),
            ))
        }
    };
    let stock = NewStock {
        category,
        product,
        price,
        date: StockDate::parse(date)?,
        quantity,
    };
    let result = ctx.api.add_stock(&stock)?;
    finish(&result)
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list()?;
    let mut stdout = io::stdout().lock();
    write_records(&mut stdout, &result.listed_records)?;
    if let Some(summary) = &result.summary {
        write_summary(&mut stdout, summary)?;
    }
    Ok(())
}

fn handle_find(ctx: &AppContext, args: FindArgs) -> Result<()> {
    let query = SearchQuery::try_from(args)?;

    let result = ctx.api.search(&query)?;
    let mut stdout = io::stdout().lock();
    match (&query, result.listed_records.as_slice()) {
        (SearchQuery::Id(_), [record]) => write_record_detail(&mut stdout, record)?,
        (_, []) => {}
        (_, records) => write_records(&mut stdout, records)?,
    }
    write_messages(&mut stdout, &result.messages)?;
    Ok(())
}

fn handle_update(
    ctx: &mut AppContext,
    id: u32,
    price: Option<f64>,
    date: Option<String>,
) -> Result<()> {
    let update = RecordUpdate {
        price,
        date: date.as_deref().map(StockDate::parse).transpose()?,
    };
    let result = ctx.api.update(id, &update)?;
    if let Some(record) = result.affected_records.first() {
        write_record_detail(&mut io::stdout().lock(), record)?;
    }
    finish(&result)
}

fn handle_delete(ctx: &mut AppContext, id: u32) -> Result<()> {
    let result = ctx.api.delete(id)?;
    finish(&result)
}

fn handle_sort(
    ctx: &mut AppContext,
    key: SortKey,
    desc: bool,
    selection: bool,
    bubble: bool,
) -> Result<()> {
    let field = match key {
        SortKey::Price => SortField::Price,
        SortKey::Id => SortField::Id,
        SortKey::Date => SortField::Date,
    };
    let order = if desc {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    let algorithm = match (selection, bubble, order) {
        (true, _, _) => SortAlgorithm::Selection,
        (_, true, _) => SortAlgorithm::Bubble,
        (_, _, SortOrder::Ascending) => SortAlgorithm::Bubble,
        (_, _, SortOrder::Descending) => SortAlgorithm::Selection,
    };
    let result = ctx.api.sort(SortSpec::new(field, algorithm, order))?;
    write_records(&mut io::stdout().lock(), &result.listed_records)?;
    finish(&result)
}

fn handle_resort(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.resort()?;
    write_records(&mut io::stdout().lock(), &result.listed_records)?;
    finish(&result)
}

fn handle_categories(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.categories()?;
    write_categories(&mut io::stdout().lock(), &result.categories)?;
    Ok(())
}

fn handle_products(ctx: &AppContext, category: &str) -> Result<()> {
    let result = ctx.api.products(category)?;
    let mut stdout = io::stdout().lock();
    write_products(&mut stdout, &result.products)?;
    write_messages(&mut stdout, &result.messages)?;
    Ok(())
}

fn handle_category_create(ctx: &mut AppContext, name: &str, products: &[String]) -> Result<()> {
    let result = ctx.api.create_category(name, products)?;
    write_categories(&mut io::stdout().lock(), &result.categories)?;
    finish(&result)
}

fn handle_report(ctx: &AppContext, out: Option<PathBuf>) -> Result<()> {
    let dir = out.unwrap_or_else(|| ctx.data_dir.clone());
    let result = ctx.api.export_report(&dir)?;
    if let Some(summary) = &result.summary {
        write_summary(&mut io::stdout().lock(), summary)?;
    }
    finish(&result)
}
