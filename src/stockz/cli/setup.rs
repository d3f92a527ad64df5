use clap::{Args, Parser, Subcommand, ValueEnum};
use once_cell::sync::Lazy;
use std::path::PathBuf;
use stockz::api::SearchQuery;
use stockz::date::StockDate;
use stockz::error::StockzError;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    static VERSION_STRING: Lazy<String> = Lazy::new(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    });

    VERSION_STRING.as_str()
}

#[derive(Parser, Debug)]
#[command(name = "stockz", bin_name = "stockz", version = get_version())]
#[command(about = "Stock inventory for a small electronics store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $STOCKZ_HOME, then the platform data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive menu (the default)
    Shell,

    /// Add one or more identical items
    Add {
        /// Category menu number or name
        #[arg(short, long)]
        category: String,

        /// Product number from `stockz products <category>`
        #[arg(short, long, conflicts_with = "name")]
        product: Option<usize>,

        /// Product name, for categories without predefined products
        #[arg(long)]
        name: Option<String>,

        /// Price per item
        #[arg(long, allow_negative_numbers = true)]
        price: f64,

        /// Purchase date (DD/MM/YYYY)
        #[arg(long)]
        date: String,

        /// Number of items (1-5), each gets its own ID
        #[arg(short, long, default_value_t = 1)]
        quantity: usize,
    },

    /// Show all records
    #[command(alias = "ls")]
    List,

    /// Search records
    Find(FindArgs),

    /// Change the price and/or date of a record
    Update {
        id: u32,

        #[arg(long, allow_negative_numbers = true)]
        price: Option<f64>,

        /// New date (DD/MM/YYYY)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete { id: u32 },

    /// Sort the records
    Sort {
        field: SortKey,

        /// Sort in descending order
        #[arg(long)]
        desc: bool,

        /// Use selection sort (default: bubble for ascending, selection for descending)
        #[arg(long, conflicts_with = "bubble")]
        selection: bool,

        /// Use bubble sort
        #[arg(long)]
        bubble: bool,
    },

    /// Repeat the last sort
    Resort,

    /// List categories
    Categories,

    /// List the products of a category
    Products {
        /// Category menu number or name
        category: String,
    },

    /// Create a custom category
    CategoryCreate {
        name: String,

        /// Predefined products for the new category
        products: Vec<String>,
    },

    /// Export a stock report
    Report {
        /// Directory to write the report into (default: data directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct FindArgs {
    #[arg(long)]
    pub id: Option<u32>,

    /// Exact date (DD/MM/YYYY)
    #[arg(long)]
    pub date: Option<String>,

    /// Part of the product name, case-insensitive
    #[arg(long)]
    pub name: Option<String>,

    /// Category name, case-insensitive
    #[arg(long)]
    pub category: Option<String>,
}

impl TryFrom<FindArgs> for SearchQuery {
    type Error = StockzError;

    fn try_from(args: FindArgs) -> Result<Self, Self::Error> {
        match args {
            FindArgs { id: Some(id), .. } => Ok(SearchQuery::Id(id)),
            FindArgs { date: Some(date), .. } => Ok(SearchQuery::Date(StockDate::parse(&date)?)),
            FindArgs { name: Some(name), .. } => Ok(SearchQuery::Name(name)),
            FindArgs {
                category: Some(category),
                ..
            } => Ok(SearchQuery::Category(category)),
            _ => Err(StockzError::InvalidName(
                "give one of --id, --date, --name or --category".to_string(),
            )),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Price,
    Id,
    Date,
}
