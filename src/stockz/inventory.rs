//! # Inventory
//!
//! The single owned aggregate behind every operation: the record store, the
//! category catalog and the sort memory. It is built once at startup from
//! whatever the [`DataStore`](crate::store::DataStore) returns and handed by
//! reference to the command layer.
//!
//! The inventory knows nothing about persistence. Commands mutate it and then
//! write the full record set back through the store.

use crate::catalog::{CategoryCatalog, CategoryEntry, CategoryRef, CustomCategory};
use crate::date::StockDate;
use crate::error::{Result, StockzError};
use crate::ids;
use crate::model::{truncate_chars, validate_name, validate_price, Record, MAX_PRODUCT_NAME};
use crate::records::{RecordStore, RecordUpdate};
use crate::sort::{self, SortSpec};
use serde::{Deserialize, Serialize};

/// Largest number of identical items added in one go.
pub const MAX_BATCH_QUANTITY: usize = 5;

/// Everything besides the records that survives between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub custom_categories: Vec<CustomCategory>,
    #[serde(default)]
    pub last_sort: Option<SortSpec>,
}

/// How the product of a new stock entry is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductChoice {
    /// 1-based position in the category's product list.
    Listed(usize),
    /// Free text, for categories without predefined products.
    Named(String),
}

/// A request to add `quantity` identical items of one product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStock {
    pub category: CategoryRef,
    pub product: ProductChoice,
    pub price: f64,
    pub date: StockDate,
    pub quantity: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    records: RecordStore,
    catalog: CategoryCatalog,
    last_sort: Option<SortSpec>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(records: Vec<Record>, state: SessionState) -> Self {
        Self {
            records: RecordStore::from_records(records),
            catalog: CategoryCatalog::with_custom(state.custom_categories),
            last_sort: state.last_sort,
        }
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            custom_categories: self.catalog.custom().to_vec(),
            last_sort: self.last_sort,
        }
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn last_sort(&self) -> Option<SortSpec> {
        self.last_sort
    }

    pub fn list_categories(&self) -> Vec<CategoryEntry> {
        self.catalog.list_categories()
    }

    pub fn products_of(&self, category: CategoryRef) -> Result<Vec<String>> {
        self.catalog.products_of(category)
    }

    pub fn create_category<P: AsRef<str>>(
        &mut self,
        name: &str,
        products: &[P],
    ) -> Result<CategoryRef> {
        self.catalog.create_category(name, products)
    }

    pub fn next_id(&self, category: CategoryRef) -> Result<u32> {
        ids::next_id(&self.catalog, self.records.records(), category)
    }

    pub fn insert(&mut self, record: Record) -> Result<()> {
        self.records.insert(record)
    }

    /// Adds `quantity` records for one product, each with its own ID from the
    /// category band. The whole batch is validated first, so either every
    /// record is committed or none is.
    pub fn add_stock(&mut self, stock: &NewStock) -> Result<Vec<Record>> {
        if stock.quantity == 0 || stock.quantity > MAX_BATCH_QUANTITY {
            return Err(StockzError::InvalidQuantity {
                got: stock.quantity,
                max: MAX_BATCH_QUANTITY,
            });
        }
        let product_name = self.resolve_product(stock.category, &stock.product)?;
        let price = validate_price(stock.price)?;
        if self.records.remaining_capacity() < stock.quantity {
            return Err(StockzError::CapacityExceeded(format!(
                "only {} more record(s) fit in the store",
                self.records.remaining_capacity()
            )));
        }

        let category_name = self.catalog.name(stock.category).to_string();
        let ids = ids::allocate(
            &self.catalog,
            self.records.records(),
            stock.category,
            stock.quantity,
        )?;

        let mut added = Vec::with_capacity(ids.len());
        for id in ids {
            let record = Record::new(id, product_name.clone(), price, stock.date, category_name.clone());
            self.records.insert(record.clone())?;
            added.push(record);
        }
        Ok(added)
    }

    fn resolve_product(&self, category: CategoryRef, choice: &ProductChoice) -> Result<String> {
        let products = self.catalog.products_of(category)?;
        match choice {
            ProductChoice::Listed(n) => products
                .get(n.wrapping_sub(1))
                .cloned()
                .ok_or_else(|| {
                    StockzError::InvalidName(format!(
                        "product {} is not listed for '{}'",
                        n,
                        self.catalog.name(category)
                    ))
                }),
            ProductChoice::Named(_) if !products.is_empty() => Err(StockzError::InvalidName(
                format!(
                    "'{}' has predefined products, pick one by number",
                    self.catalog.name(category)
                ),
            )),
            ProductChoice::Named(name) => {
                let name = validate_name(name, "Product name")?;
                Ok(truncate_chars(&name, MAX_PRODUCT_NAME))
            }
        }
    }

    pub fn update(&mut self, id: u32, update: &RecordUpdate) -> Result<bool> {
        self.records.update(id, update)
    }

    pub fn delete(&mut self, id: u32) -> Result<Record> {
        self.records.delete(id)
    }

    pub fn sort(&mut self, spec: SortSpec) {
        sort::apply(spec, self.records.records_mut());
        self.last_sort = Some(spec);
    }

    pub fn repeat_last_sort(&mut self) -> Result<SortSpec> {
        let spec = self.last_sort.ok_or(StockzError::NoPriorSort)?;
        self.sort(spec);
        Ok(spec)
    }

    /// Appends the built-in sample records whose IDs are still free.
    /// Returns how many were added.
    pub fn seed_samples(&mut self) -> usize {
        let mut added = 0;
        for record in sample_records() {
            if self.records.insert(record).is_ok() {
                added += 1;
            }
        }
        added
    }
}

/// Two sample items for each built-in category.
pub fn sample_records() -> Vec<Record> {
    let samples: [(u32, &str, f64, &str, &str); 10] = [
        (1001, "iPhone 15 Pro", 999.00, "15/01/2024", "iPhones"),
        (1002, "iPhone 15", 799.00, "15/01/2024", "iPhones"),
        (2001, "MacBook Pro M3", 1999.00, "20/01/2024", "MacBooks"),
        (2002, "MacBook Air M2", 1299.00, "20/01/2024", "MacBooks"),
        (3001, "iPad Pro M2", 1099.00, "25/01/2024", "iPads"),
        (3002, "iPad Air M1", 599.00, "25/01/2024", "iPads"),
        (4001, "AirPods Pro 2", 249.00, "30/01/2024", "AirPods"),
        (4002, "AirPods 3", 179.00, "30/01/2024", "AirPods"),
        (5001, "Watch Series 9", 399.00, "05/02/2024", "iWatch"),
        (5002, "Watch SE", 249.00, "05/02/2024", "iWatch"),
    ];
    samples
        .iter()
        .filter_map(|&(id, name, price, date, category)| {
            StockDate::parse(date)
                .ok()
                .map(|d| Record::new(id, name, price, d, category))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MAX_RECORDS;

    fn date(s: &str) -> StockDate {
        StockDate::parse(s).unwrap()
    }

    fn iphones(product: usize, price: f64, quantity: usize) -> NewStock {
        NewStock {
            category: CategoryRef::Builtin(0),
            product: ProductChoice::Listed(product),
            price,
            date: date("15/01/2024"),
            quantity,
        }
    }

    fn ids(inv: &Inventory) -> Vec<u32> {
        inv.records().records().iter().map(|r| r.id).collect()
    }

    #[test]
    fn batch_insert_allocates_consecutive_ids() {
        let mut inv = Inventory::new();
        let added = inv.add_stock(&iphones(3, 999.0, 2)).unwrap();
        assert_eq!(added.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1001, 1002]);
        assert!(added.iter().all(|r| r.category == "iPhones"));
        assert!(added.iter().all(|r| r.product_name == "iPhone 15"));
        assert_eq!(inv.next_id(CategoryRef::Builtin(0)).unwrap(), 1003);
    }

    #[test]
    fn price_descending_scenario() {
        let mut inv = Inventory::new();
        inv.add_stock(&iphones(2, 999.0, 2)).unwrap();
        inv.insert(Record::new(2001, "MacBook Pro M3", 1999.0, date("20/01/2024"), "MacBooks"))
            .unwrap();

        inv.sort(SortSpec::price_descending());
        assert_eq!(ids(&inv), vec![2001, 1002, 1001]);
        assert_eq!(inv.last_sort(), Some(SortSpec::price_descending()));
    }

    #[test]
    fn bands_follow_ids_not_labels() {
        // A hand-edited file put 1005 under another label; it still occupies
        // the iPhones band.
        let mut inv = Inventory::from_parts(
            vec![
                Record::new(1001, "iPhone 15", 1.0, date("15/01/2024"), "iPhones"),
                Record::new(1005, "Watch SE", 1.0, date("15/01/2024"), "iWatch"),
            ],
            SessionState::default(),
        );
        let added = inv.add_stock(&iphones(1, 10.0, 2)).unwrap();
        assert_eq!(added.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1006, 1007]);
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let mut inv = Inventory::new();
        assert!(matches!(
            inv.add_stock(&iphones(1, 0.0, 2)),
            Err(StockzError::InvalidPrice(_))
        ));
        assert!(matches!(
            inv.add_stock(&iphones(9, 10.0, 2)),
            Err(StockzError::InvalidName(_))
        ));
        assert!(matches!(
            inv.add_stock(&iphones(1, 10.0, 0)),
            Err(StockzError::InvalidQuantity { got: 0, .. })
        ));
        assert!(matches!(
            inv.add_stock(&iphones(1, 10.0, 6)),
            Err(StockzError::InvalidQuantity { got: 6, .. })
        ));
        assert!(inv.records().is_empty());
    }

    #[test]
    fn batch_respects_store_capacity() {
        let records: Vec<Record> = (1..MAX_RECORDS as u32)
            .map(|id| Record::new(id, "Filler", 1.0, date("01/01/2024"), "Bulk"))
            .collect();
        let mut inv = Inventory::from_parts(records, SessionState::default());
        assert!(matches!(
            inv.add_stock(&iphones(1, 10.0, 2)),
            Err(StockzError::CapacityExceeded(_))
        ));
        assert_eq!(inv.add_stock(&iphones(1, 10.0, 1)).unwrap().len(), 1);
    }

    #[test]
    fn custom_category_without_products_takes_free_text() {
        let mut inv = Inventory::new();
        let empty: [&str; 0] = [];
        let cat = inv.create_category("Accessories", &empty).unwrap();
        assert_eq!(inv.next_id(cat).unwrap(), 6001);

        let stock = NewStock {
            category: cat,
            product: ProductChoice::Named("MagSafe Charger".into()),
            price: 39.0,
            date: date("01/03/2024"),
            quantity: 1,
        };
        let added = inv.add_stock(&stock).unwrap();
        assert_eq!(added[0].id, 6001);
        assert_eq!(added[0].product_name, "MagSafe Charger");
        assert_eq!(added[0].category, "Accessories");

        let listed = NewStock {
            product: ProductChoice::Listed(1),
            ..stock
        };
        assert!(inv.add_stock(&listed).is_err());
    }

    #[test]
    fn free_text_is_refused_when_products_are_listed() {
        let mut inv = Inventory::new();
        let stock = NewStock {
            product: ProductChoice::Named("iPhone 99".into()),
            ..iphones(1, 10.0, 1)
        };
        assert!(matches!(inv.add_stock(&stock), Err(StockzError::InvalidName(_))));
    }

    #[test]
    fn repeat_last_sort_needs_a_prior_sort() {
        let mut inv = Inventory::new();
        assert!(matches!(inv.repeat_last_sort(), Err(StockzError::NoPriorSort)));

        inv.add_stock(&iphones(1, 500.0, 1)).unwrap();
        inv.add_stock(&iphones(2, 100.0, 1)).unwrap();
        inv.sort(SortSpec::price_ascending());
        assert_eq!(ids(&inv), vec![1002, 1001]);

        inv.add_stock(&iphones(3, 50.0, 1)).unwrap();
        let replayed = inv.repeat_last_sort().unwrap();
        assert_eq!(replayed, SortSpec::price_ascending());
        assert_eq!(ids(&inv), vec![1003, 1002, 1001]);
    }

    #[test]
    fn state_round_trips_categories_and_sort() {
        let mut inv = Inventory::new();
        inv.create_category("Vision", &["Vision Pro"]).unwrap();
        inv.sort(SortSpec::date_descending());

        let state = inv.state();
        let json = serde_json::to_string(&state).unwrap();
        let parsed: SessionState = serde_json::from_str(&json).unwrap();
        let restored = Inventory::from_parts(Vec::new(), parsed);

        assert_eq!(restored.catalog().custom(), inv.catalog().custom());
        assert_eq!(restored.last_sort(), Some(SortSpec::date_descending()));
    }

    #[test]
    fn seeding_skips_taken_ids() {
        let mut inv = Inventory::from_parts(
            vec![Record::new(1001, "Mine", 5.0, date("01/01/2024"), "iPhones")],
            SessionState::default(),
        );
        assert_eq!(inv.seed_samples(), 9);
        assert_eq!(inv.records().find_by_id(1001).unwrap().product_name, "Mine");
        assert_eq!(inv.seed_samples(), 0);
    }
}
