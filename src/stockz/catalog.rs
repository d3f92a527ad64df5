//! # Category Catalog
//!
//! Categories come in two kinds:
//!
//! - **Built-in** categories with a fixed ID band and a fixed product list.
//! - **Custom** categories created at runtime, each with an optional product
//!   list. They are numbered after the built-ins in creation order.
//!
//! Callers never do index arithmetic themselves: a 1-based menu index or a
//! name is resolved once into a [`CategoryRef`], and every other lookup goes
//! through that handle.
//!
//! ## ID bands
//!
//! Every category owns a 1000-wide band of record IDs. With base `B` the band
//! is `B+1 ..= B+999`. Built-ins use the bases in [`BUILTINS`]; custom category
//! `k` (0-based) uses `CUSTOM_BASE + k * 1000`, so the first custom band starts
//! right after the last built-in one.

use crate::error::{Result, StockzError};
use crate::model::{truncate_chars, validate_name, MAX_PRODUCT_NAME, MAX_RECORD_CATEGORY};
use serde::{Deserialize, Serialize};

pub const MAX_CUSTOM_CATEGORIES: usize = 20;
pub const MAX_PRODUCTS_PER_CUSTOM: usize = 20;
/// Custom category names are cut to the width of the label stored on each
/// record, so a category and its records always carry the same name.
pub const MAX_CATEGORY_NAME: usize = MAX_RECORD_CATEGORY;
pub const BAND_WIDTH: u32 = 1000;
pub const CUSTOM_BASE: u32 = 6000;

#[derive(Debug)]
pub struct BuiltinCategory {
    pub name: &'static str,
    pub base_id: u32,
    pub products: &'static [&'static str],
}

pub static BUILTINS: &[BuiltinCategory] = &[
    BuiltinCategory {
        name: "iPhones",
        base_id: 1000,
        products: &[
            "iPhone 15 Pro Max",
            "iPhone 15 Pro",
            "iPhone 15",
            "iPhone 14 Pro",
            "iPhone 14",
        ],
    },
    BuiltinCategory {
        name: "MacBooks",
        base_id: 2000,
        products: &[
            "MacBook Pro M3",
            "MacBook Air M2",
            "MacBook Pro 16 M3",
            "MacBook Air 15 M2",
        ],
    },
    BuiltinCategory {
        name: "iPads",
        base_id: 3000,
        products: &["iPad Pro M2", "iPad Air M1", "iPad mini 6"],
    },
    BuiltinCategory {
        name: "AirPods",
        base_id: 4000,
        products: &["AirPods Pro 2", "AirPods 3", "AirPods Max"],
    },
    BuiltinCategory {
        name: "iWatch",
        base_id: 5000,
        products: &["Watch Series 9", "Watch Ultra 2", "Watch SE", "Watch Series 8"],
    },
];

/// A user-defined category as persisted in the session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCategory {
    pub name: String,
    #[serde(default)]
    pub products: Vec<String>,
    /// Base of the ID band. When absent in stored state the category's
    /// position decides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_id: Option<u32>,
}

/// A resolved category handle. The inner value is a 0-based position in the
/// built-in table or in the custom list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryRef {
    Builtin(usize),
    Custom(usize),
}

/// One line of the category menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    /// 1-based menu index.
    pub index: usize,
    pub name: String,
    pub category: CategoryRef,
    pub base_id: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    custom: Vec<CustomCategory>,
}

impl CategoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a catalog from persisted custom categories. Entries that would
    /// break the catalog invariants (duplicates, blank names, over the limit)
    /// are dropped. The survivors keep the band they were stored with, so a
    /// dropped entry never moves the records of the categories after it.
    pub fn with_custom(custom: Vec<CustomCategory>) -> Self {
        let mut catalog = Self::new();
        for (position, entry) in custom.into_iter().enumerate() {
            let stored_base = entry
                .base_id
                .unwrap_or(CUSTOM_BASE + position as u32 * BAND_WIDTH);
            let base = if catalog.base_is_free(stored_base) {
                stored_base
            } else {
                let next = catalog.next_free_base();
                log::error!(
                    "Stored category '{}' had IDs from {} which are unusable; it moves to {}",
                    entry.name,
                    stored_base + 1,
                    next + 1
                );
                next
            };
            if let Err(e) = catalog.push_custom(&entry.name, &entry.products, base) {
                log::warn!("Skipping stored category '{}': {}", entry.name, e);
            }
        }
        catalog
    }

    pub fn custom(&self) -> &[CustomCategory] {
        &self.custom
    }

    pub fn len(&self) -> usize {
        BUILTINS.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn list_categories(&self) -> Vec<CategoryEntry> {
        let builtins = (0..BUILTINS.len()).map(CategoryRef::Builtin);
        let custom = (0..self.custom.len()).map(CategoryRef::Custom);
        builtins
            .chain(custom)
            .enumerate()
            .map(|(i, category)| CategoryEntry {
                index: i + 1,
                name: self.name(category).to_string(),
                category,
                base_id: self.base_id(category),
            })
            .collect()
    }

    /// Resolves a 1-based menu index.
    pub fn resolve(&self, index: usize) -> Result<CategoryRef> {
        match index {
            0 => Err(StockzError::InvalidCategory(format!("{}", index))),
            i if i <= BUILTINS.len() => Ok(CategoryRef::Builtin(i - 1)),
            i if i - BUILTINS.len() <= self.custom.len() => {
                Ok(CategoryRef::Custom(i - BUILTINS.len() - 1))
            }
            i => Err(StockzError::InvalidCategory(format!(
                "{} (choose 1-{})",
                i,
                self.len()
            ))),
        }
    }

    /// Exact, case-sensitive name lookup.
    pub fn find(&self, name: &str) -> Option<CategoryRef> {
        if let Some(i) = BUILTINS.iter().position(|b| b.name == name) {
            return Some(CategoryRef::Builtin(i));
        }
        self.custom
            .iter()
            .position(|c| c.name == name)
            .map(CategoryRef::Custom)
    }

    /// Resolves user input: a menu index, an exact name, or a name that
    /// matches exactly one category ignoring case.
    pub fn lookup(&self, input: &str) -> Result<CategoryRef> {
        let input = input.trim();
        if let Ok(index) = input.parse::<usize>() {
            return self.resolve(index);
        }
        let input = truncate_chars(input, MAX_CATEGORY_NAME);
        if let Some(found) = self.find(&input) {
            return Ok(found);
        }
        let lower = input.to_lowercase();
        let matches: Vec<CategoryRef> = self
            .list_categories()
            .into_iter()
            .filter(|e| e.name.to_lowercase() == lower)
            .map(|e| e.category)
            .collect();
        match matches.as_slice() {
            [only] => Ok(*only),
            _ => Err(StockzError::InvalidCategory(input)),
        }
    }

    pub fn contains(&self, category: CategoryRef) -> bool {
        match category {
            CategoryRef::Builtin(i) => i < BUILTINS.len(),
            CategoryRef::Custom(i) => i < self.custom.len(),
        }
    }

    fn check(&self, category: CategoryRef) -> Result<()> {
        if self.contains(category) {
            Ok(())
        } else {
            Err(StockzError::InvalidCategory(format!("{:?}", category)))
        }
    }

    /// Name of a category. Unknown handles yield an empty string; use
    /// [`CategoryCatalog::contains`] first when the handle is untrusted.
    pub fn name(&self, category: CategoryRef) -> &str {
        match category {
            CategoryRef::Builtin(i) => BUILTINS.get(i).map(|b| b.name).unwrap_or_default(),
            CategoryRef::Custom(i) => self.custom.get(i).map(|c| c.name.as_str()).unwrap_or_default(),
        }
    }

    pub fn products_of(&self, category: CategoryRef) -> Result<Vec<String>> {
        self.check(category)?;
        Ok(match category {
            CategoryRef::Builtin(i) => BUILTINS[i].products.iter().map(|p| p.to_string()).collect(),
            CategoryRef::Custom(i) => self.custom[i].products.clone(),
        })
    }

    pub fn base_id(&self, category: CategoryRef) -> u32 {
        match category {
            CategoryRef::Builtin(i) => BUILTINS.get(i).map(|b| b.base_id).unwrap_or_default(),
            CategoryRef::Custom(i) => self
                .custom
                .get(i)
                .and_then(|c| c.base_id)
                .unwrap_or(CUSTOM_BASE + i as u32 * BAND_WIDTH),
        }
    }

    /// The band after the highest custom band in use.
    fn next_free_base(&self) -> u32 {
        self.custom
            .iter()
            .filter_map(|c| c.base_id)
            .max()
            .map_or(CUSTOM_BASE, |base| base + BAND_WIDTH)
    }

    fn base_is_free(&self, base: u32) -> bool {
        base >= CUSTOM_BASE
            && base.checked_add(2 * BAND_WIDTH).is_some()
            && (base - CUSTOM_BASE) % BAND_WIDTH == 0
            && self.custom.iter().all(|c| c.base_id != Some(base))
    }

    /// Appends a custom category with the next free ID band. The name is
    /// truncated to [`MAX_CATEGORY_NAME`] characters before the duplicate
    /// check; blank product names are skipped and the list is capped at
    /// [`MAX_PRODUCTS_PER_CUSTOM`] entries.
    pub fn create_category<P: AsRef<str>>(
        &mut self,
        name: &str,
        products: &[P],
    ) -> Result<CategoryRef> {
        let base = self.next_free_base();
        self.push_custom(name, products, base)
    }

    fn push_custom<P: AsRef<str>>(
        &mut self,
        name: &str,
        products: &[P],
        base: u32,
    ) -> Result<CategoryRef> {
        if self.custom.len() >= MAX_CUSTOM_CATEGORIES {
            return Err(StockzError::CapacityExceeded(format!(
                "maximum custom categories reached ({})",
                MAX_CUSTOM_CATEGORIES
            )));
        }

        let name = validate_name(name, "Category name")
            .map_err(|e| StockzError::InvalidCategory(e.to_string()))?;
        let name = truncate_chars(&name, MAX_CATEGORY_NAME);
        if self.find(&name).is_some() {
            return Err(StockzError::DuplicateCategory(name));
        }

        let mut kept = Vec::new();
        for product in products {
            if kept.len() == MAX_PRODUCTS_PER_CUSTOM {
                log::warn!(
                    "Category '{}': only the first {} products are kept",
                    name,
                    MAX_PRODUCTS_PER_CUSTOM
                );
                break;
            }
            match validate_name(product.as_ref(), "Product name") {
                Ok(p) => kept.push(truncate_chars(&p, MAX_PRODUCT_NAME)),
                Err(e) => log::warn!("Category '{}': skipping product: {}", name, e),
            }
        }

        self.custom.push(CustomCategory {
            name,
            products: kept,
            base_id: Some(base),
        });
        Ok(CategoryRef::Custom(self.custom.len() - 1))
    }
}
