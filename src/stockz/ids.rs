//! Record ID allocation from per-category bands.
//!
//! Allocation is advisory. The returned IDs are candidates only; the record
//! store checks global uniqueness again when they are committed.

use crate::catalog::{CategoryCatalog, CategoryRef, BAND_WIDTH};
use crate::error::{Result, StockzError};
use crate::model::Record;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub first: u32,
    pub last: u32,
}

impl Band {
    pub fn contains(&self, id: u32) -> bool {
        (self.first..=self.last).contains(&id)
    }
}

pub fn band(catalog: &CategoryCatalog, category: CategoryRef) -> Result<Band> {
    if !catalog.contains(category) {
        return Err(StockzError::InvalidCategory(format!("{:?}", category)));
    }
    let base = catalog.base_id(category);
    Ok(Band {
        first: base + 1,
        last: base + BAND_WIDTH - 1,
    })
}

/// Next free ID for `category`: one past the highest ID already inside its
/// band, or the first ID of the band when it is empty.
pub fn next_id(catalog: &CategoryCatalog, records: &[Record], category: CategoryRef) -> Result<u32> {
    let band = band(catalog, category)?;
    let next = records
        .iter()
        .map(|r| r.id)
        .filter(|id| band.contains(*id))
        .max()
        .map_or(band.first, |max| max + 1);

    if next > band.last {
        return Err(StockzError::CapacityExceeded(format!(
            "no free IDs left in {}..={} for '{}'",
            band.first,
            band.last,
            catalog.name(category)
        )));
    }
    Ok(next)
}

/// Allocates `count` IDs for a batch insert. Candidates start at
/// [`next_id`] and step past any ID already used anywhere in the store.
pub fn allocate(
    catalog: &CategoryCatalog,
    records: &[Record],
    category: CategoryRef,
    count: usize,
) -> Result<Vec<u32>> {
    let band = band(catalog, category)?;
    let used: HashSet<u32> = records.iter().map(|r| r.id).collect();
    let mut candidate = next_id(catalog, records, category)?;
    let mut ids = Vec::with_capacity(count);

    for _ in 0..count {
        while used.contains(&candidate) {
            log::debug!("ID {} already taken, trying {}", candidate, candidate + 1);
            candidate += 1;
        }
        if candidate > band.last {
            return Err(StockzError::CapacityExceeded(format!(
                "not enough free IDs left for '{}' ({} requested)",
                catalog.name(category),
                count
            )));
        }
        ids.push(candidate);
        candidate += 1;
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::StockDate;

    fn record(id: u32, category: &str) -> Record {
        Record::new(id, "Thing", 10.0, StockDate::parse("15/01/2024").unwrap(), category)
    }

    #[test]
    fn empty_band_starts_at_first_id() {
        let catalog = CategoryCatalog::new();
        let id = next_id(&catalog, &[], CategoryRef::Builtin(0)).unwrap();
        assert_eq!(id, 1001);
        let id = next_id(&catalog, &[], CategoryRef::Builtin(4)).unwrap();
        assert_eq!(id, 5001);
    }

    #[test]
    fn next_id_is_past_band_maximum() {
        let catalog = CategoryCatalog::new();
        let records = vec![record(1001, "iPhones"), record(1005, "iPhones"), record(2003, "MacBooks")];
        assert_eq!(next_id(&catalog, &records, CategoryRef::Builtin(0)).unwrap(), 1006);
        assert_eq!(next_id(&catalog, &records, CategoryRef::Builtin(1)).unwrap(), 2004);
        assert_eq!(next_id(&catalog, &records, CategoryRef::Builtin(2)).unwrap(), 3001);
    }

    #[test]
    fn committed_ids_strictly_increase_within_band() {
        let mut catalog = CategoryCatalog::new();
        let custom = catalog.create_category("Vision", &["Vision Pro"]).unwrap();
        let b = band(&catalog, custom).unwrap();
        let mut records = Vec::new();
        let mut last = 0;
        for _ in 0..10 {
            let id = next_id(&catalog, &records, custom).unwrap();
            assert!(b.contains(id));
            assert!(id > last);
            last = id;
            records.push(record(id, "Vision"));
        }
        assert_eq!(b.first, 6001);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let catalog = CategoryCatalog::new();
        assert!(matches!(
            next_id(&catalog, &[], CategoryRef::Custom(0)),
            Err(StockzError::InvalidCategory(_))
        ));
    }

    #[test]
    fn exhausted_band_is_reported() {
        let catalog = CategoryCatalog::new();
        let records = vec![record(1999, "iPhones")];
        assert!(matches!(
            next_id(&catalog, &records, CategoryRef::Builtin(0)),
            Err(StockzError::CapacityExceeded(_))
        ));
        let records = vec![record(1998, "iPhones")];
        assert!(allocate(&catalog, &records, CategoryRef::Builtin(0), 2).is_err());
        assert_eq!(allocate(&catalog, &records, CategoryRef::Builtin(0), 1).unwrap(), vec![1999]);
    }

    #[test]
    fn allocate_returns_consecutive_candidates() {
        let catalog = CategoryCatalog::new();
        let records = vec![record(1002, "iPhones")];
        let ids = allocate(&catalog, &records, CategoryRef::Builtin(0), 3).unwrap();
        assert_eq!(ids, vec![1003, 1004, 1005]);
    }
}
