use crate::commands::CmdResult;
use crate::error::Result;
use crate::inventory::Inventory;

/// All records in current store order, with per-category totals.
pub fn run(inventory: &Inventory) -> Result<CmdResult> {
    let records = inventory.records();
    Ok(CmdResult::default()
        .with_listed_records(records.records().to_vec())
        .with_summary(records.category_totals()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_in_store_order() {
        let inventory = StoreFixture::new()
            .with_record(2001, "MacBook Air M2", 1299.0, "20/01/2024", "MacBooks")
            .with_record(1001, "iPhone 15", 799.0, "15/01/2024", "iPhones")
            .inventory();

        let result = run(&inventory).unwrap();
        let ids: Vec<u32> = result.listed_records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2001, 1001]);
        let summary = result.summary.unwrap();
        assert_eq!(summary.total_count, 2);
        assert_eq!(summary.total_value, 2098.0);
    }

    #[test]
    fn empty_store_lists_nothing() {
        let result = run(&Inventory::new()).unwrap();
        assert!(result.listed_records.is_empty());
        assert_eq!(result.summary.unwrap().total_count, 0);
    }
}
