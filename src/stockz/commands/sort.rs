use crate::commands::{persist, CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::sort::SortSpec;
use crate::store::DataStore;

/// Sorts the store in place, remembers the sort and saves the new order.
pub fn run<S: DataStore>(store: &mut S, inventory: &mut Inventory, spec: SortSpec) -> Result<CmdResult> {
    inventory.sort(spec);
    Ok(finish(store, inventory, spec, "Sorted"))
}

/// Reapplies the remembered sort.
pub fn repeat<S: DataStore>(store: &mut S, inventory: &mut Inventory) -> Result<CmdResult> {
    let spec = inventory.repeat_last_sort()?;
    Ok(finish(store, inventory, spec, "Re-sorted"))
}

fn finish<S: DataStore>(store: &mut S, inventory: &Inventory, spec: SortSpec, verb: &str) -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} {} records by {}",
        verb,
        inventory.records().len(),
        spec
    )));
    persist(store, inventory, &mut result);
    result
        .with_sort(spec)
        .with_listed_records(inventory.records().records().to_vec())
}
