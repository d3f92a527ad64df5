use crate::commands::{persist, CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S, inventory: &mut Inventory, id: u32) -> Result<CmdResult> {
    let removed = inventory.delete(id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Record deleted ({}): {}",
        removed.id, removed.product_name
    )));
    persist(store, inventory, &mut result);
    Ok(result.with_affected_records(vec![removed]))
}
