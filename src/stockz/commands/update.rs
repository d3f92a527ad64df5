use crate::commands::{persist, CmdMessage, CmdResult};
use crate::error::{Result, StockzError};
use crate::inventory::Inventory;
use crate::records::RecordUpdate;
use crate::store::DataStore;

pub fn run<S: DataStore>(
    store: &mut S,
    inventory: &mut Inventory,
    id: u32,
    update: &RecordUpdate,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if inventory.update(id, update)? {
        result.add_message(CmdMessage::success(format!("Record {} updated", id)));
        persist(store, inventory, &mut result);
    } else {
        result.add_message(CmdMessage::info(format!("Record {} unchanged", id)));
    }

    let record = inventory
        .records()
        .find_by_id(id)
        .cloned()
        .ok_or(StockzError::NotFound(id))?;
    Ok(result.with_affected_records(vec![record]))
}
