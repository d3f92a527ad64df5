use crate::commands::{persist, CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::{Inventory, NewStock};
use crate::store::DataStore;

pub fn run<S: DataStore>(
    store: &mut S,
    inventory: &mut Inventory,
    stock: &NewStock,
) -> Result<CmdResult> {
    let added = inventory.add_stock(stock)?;
    let mut result = CmdResult::default();

    for record in &added {
        result.add_message(CmdMessage::success(format!(
            "Added {} (ID: {})",
            record.product_name, record.id
        )));
    }
    persist(store, inventory, &mut result);

    if inventory.last_sort().is_some() && inventory.records().len() > added.len() {
        result.add_message(CmdMessage::warning(
            "Records are now unsorted. Use sort or resort to organize them.",
        ));
    }

    Ok(result.with_affected_records(added))
}
