use crate::catalog::CategoryRef;
use crate::commands::{persist, CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::store::DataStore;

pub fn list(inventory: &Inventory) -> Result<CmdResult> {
    Ok(CmdResult::default().with_categories(inventory.list_categories()))
}

pub fn products(inventory: &Inventory, category: CategoryRef) -> Result<CmdResult> {
    let products = inventory.products_of(category)?;
    let mut result = CmdResult::default();
    if products.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "'{}' has no predefined products; enter a product name when adding stock",
            inventory.catalog().name(category)
        )));
    }
    Ok(result.with_products(products))
}

pub fn create<S: DataStore, P: AsRef<str>>(
    store: &mut S,
    inventory: &mut Inventory,
    name: &str,
    products: &[P],
) -> Result<CmdResult> {
    let category = inventory.create_category(name, products)?;
    let catalog = inventory.catalog();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category '{}' created (IDs from {})",
        catalog.name(category),
        catalog.base_id(category) + 1
    )));
    persist(store, inventory, &mut result);

    let entry = inventory
        .list_categories()
        .into_iter()
        .filter(|e| e.category == category)
        .collect();
    Ok(result.with_categories(entry))
}
