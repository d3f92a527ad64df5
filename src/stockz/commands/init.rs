use crate::commands::{persist, CmdMessage, CmdResult};
use crate::config::StockzConfig;
use crate::error::Result;
use crate::inventory::Inventory;
use crate::store::DataStore;

/// Builds the inventory from whatever the store holds, seeding the sample
/// records when the config asks for it.
pub fn load<S: DataStore>(store: &mut S, config: &StockzConfig) -> Result<(Inventory, CmdResult)> {
    let records = store.load_records()?;
    let state = store.load_state()?;
    let mut inventory = Inventory::from_parts(records, state);
    let mut result = CmdResult::default();

    let loaded = inventory.records().len();
    if config.wants_seed(loaded) {
        let added = inventory.seed_samples();
        if added > 0 {
            log::info!("Seeded {} sample records ({} were loaded)", added, loaded);
            result.add_message(CmdMessage::info(format!(
                "Added {} sample record(s) to get you started",
                added
            )));
            persist(store, &inventory, &mut result);
        }
    }

    Ok((inventory, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn no_seed() -> StockzConfig {
        StockzConfig {
            seed_sample_data: false,
            ..StockzConfig::default()
        }
    }

    #[test]
    fn seeds_empty_store_and_saves() {
        let mut store = StoreFixture::new().store;
        let (inventory, result) = load(&mut store, &StockzConfig::default()).unwrap();
        assert_eq!(inventory.records().len(), 10);
        assert_eq!(store.stored_records().len(), 10);
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn leaves_store_alone_when_seeding_disabled() {
        let mut store = StoreFixture::new().store;
        let (inventory, result) = load(&mut store, &no_seed()).unwrap();
        assert!(inventory.records().is_empty());
        assert!(result.messages.is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn does_not_seed_a_full_enough_store() {
        let mut store = StoreFixture::new().with_samples().store;
        let (inventory, _) = load(&mut store, &StockzConfig::default()).unwrap();
        assert_eq!(inventory.records().len(), 10);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn seed_save_failure_is_reported_not_fatal() {
        let mut store = StoreFixture::new().store;
        store.simulate_write_error(true);
        let (inventory, result) = load(&mut store, &StockzConfig::default()).unwrap();
        assert_eq!(inventory.records().len(), 10);
        assert!(result.has_errors());
    }
}
