use std::fs;
use stockz::api::{SearchQuery, StockzApi};
use stockz::config::StockzConfig;
use stockz::date::StockDate;
use stockz::inventory::{NewStock, ProductChoice};
use stockz::sort::SortSpec;
use stockz::store::fs::FileStore;

fn no_seed() -> StockzConfig {
    StockzConfig {
        seed_sample_data: false,
        ..StockzConfig::default()
    }
}

fn open(dir: &std::path::Path) -> StockzApi<FileStore> {
    let (api, _) = StockzApi::open(FileStore::new(dir.to_path_buf()), &no_seed()).unwrap();
    api
}

#[test]
fn records_categories_and_sort_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut api = open(dir.path());
        api.create_category("Vision", &["Vision Pro"]).unwrap();
        let vision = api.resolve_category("vision").unwrap();
        api.add_stock(&NewStock {
            category: vision,
            product: ProductChoice::Listed(1),
            price: 3499.0,
            date: StockDate::parse("02/02/2024").unwrap(),
            quantity: 1,
        })
        .unwrap();
        let iphones = api.resolve_category("1").unwrap();
        api.add_stock(&NewStock {
            category: iphones,
            product: ProductChoice::Listed(5),
            price: 599.0,
            date: StockDate::parse("10/03/2024").unwrap(),
            quantity: 1,
        })
        .unwrap();
        api.sort(SortSpec::price_ascending()).unwrap();
    }

    let mut api = open(dir.path());
    let ids: Vec<u32> = api.inventory().records().records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1001, 6001]);
    assert_eq!(api.inventory().last_sort(), Some(SortSpec::price_ascending()));

    let found = api.search(&SearchQuery::Category("Vision".to_string())).unwrap();
    assert_eq!(found.listed_records.len(), 1);
    assert_eq!(found.listed_records[0].product_name, "Vision Pro");

    // The remembered sort and the custom category keep working.
    api.resort().unwrap();
    let vision = api.resolve_category("Vision").unwrap();
    assert_eq!(api.next_id(vision).unwrap(), 6002);
}

#[test]
fn record_file_uses_pipe_lines() {
    let dir = tempfile::tempdir().unwrap();
    let mut api = open(dir.path());
    let airpods = api.resolve_category("AirPods").unwrap();
    api.add_stock(&NewStock {
        category: airpods,
        product: ProductChoice::Listed(3),
        price: 549.0,
        date: StockDate::parse("30/01/2024").unwrap(),
        quantity: 1,
    })
    .unwrap();

    let content = fs::read_to_string(dir.path().join("inventory.txt")).unwrap();
    assert_eq!(content, "4001|AirPods Max|549.00|30/01/2024|AirPods\n");
    assert!(dir.path().join("state.json").exists());
}

#[test]
fn unreadable_state_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("state.json"), "{ not json").unwrap();
    fs::write(
        dir.path().join("inventory.txt"),
        "2001|MacBook Pro M3|1999.00|20/01/2024|MacBooks\n",
    )
    .unwrap();

    let api = open(dir.path());
    assert_eq!(api.inventory().records().len(), 1);
    assert_eq!(api.inventory().last_sort(), None);
    assert_eq!(api.catalog().len(), 5);
}
