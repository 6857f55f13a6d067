use tempfile::tempdir;

use freshtrack_core::domain::common::entities::app_errors::CoreError;
use freshtrack_core::domain::inventory::services::{INVENTORY_STORE_KEY, InventoryService};
use freshtrack_core::domain::inventory::{FoodItemDraft, ItemCategory, LocalStore};
use freshtrack_core::infrastructure::persistence::json_file::JsonFileStore;

#[test]
fn missing_file_reads_as_empty() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("store.json"));
    assert_eq!(store.get(INVENTORY_STORE_KEY).unwrap(), None);
}

#[test]
fn values_survive_reopening() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");

    let store = JsonFileStore::new(path.clone());
    store.set("alpha", "one").unwrap();
    store.set("beta", "two").unwrap();

    let reopened = JsonFileStore::new(path);
    assert_eq!(reopened.get("alpha").unwrap().as_deref(), Some("one"));
    assert_eq!(reopened.get("beta").unwrap().as_deref(), Some("two"));
}

#[test]
fn corrupt_file_reports_corruption() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "not json at all").unwrap();

    let store = JsonFileStore::new(path);
    let err = store.get(INVENTORY_STORE_KEY).unwrap_err();
    assert!(matches!(err, CoreError::PersistenceCorrupt(_)));
}

#[test]
fn bootstrap_degrades_corrupt_store_to_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ definitely broken").unwrap();

    let service = InventoryService::bootstrap(JsonFileStore::new(path));
    assert!(service.items().is_empty());
}

#[test]
fn inventory_round_trips_across_instances() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut service = InventoryService::bootstrap(JsonFileStore::new(path.clone()));
    let oats = service
        .add(FoodItemDraft {
            name: "Rolled Oats".to_string(),
            category: ItemCategory::Packaged,
            brand: Some("Morning Mill".to_string()),
            ..Default::default()
        })
        .unwrap();
    let milk = service
        .add(FoodItemDraft {
            name: "Whole Milk".to_string(),
            ..Default::default()
        })
        .unwrap();

    let reloaded = InventoryService::bootstrap(JsonFileStore::new(path));
    let items = reloaded.items();
    assert_eq!(items.len(), 2);

    // Most recent first, identity and timestamps intact
    assert_eq!(items[0].id, milk.id);
    assert_eq!(items[0].name, "Whole Milk");
    assert_eq!(items[0].added_at, milk.added_at);
    assert_eq!(items[1].id, oats.id);
    assert_eq!(items[1].brand.as_deref(), Some("Morning Mill"));
}

#[test]
fn remove_persists_across_instances() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut service = InventoryService::bootstrap(JsonFileStore::new(path.clone()));
    let item = service
        .add(FoodItemDraft {
            name: "Whole Milk".to_string(),
            ..Default::default()
        })
        .unwrap();
    assert!(service.remove(item.id).unwrap());

    let reloaded = InventoryService::bootstrap(JsonFileStore::new(path));
    assert!(reloaded.items().is_empty());
}
