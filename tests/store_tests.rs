// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use nestegg::store::Store;
use rust_decimal::Decimal;
use tempfile::TempDir;

fn slot(dir: &TempDir) -> Store {
    Store::at_path(dir.path().join("ledger.json"))
}

#[test]
fn absent_slot_loads_seed_ledger() {
    let dir = TempDir::new().unwrap();
    let ledger = slot(&dir).load();
    assert!(ledger.assets.is_empty());
    assert!(ledger.transactions.is_empty());
    assert!(!ledger.asset_classes.is_empty());
    assert!(!ledger.cash_flow_categories.is_empty());
}

#[test]
fn partial_record_defaults_missing_collections() {
    let dir = TempDir::new().unwrap();
    let store = slot(&dir);
    std::fs::write(
        store.path(),
        r#"{
            "assets": [
                {"id":"a1","name":"Checking","type":"cash","value":"100","dateAdded":"2024-01-01"}
            ]
        }"#,
    )
    .unwrap();
    let ledger = store.load();
    assert_eq!(ledger.assets.len(), 1);
    assert_eq!(ledger.assets[0].value, Decimal::from(100));
    // Collections missing from the blob come back seeded, never absent
    assert!(ledger.liabilities.is_empty());
    assert!(ledger.budgets.is_empty());
    assert!(!ledger.liability_classes.is_empty());
    assert!(!ledger.cash_flow_groups.is_empty());
}

#[test]
fn malformed_blob_degrades_to_seed() {
    let dir = TempDir::new().unwrap();
    let store = slot(&dir);
    std::fs::write(store.path(), "{ not json at all").unwrap();
    let ledger = store.load();
    assert!(ledger.assets.is_empty());
    assert!(!ledger.asset_classes.is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = slot(&dir);
    let mut ledger = store.load();
    ledger.preferences.insert("currency".into(), serde_json::json!("USD"));
    store.save(&ledger);

    let back = slot(&dir).load();
    assert_eq!(back.preferences.get("currency"), Some(&serde_json::json!("USD")));
    assert_eq!(back.asset_classes.len(), ledger.asset_classes.len());
}

#[test]
fn save_to_unwritable_path_does_not_panic() {
    let store = Store::at_path("/definitely/not/a/real/dir/ledger.json");
    store.save(&store.load());
}

#[test]
fn legacy_category_tags_migrate_on_load() {
    let dir = TempDir::new().unwrap();
    let store = slot(&dir);
    std::fs::write(
        store.path(),
        r#"{
            "assets": [], "liabilities": [],
            "transactions": [
                {"id":"t1","type":"expense","category":"groceries","amount":"15",
                 "description":"weekly shop","date":"2024-03-02"},
                {"id":"t2","type":"expense","category":"Food","amount":"8",
                 "description":"already current","date":"2024-03-03"}
            ]
        }"#,
    )
    .unwrap();
    let ledger = store.load();
    assert_eq!(ledger.transactions[0].category, "Food");
    assert_eq!(ledger.transactions[1].category, "Food");
}
