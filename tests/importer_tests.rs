// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use nestegg::backup::{ImportMode, apply_import, export_ledger, validate_import};
use nestegg::models::{Asset, AssetClass, Ledger};
use nestegg::store::Store;
use nestegg::{cli, commands};
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn asset(id: &str, value: i64) -> Asset {
    Asset {
        id: id.to_string(),
        name: id.to_uppercase(),
        class: "cash".to_string(),
        value: Decimal::from(value),
        institution: None,
        notes: None,
        date_added: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        order: None,
    }
}

fn ledger_with_assets(n: usize) -> Ledger {
    let mut ledger = Ledger::default();
    for i in 0..n {
        ledger.assets.push(asset(&format!("a{}", i), 10));
    }
    ledger
}

#[test]
fn validate_rejects_non_json() {
    assert!(validate_import("definitely not json").is_err());
}

#[test]
fn validate_rejects_non_object_top_level() {
    let err = validate_import("[1,2,3]").unwrap_err();
    assert!(err.to_string().contains("not an object"));
}

#[test]
fn validate_rejects_missing_required_collection() {
    let err = validate_import(r#"{"assets": [], "liabilities": []}"#).unwrap_err();
    assert!(err.to_string().contains("transactions"));
}

#[test]
fn validate_rejects_non_array_collection() {
    let err =
        validate_import(r#"{"assets": {}, "liabilities": [], "transactions": []}"#).unwrap_err();
    assert!(err.to_string().contains("assets"));
}

#[test]
fn validate_accepts_own_export() {
    let ledger = ledger_with_assets(2);
    let blob = export_ledger(&ledger);
    let candidate = validate_import(&blob).unwrap();
    assert_eq!(candidate.ledger.assets.len(), 2);
}

#[test]
fn merge_concatenates_sequences_but_replaces_taxonomies() {
    let current = ledger_with_assets(5);

    let mut incoming = Ledger::default();
    for i in 0..3 {
        incoming.assets.push(asset(&format!("b{}", i), 20));
    }
    incoming.budgets.push(nestegg::models::BudgetItem {
        id: "b-2024-06".into(),
        year: 2024,
        month: 6,
        extra: serde_json::Map::new(),
    });
    incoming.asset_classes = vec![AssetClass {
        id: "crypto".into(),
        name: "Crypto".into(),
        color: None,
        is_liquid: Some(true),
        order: None,
    }];
    let candidate = validate_import(&export_ledger(&incoming)).unwrap();

    let outcome = apply_import(current, candidate, ImportMode::Merge);
    // Sequences concatenate with no de-duplication
    assert_eq!(outcome.ledger.assets.len(), 8);
    assert_eq!(outcome.ledger.budgets.len(), 1);
    // Taxonomy collections come over wholesale, not as a union
    assert_eq!(outcome.ledger.asset_classes.len(), 1);
    assert_eq!(outcome.ledger.asset_classes[0].id, "crypto");
    assert!(outcome.safety_backup.is_none());
}

#[test]
fn merge_keeps_current_config_when_candidate_omits_it() {
    let mut current = Ledger::default();
    current.preferences.insert("currency".into(), serde_json::json!("EUR"));
    let default_class_count = current.asset_classes.len();

    // Hand-written candidate without assetClasses or preferences keys
    let candidate = validate_import(
        r#"{"assets": [], "liabilities": [], "transactions": []}"#,
    )
    .unwrap();
    let outcome = apply_import(current, candidate, ImportMode::Merge);
    assert_eq!(outcome.ledger.asset_classes.len(), default_class_count);
    assert_eq!(outcome.ledger.preferences.get("currency"), Some(&serde_json::json!("EUR")));
}

#[test]
fn replace_swaps_store_and_emits_safety_backup() {
    let current = ledger_with_assets(5);
    let incoming = ledger_with_assets(1);
    let candidate = validate_import(&export_ledger(&incoming)).unwrap();

    let outcome = apply_import(current, candidate, ImportMode::Replace);
    assert_eq!(outcome.ledger.assets.len(), 1);

    // The previous ledger must ride along, parseable, for the caller to keep
    let backup = outcome.safety_backup.expect("replace emits a safety backup");
    let restored = validate_import(&backup).unwrap();
    assert_eq!(restored.ledger.assets.len(), 5);
}

#[test]
fn import_command_rejects_bad_blob_without_mutation() {
    let dir = TempDir::new().unwrap();
    let store = Store::at_path(dir.path().join("ledger.json"));
    store.save(&ledger_with_assets(2));

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{\"assets\": 42}}").unwrap();
    file.flush().unwrap();

    let matches = cli::build_cli().get_matches_from([
        "nestegg",
        "import",
        "--path",
        file.path().to_str().unwrap(),
        "--mode",
        "replace",
    ]);
    let Some(("import", import_m)) = matches.subcommand() else {
        panic!("no import subcommand");
    };
    assert!(commands::importer::handle(&store, import_m).is_err());
    // Store untouched after the rejected import
    assert_eq!(store.load().assets.len(), 2);
}

#[test]
fn import_command_merge_through_cli() {
    let dir = TempDir::new().unwrap();
    let store = Store::at_path(dir.path().join("ledger.json"));
    store.save(&ledger_with_assets(2));

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(export_ledger(&ledger_with_assets(3)).as_bytes())
        .unwrap();
    file.flush().unwrap();

    let matches = cli::build_cli().get_matches_from([
        "nestegg",
        "import",
        "--path",
        file.path().to_str().unwrap(),
        "--mode",
        "merge",
    ]);
    let Some(("import", import_m)) = matches.subcommand() else {
        panic!("no import subcommand");
    };
    commands::importer::handle(&store, import_m).unwrap();
    assert_eq!(store.load().assets.len(), 5);
}
