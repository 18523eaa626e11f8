// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use nestegg::integrity::{TaxonomyKind, delete_taxonomy, dependents};
use nestegg::models::{Asset, CashFlowLineItem, FlowKind, Ledger};
use rust_decimal::Decimal;

fn line_item(id: &str, group: Option<&str>, category: Option<&str>) -> CashFlowLineItem {
    CashFlowLineItem {
        id: id.to_string(),
        name: id.to_uppercase(),
        kind: FlowKind::Expense,
        group_id: group.map(String::from),
        category_id: category.map(String::from),
        notes: None,
        order: None,
    }
}

fn setup() -> Ledger {
    let mut ledger = Ledger::default();
    ledger.cash_flow_line_items = vec![
        line_item("i1", Some("essentials"), Some("housing")),
        line_item("i2", Some("essentials"), Some("food")),
        line_item("i3", Some("lifestyle"), None),
        line_item("i4", None, Some("housing")),
    ];
    ledger
}

#[test]
fn deleting_group_clears_only_matching_references() {
    let mut ledger = setup();
    assert!(delete_taxonomy(&mut ledger, TaxonomyKind::CashFlowGroup, "essentials"));

    assert!(!ledger.cash_flow_groups.iter().any(|g| g.id == "essentials"));
    // The line items survive with the reference cleared; nothing cascades
    assert_eq!(ledger.cash_flow_line_items.len(), 4);
    assert_eq!(ledger.cash_flow_line_items[0].group_id, None);
    assert_eq!(ledger.cash_flow_line_items[1].group_id, None);
    assert_eq!(ledger.cash_flow_line_items[2].group_id, Some("lifestyle".into()));
    // Category references are untouched by a group delete
    assert_eq!(ledger.cash_flow_line_items[0].category_id, Some("housing".into()));
}

#[test]
fn deleting_category_clears_category_references() {
    let mut ledger = setup();
    assert!(delete_taxonomy(&mut ledger, TaxonomyKind::CashFlowCategory, "housing"));
    assert_eq!(ledger.cash_flow_line_items[0].category_id, None);
    assert_eq!(ledger.cash_flow_line_items[3].category_id, None);
    assert_eq!(ledger.cash_flow_line_items[1].category_id, Some("food".into()));
}

#[test]
fn dependents_counts_group_and_category_references() {
    let ledger = setup();
    assert_eq!(dependents(&ledger, TaxonomyKind::CashFlowGroup, "essentials"), 2);
    assert_eq!(dependents(&ledger, TaxonomyKind::CashFlowGroup, "lifestyle"), 1);
    assert_eq!(dependents(&ledger, TaxonomyKind::CashFlowCategory, "housing"), 2);
    assert_eq!(dependents(&ledger, TaxonomyKind::CashFlowCategory, "entertainment"), 0);
}

#[test]
fn dependents_resolves_class_references_case_insensitively() {
    let mut ledger = Ledger::default();
    ledger.assets.push(Asset {
        id: "a1".into(),
        name: "Checking".into(),
        // Name-cased reference to the class with id "cash"
        class: "Cash".into(),
        value: Decimal::from(100),
        institution: None,
        notes: None,
        date_added: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        order: None,
    });
    assert_eq!(dependents(&ledger, TaxonomyKind::AssetClass, "cash"), 1);
    assert_eq!(dependents(&ledger, TaxonomyKind::AssetClass, "equities"), 0);
}

#[test]
fn deleting_class_leaves_entities_untouched() {
    let mut ledger = Ledger::default();
    ledger.assets.push(Asset {
        id: "a1".into(),
        name: "Checking".into(),
        class: "cash".into(),
        value: Decimal::from(100),
        institution: None,
        notes: None,
        date_added: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        order: None,
    });
    assert!(delete_taxonomy(&mut ledger, TaxonomyKind::AssetClass, "cash"));
    // Orphaned reference stays literal; display falls back to the raw text
    assert_eq!(ledger.assets[0].class, "cash");
}

#[test]
fn deleting_missing_entry_reports_false() {
    let mut ledger = Ledger::default();
    assert!(!delete_taxonomy(&mut ledger, TaxonomyKind::CashFlowGroup, "ghost"));
}
