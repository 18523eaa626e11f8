// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use nestegg::models::{Asset, AssetView, Ledger, Liability, LiabilityView};
use nestegg::views::{
    ViewMembership, asset_view_eligible, asset_view_members, asset_view_total,
    class_display_name, eligible_asset_views, liability_view_members, liability_view_membership,
    resolve_class,
};
use rust_decimal::Decimal;

fn asset(id: &str, class: &str, value: i64) -> Asset {
    Asset {
        id: id.to_string(),
        name: id.to_uppercase(),
        class: class.to_string(),
        value: Decimal::from(value),
        institution: None,
        notes: None,
        date_added: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        order: None,
    }
}

fn liability(id: &str, class: &str, amount: i64) -> Liability {
    Liability {
        id: id.to_string(),
        name: id.to_uppercase(),
        class: class.to_string(),
        amount: Decimal::from(amount),
        interest_rate: None,
        notes: None,
        date_added: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        order: None,
    }
}

fn asset_view(id: &str, filter: Option<Vec<&str>>) -> AssetView {
    AssetView {
        id: id.to_string(),
        name: id.to_uppercase(),
        filter_classes: filter.map(|f| f.into_iter().map(String::from).collect()),
        order: None,
    }
}

#[test]
fn class_filter_matches_by_id_or_name_case_insensitively() {
    let mut ledger = Ledger::default();
    ledger.assets = vec![asset("a1", "Cash", 100), asset("a2", "equities", 50)];

    // Filter by id, entity carries the class name
    let by_id = asset_view("v1", Some(vec!["cash"]));
    let members = asset_view_members(&ledger, &by_id);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, "a1");

    // Filter by name, mixed case
    let by_name = asset_view("v2", Some(vec!["EQUITIES"]));
    let members = asset_view_members(&ledger, &by_name);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, "a2");
}

#[test]
fn empty_filter_matches_all_assets() {
    let mut ledger = Ledger::default();
    ledger.assets = vec![asset("a1", "cash", 100), asset("a2", "equities", 50)];
    let view = asset_view("v1", Some(vec![]));
    assert_eq!(asset_view_members(&ledger, &view).len(), 2);
    let view = asset_view("v2", None);
    assert_eq!(asset_view_members(&ledger, &view).len(), 2);
}

#[test]
fn filter_on_missing_class_matches_nothing() {
    let mut ledger = Ledger::default();
    ledger.assets = vec![asset("a1", "cash", 100)];
    let view = asset_view("v1", Some(vec!["crypto"]));
    assert!(asset_view_members(&ledger, &view).is_empty());
    assert!(!asset_view_eligible(&ledger, &view));
}

#[test]
fn eligibility_follows_member_set_and_catch_all_rule() {
    let mut ledger = Ledger::default();
    ledger.assets = vec![asset("a1", "Cash", 100)];

    // Non-empty filter with no matches: not eligible
    let equities_only = asset_view("v1", Some(vec!["Equities"]));
    assert!(!asset_view_eligible(&ledger, &equities_only));

    // Catch-all filter: eligible because assets exist at all
    let catch_all = asset_view("v2", Some(vec![]));
    assert!(asset_view_eligible(&ledger, &catch_all));

    // Catch-all with zero assets anywhere: not eligible
    ledger.assets.clear();
    assert!(!asset_view_eligible(&ledger, &catch_all));
}

#[test]
fn eligible_views_recomputes_from_current_collections() {
    let mut ledger = Ledger::default();
    ledger.asset_views = vec![
        asset_view("v1", Some(vec!["cash"])),
        asset_view("v2", Some(vec!["equities"])),
    ];
    ledger.assets = vec![asset("a1", "cash", 100)];
    let shown: Vec<&str> = eligible_asset_views(&ledger).iter().map(|v| v.id.as_str()).collect();
    assert_eq!(shown, ["v1"]);

    ledger.assets.push(asset("a2", "equities", 50));
    let shown: Vec<&str> = eligible_asset_views(&ledger).iter().map(|v| v.id.as_str()).collect();
    assert_eq!(shown, ["v1", "v2"]);
}

#[test]
fn liability_view_prefers_explicit_members() {
    let mut ledger = Ledger::default();
    ledger.liabilities = vec![
        liability("l1", "mortgage", 1000),
        liability("l2", "credit-card", 50),
    ];
    let view = LiabilityView {
        id: "v1".into(),
        name: "House".into(),
        liability_ids: Some(vec!["l1".into()]),
        // A stale class filter must be ignored while explicit ids exist
        filter_classes: Some(vec!["credit-card".into()]),
        order: None,
    };
    assert_eq!(
        liability_view_membership(&view),
        ViewMembership::ExplicitMembers(vec!["l1".into()])
    );
    let members = liability_view_members(&ledger, &view);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, "l1");
}

#[test]
fn liability_view_falls_back_to_class_filter_when_no_members() {
    let mut ledger = Ledger::default();
    ledger.liabilities = vec![
        liability("l1", "mortgage", 1000),
        liability("l2", "credit-card", 50),
    ];
    let view = LiabilityView {
        id: "v1".into(),
        name: "Cards".into(),
        liability_ids: Some(Vec::new()),
        filter_classes: Some(vec!["Credit Card".into()]),
        order: None,
    };
    assert!(matches!(liability_view_membership(&view), ViewMembership::ClassFilter(_)));
    let members = liability_view_members(&ledger, &view);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, "l2");
}

#[test]
fn view_total_sums_member_values() {
    let mut ledger = Ledger::default();
    ledger.assets = vec![asset("a1", "cash", 100), asset("a2", "equities", 50)];
    let cash_only = asset_view("v1", Some(vec!["cash"]));
    assert_eq!(asset_view_total(&ledger, &cash_only), Decimal::from(100));
    let all = asset_view("v2", None);
    assert_eq!(asset_view_total(&ledger, &all), Decimal::from(150));
}

#[test]
fn unresolved_class_falls_back_to_literal_text() {
    let ledger = Ledger::default();
    assert_eq!(class_display_name("cash", &ledger.asset_classes), "Cash");
    assert_eq!(class_display_name("beanie babies", &ledger.asset_classes), "beanie babies");
    assert!(resolve_class("beanie babies", &ledger.asset_classes).is_none());
}
