// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use nestegg::aggregates::{
    asset_allocation, monthly_cash_flow, net_worth, net_worth_change,
};
use nestegg::models::{Asset, FlowKind, Ledger, Liability, Transaction};
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

fn liability(id: &str, amount: i64) -> Liability {
    Liability {
        id: id.to_string(),
        name: id.to_uppercase(),
        class: "other".to_string(),
        amount: Decimal::from(amount),
        interest_rate: None,
        notes: None,
        date_added: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        order: None,
    }
}

fn tx(id: &str, kind: FlowKind, amount: i64, date: (i32, u32, u32)) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind,
        category: "Other".to_string(),
        amount: Decimal::from(amount),
        description: id.to_string(),
        merchant: None,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        reviewed: None,
        order: None,
    }
}

#[test]
fn net_worth_is_assets_minus_liabilities() {
    let mut ledger = Ledger::default();
    ledger.assets.push(asset("a1", "cash", 100));
    ledger.liabilities.push(liability("l1", 40));
    assert_eq!(net_worth(&ledger), Decimal::from(60));

    ledger.assets.push(asset("a2", "equities", 50));
    assert_eq!(net_worth(&ledger), Decimal::from(110));
}

#[test]
fn allocation_resolves_names_sorts_descending_and_splits_percentages() {
    let mut ledger = Ledger::default();
    ledger.assets.push(asset("a1", "cash", 100));
    ledger.assets.push(asset("a2", "equities", 50));

    let buckets = asset_allocation(&ledger);
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].name, "Cash");
    assert_eq!(buckets[0].value, Decimal::from(100));
    assert_eq!(buckets[0].percentage.round_dp(1).to_string(), "66.7");
    assert_eq!(buckets[1].name, "Equities");
    assert_eq!(buckets[1].percentage.round_dp(1).to_string(), "33.3");
}

#[test]
fn allocation_falls_back_to_raw_class_text() {
    let mut ledger = Ledger::default();
    ledger.assets.push(asset("a1", "beanie babies", 10));
    let buckets = asset_allocation(&ledger);
    assert_eq!(buckets[0].name, "beanie babies");
}

#[test]
fn allocation_with_zero_total_reports_zero_percentages() {
    let mut ledger = Ledger::default();
    ledger.assets.push(asset("a1", "cash", 0));
    ledger.assets.push(asset("a2", "equities", 0));
    let buckets = asset_allocation(&ledger);
    for b in buckets {
        assert_eq!(b.percentage, Decimal::ZERO);
    }
}

#[test]
fn monthly_cash_flow_respects_month_bounds() {
    let mut ledger = Ledger::default();
    ledger.transactions = vec![
        tx("t1", FlowKind::Income, 500, (2024, 3, 1)),
        tx("t2", FlowKind::Expense, 120, (2024, 3, 31)),
        tx("t3", FlowKind::Income, 999, (2024, 2, 29)),
        tx("t4", FlowKind::Expense, 999, (2024, 4, 1)),
    ];
    let flow = monthly_cash_flow(&ledger, 2024, 3);
    assert_eq!(flow.income, Decimal::from(500));
    assert_eq!(flow.expenses, Decimal::from(120));
    assert_eq!(flow.net(), Decimal::from(380));
}

#[test]
fn month_with_no_transactions_is_zero() {
    let ledger = Ledger::default();
    let flow = monthly_cash_flow(&ledger, 2024, 7);
    assert_eq!(flow.income, Decimal::ZERO);
    assert_eq!(flow.expenses, Decimal::ZERO);
}

#[test]
fn change_window_sums_signed_contributions() {
    let mut ledger = Ledger::default();
    ledger.assets.push(asset("a1", "cash", 1000));
    let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    ledger.transactions = vec![
        tx("t1", FlowKind::Income, 200, (2024, 6, 25)),
        tx("t2", FlowKind::Expense, 50, (2024, 6, 28)),
        // Outside the 30-day window
        tx("t3", FlowKind::Income, 999, (2024, 4, 1)),
    ];
    let change = net_worth_change(&ledger, 30, today);
    assert_eq!(change.delta, Decimal::from(150));
    // Baseline 850, so 150/850
    assert_eq!(change.percentage.round_dp(1).to_string(), "17.6");
}

#[test]
fn change_with_zero_baseline_reports_zero_percentage() {
    let mut ledger = Ledger::default();
    ledger.assets.push(asset("a1", "cash", 150));
    let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    ledger.transactions = vec![tx("t1", FlowKind::Income, 150, (2024, 6, 25))];
    let change = net_worth_change(&ledger, 30, today);
    assert_eq!(change.delta, Decimal::from(150));
    assert_eq!(change.percentage, Decimal::ZERO);
}
