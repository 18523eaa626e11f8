// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{FlowKind, Ledger};
use crate::views::{ClassRef, resolve_class};

pub fn net_worth(ledger: &Ledger) -> Decimal {
    let assets: Decimal = ledger.assets.iter().map(|a| a.value).sum();
    let liabilities: Decimal = ledger.liabilities.iter().map(|l| l.amount).sum();
    assets - liabilities
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyCashFlow {
    pub income: Decimal,
    pub expenses: Decimal,
}

impl MonthlyCashFlow {
    pub fn net(&self) -> Decimal {
        self.income - self.expenses
    }
}

pub fn monthly_cash_flow(ledger: &Ledger, year: i32, month: u32) -> MonthlyCashFlow {
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for tx in &ledger.transactions {
        if tx.date.year() != year || tx.date.month() != month {
            continue;
        }
        match tx.kind {
            FlowKind::Income => income += tx.amount,
            FlowKind::Expense => expenses += tx.amount,
        }
    }
    MonthlyCashFlow { income, expenses }
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocationBucket {
    pub name: String,
    pub value: Decimal,
    pub percentage: Decimal,
}

/// Groups entities by resolved class name, falling back to the raw reference
/// text on a miss, descending by value. A zero total yields percentage 0 for
/// every bucket rather than propagating a division by zero.
pub fn class_allocation<C: ClassRef>(
    entities: &[(&str, Decimal)],
    classes: &[C],
) -> Vec<AllocationBucket> {
    let mut byname: HashMap<String, Decimal> = HashMap::new();
    for (class_text, value) in entities {
        let name = resolve_class(class_text, classes)
            .map(|c| c.class_name().to_string())
            .unwrap_or_else(|| (*class_text).to_string());
        *byname.entry(name).or_insert(Decimal::ZERO) += *value;
    }
    let total: Decimal = byname.values().copied().sum();
    let mut buckets: Vec<AllocationBucket> = byname
        .into_iter()
        .map(|(name, value)| {
            let percentage = if total.is_zero() {
                Decimal::ZERO
            } else {
                value / total * Decimal::from(100)
            };
            AllocationBucket { name, value, percentage }
        })
        .collect();
    buckets.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    buckets
}

pub fn asset_allocation(ledger: &Ledger) -> Vec<AllocationBucket> {
    let entities: Vec<(&str, Decimal)> =
        ledger.assets.iter().map(|a| (a.class.as_str(), a.value)).collect();
    class_allocation(&entities, &ledger.asset_classes)
}

pub fn liability_allocation(ledger: &Ledger) -> Vec<AllocationBucket> {
    let entities: Vec<(&str, Decimal)> =
        ledger.liabilities.iter().map(|l| (l.class.as_str(), l.amount)).collect();
    class_allocation(&entities, &ledger.liability_classes)
}

#[derive(Debug, Clone, Serialize)]
pub struct NetWorthChange {
    pub delta: Decimal,
    pub percentage: Decimal,
}

/// Change over the trailing window ending at `today`, inclusive. The delta is
/// the signed sum of in-window transactions; the baseline is current net
/// worth minus that delta, and a zero baseline reports 0% rather than an
/// infinite change.
pub fn net_worth_change(ledger: &Ledger, days: u64, today: NaiveDate) -> NetWorthChange {
    let start = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
    let mut delta = Decimal::ZERO;
    for tx in &ledger.transactions {
        if tx.date < start || tx.date > today {
            continue;
        }
        match tx.kind {
            FlowKind::Income => delta += tx.amount,
            FlowKind::Expense => delta -= tx.amount,
        }
    }
    let baseline = net_worth(ledger) - delta;
    let percentage = if baseline.is_zero() {
        Decimal::ZERO
    } else {
        delta / baseline * Decimal::from(100)
    };
    NetWorthChange { delta, percentage }
}
