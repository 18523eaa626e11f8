// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    /// Free-form class reference, resolved case-insensitively against
    /// `Ledger::asset_classes` by id or name. Kept as-is when resolution fails.
    #[serde(rename = "type")]
    pub class: String,
    pub value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "dateAdded")]
    pub date_added: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Liability {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub class: String,
    pub amount: Decimal,
    #[serde(
        rename = "interestRate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub interest_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "dateAdded")]
    pub date_added: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FlowKind,
    /// Free-form category reference against `Ledger::cash_flow_categories`.
    /// Legacy records carry a fixed enum value; migrated on load.
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetClass {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "isLiquid", default, skip_serializing_if = "Option::is_none")]
    pub is_liquid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiabilityClass {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetView {
    pub id: String,
    pub name: String,
    /// Class ids (or names) whose assets belong to this view. Empty or absent
    /// means "match all assets".
    #[serde(
        rename = "filterCategories",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub filter_classes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiabilityView {
    pub id: String,
    pub name: String,
    /// Explicit membership. When absent or empty the legacy class filter in
    /// `filter_classes` applies instead.
    #[serde(
        rename = "liabilityIds",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub liability_ids: Option<Vec<String>>,
    #[serde(
        rename = "filterCategories",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub filter_classes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowGroup {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowCategory {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowLineItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FlowKind,
    #[serde(rename = "groupId", default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(
        rename = "categoryId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// Budget rows are round-tripped verbatim; only the identifying keys are
/// typed, everything else rides along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: String,
    pub year: i32,
    pub month: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The single root record. Every collection defaults independently so a
/// partial or legacy blob always loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub liabilities: Vec<Liability>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(rename = "assetClasses", default = "seed_asset_classes")]
    pub asset_classes: Vec<AssetClass>,
    #[serde(rename = "liabilityClasses", default = "seed_liability_classes")]
    pub liability_classes: Vec<LiabilityClass>,
    #[serde(rename = "assetViews", default)]
    pub asset_views: Vec<AssetView>,
    #[serde(rename = "liabilityViews", default)]
    pub liability_views: Vec<LiabilityView>,
    #[serde(rename = "cashFlowGroups", default = "seed_cash_flow_groups")]
    pub cash_flow_groups: Vec<CashFlowGroup>,
    #[serde(rename = "cashFlowCategories", default = "seed_cash_flow_categories")]
    pub cash_flow_categories: Vec<CashFlowCategory>,
    #[serde(rename = "cashFlowLineItems", default)]
    pub cash_flow_line_items: Vec<CashFlowLineItem>,
    #[serde(default)]
    pub budgets: Vec<BudgetItem>,
    #[serde(default)]
    pub preferences: Map<String, Value>,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger {
            assets: Vec::new(),
            liabilities: Vec::new(),
            transactions: Vec::new(),
            asset_classes: seed_asset_classes(),
            liability_classes: seed_liability_classes(),
            asset_views: Vec::new(),
            liability_views: Vec::new(),
            cash_flow_groups: seed_cash_flow_groups(),
            cash_flow_categories: seed_cash_flow_categories(),
            cash_flow_line_items: Vec::new(),
            budgets: Vec::new(),
            preferences: Map::new(),
        }
    }
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Slug for taxonomy ids: lowercase, runs of non-alphanumerics collapse to a
/// single '-'. Assigned once at creation and kept across renames.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut dash = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            dash = false;
        } else if !dash && !out.is_empty() {
            out.push('-');
            dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Slug of the name, suffixed until it clears the `taken` predicate. The id
/// is assigned once at creation; renames never touch it. A name with no
/// alphanumeric characters slugs to nothing, which would make an empty id;
/// those fall back to a fixed stem.
pub fn unique_slug(name: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut base = slugify(name);
    if base.is_empty() {
        base = "entry".to_string();
    }
    if !taken(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

pub fn seed_asset_classes() -> Vec<AssetClass> {
    let seed = [
        ("cash", "Cash", true),
        ("equities", "Equities", true),
        ("retirement", "Retirement", false),
        ("real-estate", "Real Estate", false),
        ("vehicles", "Vehicles", false),
        ("other", "Other", false),
    ];
    seed.iter()
        .enumerate()
        .map(|(i, (id, name, liquid))| AssetClass {
            id: (*id).to_string(),
            name: (*name).to_string(),
            color: None,
            is_liquid: Some(*liquid),
            order: Some(i as u32),
        })
        .collect()
}

pub fn seed_liability_classes() -> Vec<LiabilityClass> {
    let seed = [
        ("mortgage", "Mortgage"),
        ("credit-card", "Credit Card"),
        ("student-loan", "Student Loan"),
        ("auto-loan", "Auto Loan"),
        ("other", "Other"),
    ];
    seed.iter()
        .enumerate()
        .map(|(i, (id, name))| LiabilityClass {
            id: (*id).to_string(),
            name: (*name).to_string(),
            color: None,
            order: Some(i as u32),
        })
        .collect()
}

pub fn seed_cash_flow_groups() -> Vec<CashFlowGroup> {
    let seed = [("essentials", "Essentials"), ("lifestyle", "Lifestyle")];
    seed.iter()
        .enumerate()
        .map(|(i, (id, name))| CashFlowGroup {
            id: (*id).to_string(),
            name: (*name).to_string(),
            order: Some(i as u32),
        })
        .collect()
}

pub fn seed_cash_flow_categories() -> Vec<CashFlowCategory> {
    let seed = [
        ("income", "Income"),
        ("housing", "Housing"),
        ("food", "Food"),
        ("transport", "Transport"),
        ("entertainment", "Entertainment"),
        ("other", "Other"),
    ];
    seed.iter()
        .enumerate()
        .map(|(i, (id, name))| CashFlowCategory {
            id: (*id).to_string(),
            name: (*name).to_string(),
            order: Some(i as u32),
        })
        .collect()
}
