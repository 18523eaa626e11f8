// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Ledger;
use crate::views::resolve_class;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyKind {
    AssetClass,
    LiabilityClass,
    CashFlowGroup,
    CashFlowCategory,
    AssetView,
    LiabilityView,
}

impl TaxonomyKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaxonomyKind::AssetClass => "asset class",
            TaxonomyKind::LiabilityClass => "liability class",
            TaxonomyKind::CashFlowGroup => "cash-flow group",
            TaxonomyKind::CashFlowCategory => "cash-flow category",
            TaxonomyKind::AssetView => "asset view",
            TaxonomyKind::LiabilityView => "liability view",
        }
    }
}

/// How many entities still soft-reference a taxonomy entry. Callers consult
/// this before deleting so they can refuse or confirm instead of silently
/// orphaning references.
pub fn dependents(ledger: &Ledger, kind: TaxonomyKind, id: &str) -> usize {
    match kind {
        TaxonomyKind::AssetClass => ledger
            .assets
            .iter()
            .filter(|a| references_class(&a.class, id, &ledger.asset_classes))
            .count(),
        TaxonomyKind::LiabilityClass => ledger
            .liabilities
            .iter()
            .filter(|l| references_class(&l.class, id, &ledger.liability_classes))
            .count(),
        TaxonomyKind::CashFlowGroup => ledger
            .cash_flow_line_items
            .iter()
            .filter(|li| li.group_id.as_deref() == Some(id))
            .count(),
        TaxonomyKind::CashFlowCategory => ledger
            .cash_flow_line_items
            .iter()
            .filter(|li| li.category_id.as_deref() == Some(id))
            .count(),
        // Views never own their members by back-reference.
        TaxonomyKind::AssetView | TaxonomyKind::LiabilityView => 0,
    }
}

fn references_class(free_text: &str, id: &str, classes: &[impl crate::views::ClassRef]) -> bool {
    resolve_class(free_text, classes).is_some_and(|c| c.class_id() == id)
}

/// Removes a taxonomy entry. Deletion never cascades to dependent entities:
/// group/category deletion clears the matching reference field on line items
/// in one pass, class deletion leaves the free-string `type` in place (it
/// falls back to literal display), view deletion touches nothing else.
/// Returns false when no entry with that id exists.
pub fn delete_taxonomy(ledger: &mut Ledger, kind: TaxonomyKind, id: &str) -> bool {
    match kind {
        TaxonomyKind::AssetClass => remove_by_id(&mut ledger.asset_classes, id, |c| &c.id),
        TaxonomyKind::LiabilityClass => remove_by_id(&mut ledger.liability_classes, id, |c| &c.id),
        TaxonomyKind::CashFlowGroup => {
            let removed = remove_by_id(&mut ledger.cash_flow_groups, id, |g| &g.id);
            if removed {
                for li in &mut ledger.cash_flow_line_items {
                    if li.group_id.as_deref() == Some(id) {
                        li.group_id = None;
                    }
                }
            }
            removed
        }
        TaxonomyKind::CashFlowCategory => {
            let removed = remove_by_id(&mut ledger.cash_flow_categories, id, |c| &c.id);
            if removed {
                for li in &mut ledger.cash_flow_line_items {
                    if li.category_id.as_deref() == Some(id) {
                        li.category_id = None;
                    }
                }
            }
            removed
        }
        TaxonomyKind::AssetView => remove_by_id(&mut ledger.asset_views, id, |v| &v.id),
        TaxonomyKind::LiabilityView => remove_by_id(&mut ledger.liability_views, id, |v| &v.id),
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, id: &str, id_of: impl Fn(&T) -> &str) -> bool {
    let before = items.len();
    items.retain(|e| id_of(e) != id);
    items.len() != before
}
