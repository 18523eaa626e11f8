// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::models::{Asset, AssetClass, AssetView, Ledger, Liability, LiabilityClass, LiabilityView};

/// Class references on assets/liabilities are free strings, matched
/// case-insensitively against a class id or name. A miss is not an error; the
/// caller falls back to the literal text.
pub trait ClassRef {
    fn class_id(&self) -> &str;
    fn class_name(&self) -> &str;
}

impl ClassRef for AssetClass {
    fn class_id(&self) -> &str {
        &self.id
    }
    fn class_name(&self) -> &str {
        &self.name
    }
}

impl ClassRef for LiabilityClass {
    fn class_id(&self) -> &str {
        &self.id
    }
    fn class_name(&self) -> &str {
        &self.name
    }
}

// Cash-flow taxonomies resolve the same way.
impl ClassRef for crate::models::CashFlowGroup {
    fn class_id(&self) -> &str {
        &self.id
    }
    fn class_name(&self) -> &str {
        &self.name
    }
}

impl ClassRef for crate::models::CashFlowCategory {
    fn class_id(&self) -> &str {
        &self.id
    }
    fn class_name(&self) -> &str {
        &self.name
    }
}

pub fn resolve_class<'a, C: ClassRef>(free_text: &str, classes: &'a [C]) -> Option<&'a C> {
    classes.iter().find(|c| {
        c.class_id().eq_ignore_ascii_case(free_text) || c.class_name().eq_ignore_ascii_case(free_text)
    })
}

/// The two membership models a saved view can carry. Asset views always
/// filter by class; liability views own their members directly, with the
/// class filter kept only as a legacy fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMembership {
    ClassFilter(Vec<String>),
    ExplicitMembers(Vec<String>),
}

pub fn asset_view_membership(view: &AssetView) -> ViewMembership {
    ViewMembership::ClassFilter(view.filter_classes.clone().unwrap_or_default())
}

pub fn liability_view_membership(view: &LiabilityView) -> ViewMembership {
    match &view.liability_ids {
        Some(ids) if !ids.is_empty() => ViewMembership::ExplicitMembers(ids.clone()),
        _ => ViewMembership::ClassFilter(view.filter_classes.clone().unwrap_or_default()),
    }
}

fn class_matches(free_text: &str, wanted: &str, classes: &[impl ClassRef]) -> bool {
    if free_text.eq_ignore_ascii_case(wanted) {
        return true;
    }
    // The filter may name a class by id while the entity carries the name,
    // or the other way around; resolve both sides before comparing.
    match (resolve_class(free_text, classes), resolve_class(wanted, classes)) {
        (Some(a), Some(b)) => a.class_id() == b.class_id(),
        _ => false,
    }
}

fn filter_members<'a, E, C: ClassRef>(
    entities: &'a [E],
    filter: &Option<Vec<String>>,
    classes: &[C],
    class_of: impl Fn(&E) -> &str,
) -> Vec<&'a E> {
    match filter {
        None => entities.iter().collect(),
        Some(f) if f.is_empty() => entities.iter().collect(),
        Some(f) => entities
            .iter()
            .filter(|e| f.iter().any(|wanted| class_matches(class_of(e), wanted, classes)))
            .collect(),
    }
}

/// Computed membership: assets whose class resolves into the view's filter
/// set. An empty or absent filter matches every asset. A filter naming a
/// class that no longer exists simply matches nothing.
pub fn asset_view_members<'a>(ledger: &'a Ledger, view: &AssetView) -> Vec<&'a Asset> {
    filter_members(&ledger.assets, &view.filter_classes, &ledger.asset_classes, |a| &a.class)
}

/// A class-filter view earns a tab only when it would show something: its
/// member set is non-empty, or it is the catch-all filter and any asset
/// exists at all.
pub fn asset_view_eligible(ledger: &Ledger, view: &AssetView) -> bool {
    let catch_all = view.filter_classes.as_ref().map_or(true, |f| f.is_empty());
    if catch_all {
        return !ledger.assets.is_empty();
    }
    !asset_view_members(ledger, view).is_empty()
}

/// Recomputed per call; callers poll rather than subscribe.
pub fn eligible_asset_views(ledger: &Ledger) -> Vec<&AssetView> {
    ledger
        .asset_views
        .iter()
        .filter(|v| asset_view_eligible(ledger, v))
        .collect()
}

/// Explicit membership when the view carries ids, else the legacy class
/// filter. Liability views are always selectable, members or not.
pub fn liability_view_members<'a>(ledger: &'a Ledger, view: &LiabilityView) -> Vec<&'a Liability> {
    match liability_view_membership(view) {
        ViewMembership::ExplicitMembers(ids) => ledger
            .liabilities
            .iter()
            .filter(|l| ids.iter().any(|id| id == &l.id))
            .collect(),
        ViewMembership::ClassFilter(_) => filter_members(
            &ledger.liabilities,
            &view.filter_classes,
            &ledger.liability_classes,
            |l| &l.class,
        ),
    }
}

pub fn asset_view_total(ledger: &Ledger, view: &AssetView) -> Decimal {
    asset_view_members(ledger, view).iter().map(|a| a.value).sum()
}

pub fn liability_view_total(ledger: &Ledger, view: &LiabilityView) -> Decimal {
    liability_view_members(ledger, view).iter().map(|l| l.amount).sum()
}

/// Display name for a free-form class reference: the class name when it
/// resolves, the literal text when it does not.
pub fn class_display_name<'a, C: ClassRef>(free_text: &'a str, classes: &'a [C]) -> &'a str {
    resolve_class(free_text, classes).map_or(free_text, |c| c.class_name())
}
