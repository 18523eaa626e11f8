// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use crate::models::{
    Asset, AssetClass, AssetView, CashFlowCategory, CashFlowGroup, CashFlowLineItem, Liability,
    LiabilityClass, LiabilityView,
};

/// Anything with a stable id and a display-order slot. Implemented by every
/// collection the UI can drag-reorder.
pub trait Orderable {
    fn id(&self) -> &str;
    fn order(&self) -> Option<u32>;
    fn set_order(&mut self, order: u32);
}

macro_rules! orderable {
    ($($t:ty),+ $(,)?) => {
        $(impl Orderable for $t {
            fn id(&self) -> &str {
                &self.id
            }
            fn order(&self) -> Option<u32> {
                self.order
            }
            fn set_order(&mut self, order: u32) {
                self.order = Some(order);
            }
        })+
    };
}

orderable!(
    Asset,
    Liability,
    AssetClass,
    LiabilityClass,
    AssetView,
    LiabilityView,
    CashFlowLineItem,
    CashFlowGroup,
    CashFlowCategory,
);

/// Stable partial reorder. The ids name a subset (or all) of the collection
/// in the desired order; drag UIs operate on a filtered slice, so everything
/// outside the subset keeps its original relative position and `order` field.
///
/// Ids that no longer exist are skipped. Duplicate ids keep their first
/// occurrence only; reorder never fails.
pub fn reorder<T: Orderable>(items: Vec<T>, ids: &[String]) -> Vec<T> {
    let mut wanted: Vec<&str> = Vec::with_capacity(ids.len());
    let mut seen = HashSet::new();
    for id in ids {
        if seen.insert(id.as_str()) {
            wanted.push(id);
        }
    }

    let mut pool: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut out = Vec::with_capacity(pool.len());
    for id in &wanted {
        for slot in pool.iter_mut() {
            if slot.as_ref().is_some_and(|e| e.id() == *id) {
                if let Some(mut entity) = slot.take() {
                    // Positions count emitted entities, not consumed ids, so a
                    // dead id leaves no gap in the resulting order values.
                    entity.set_order(out.len() as u32);
                    out.push(entity);
                }
                break;
            }
        }
    }
    out.extend(pool.into_iter().flatten());
    out
}

/// Display sort key: `order` where present, else the entity's position in the
/// stored collection. Order values are sparse outside a freshly reordered
/// collection, so density is never assumed.
pub fn sorted_for_display<T: Orderable>(items: &[T]) -> Vec<&T> {
    let mut indexed: Vec<(usize, &T)> = items.iter().enumerate().collect();
    indexed.sort_by_key(|(i, e)| (e.order().map(u64::from).unwrap_or(u64::MAX), *i));
    indexed.into_iter().map(|(_, e)| e).collect()
}
