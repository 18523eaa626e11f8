// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::store::Store;
use crate::utils::pretty_table;
use crate::views::resolve_class;

/// Soft references never fail at read time, so dangling ones accumulate
/// silently; doctor surfaces them without mutating anything.
pub fn handle(store: &Store) -> Result<()> {
    let ledger = store.load();
    let mut rows = Vec::new();

    // 1) Assets/liabilities whose class string resolves to nothing
    for a in &ledger.assets {
        if resolve_class(&a.class, &ledger.asset_classes).is_none() {
            rows.push(vec!["unresolved_asset_class".into(), format!("{} '{}'", a.id, a.class)]);
        }
    }
    for l in &ledger.liabilities {
        if resolve_class(&l.class, &ledger.liability_classes).is_none() {
            rows.push(vec![
                "unresolved_liability_class".into(),
                format!("{} '{}'", l.id, l.class),
            ]);
        }
    }

    // 2) Line items pointing at removed groups/categories
    for li in &ledger.cash_flow_line_items {
        if let Some(gid) = &li.group_id {
            if !ledger.cash_flow_groups.iter().any(|g| &g.id == gid) {
                rows.push(vec!["dangling_group_id".into(), format!("{} '{}'", li.id, gid)]);
            }
        }
        if let Some(cid) = &li.category_id {
            if !ledger.cash_flow_categories.iter().any(|c| &c.id == cid) {
                rows.push(vec!["dangling_category_id".into(), format!("{} '{}'", li.id, cid)]);
            }
        }
    }

    // 3) Views filtering on classes that no longer exist (they match nothing)
    for v in &ledger.asset_views {
        for f in v.filter_classes.iter().flatten() {
            if resolve_class(f, &ledger.asset_classes).is_none() {
                rows.push(vec!["view_filter_no_class".into(), format!("{} '{}'", v.id, f)]);
            }
        }
    }
    for v in &ledger.liability_views {
        for id in v.liability_ids.iter().flatten() {
            if !ledger.liabilities.iter().any(|l| &l.id == id) {
                rows.push(vec!["view_member_missing".into(), format!("{} '{}'", v.id, id)]);
            }
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
