// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use crate::integrity::{TaxonomyKind, delete_taxonomy};
use crate::models::{AssetView, LiabilityView, new_id};
use crate::ordering::{reorder, sorted_for_display};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use crate::views::{
    asset_view_eligible, asset_view_members, asset_view_total, liability_view_members,
    liability_view_total,
};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("asset", side)) => asset_handle(store, side),
        Some(("liability", side)) => liability_handle(store, side),
        _ => Ok(()),
    }
}

fn asset_handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let classes: Vec<String> = sub
                .get_many::<String>("classes")
                .map(|v| v.cloned().collect())
                .unwrap_or_default();
            let mut ledger = store.load();
            let id = new_id();
            ledger.asset_views.push(AssetView {
                id: id.clone(),
                name: name.clone(),
                filter_classes: if classes.is_empty() { None } else { Some(classes) },
                order: None,
            });
            store.save(&ledger);
            println!("Added asset view '{}' id={}", name, id);
        }
        Some(("update", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let mut ledger = store.load();
            let Some(view) = ledger.asset_views.iter_mut().find(|v| &v.id == id) else {
                bail!("Asset view '{}' not found", id);
            };
            if let Some(name) = sub.get_one::<String>("name") {
                view.name = name.clone();
            }
            if let Some(classes) = sub.get_many::<String>("classes") {
                let classes: Vec<String> = classes.cloned().collect();
                view.filter_classes = if classes.is_empty() { None } else { Some(classes) };
            }
            store.save(&ledger);
            println!("Updated asset view '{}'", id);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let mut ledger = store.load();
            if !delete_taxonomy(&mut ledger, TaxonomyKind::AssetView, id) {
                bail!("Asset view '{}' not found", id);
            }
            store.save(&ledger);
            println!("Removed asset view '{}'", id);
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let ledger = store.load();
            let mut data = Vec::new();
            for v in sorted_for_display(&ledger.asset_views) {
                let members = asset_view_members(&ledger, v);
                data.push(vec![
                    v.id.clone(),
                    v.name.clone(),
                    v.filter_classes
                        .as_ref()
                        .map(|f| f.join(", "))
                        .unwrap_or_else(|| "(all)".into()),
                    members.len().to_string(),
                    fmt_money(&asset_view_total(&ledger, v)),
                    if asset_view_eligible(&ledger, v) { "yes" } else { "no" }.into(),
                ]);
            }
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                println!(
                    "{}",
                    pretty_table(&["Id", "Name", "Filter", "Members", "Total", "Shown"], data)
                );
            }
        }
        Some(("reorder", sub)) => {
            let ids: Vec<String> = sub.get_many::<String>("ids").unwrap().cloned().collect();
            let mut ledger = store.load();
            ledger.asset_views = reorder(std::mem::take(&mut ledger.asset_views), &ids);
            store.save(&ledger);
            println!("Reordered {} asset view(s)", ids.len());
        }
        _ => {}
    }
    Ok(())
}

fn liability_handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let mut ledger = store.load();
            let id = new_id();
            ledger.liability_views.push(LiabilityView {
                id: id.clone(),
                name: name.clone(),
                liability_ids: Some(Vec::new()),
                filter_classes: None,
                order: None,
            });
            store.save(&ledger);
            println!("Added liability view '{}' id={}", name, id);
        }
        Some(("update", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let mut ledger = store.load();
            let Some(view) = ledger.liability_views.iter_mut().find(|v| &v.id == id) else {
                bail!("Liability view '{}' not found", id);
            };
            if let Some(name) = sub.get_one::<String>("name") {
                view.name = name.clone();
            }
            store.save(&ledger);
            println!("Updated liability view '{}'", id);
        }
        Some(("add-member", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let member = sub.get_one::<String>("liability-id").unwrap();
            let mut ledger = store.load();
            if !ledger.liabilities.iter().any(|l| &l.id == member) {
                bail!("Liability '{}' not found", member);
            }
            let Some(view) = ledger.liability_views.iter_mut().find(|v| &v.id == id) else {
                bail!("Liability view '{}' not found", id);
            };
            let ids = view.liability_ids.get_or_insert_with(Vec::new);
            if !ids.contains(member) {
                ids.push(member.clone());
            }
            store.save(&ledger);
            println!("Added liability '{}' to view '{}'", member, id);
        }
        Some(("rm-member", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let member = sub.get_one::<String>("liability-id").unwrap();
            let mut ledger = store.load();
            let Some(view) = ledger.liability_views.iter_mut().find(|v| &v.id == id) else {
                bail!("Liability view '{}' not found", id);
            };
            if let Some(ids) = view.liability_ids.as_mut() {
                ids.retain(|l| l != member);
            }
            store.save(&ledger);
            println!("Removed liability '{}' from view '{}'", member, id);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let mut ledger = store.load();
            if !delete_taxonomy(&mut ledger, TaxonomyKind::LiabilityView, id) {
                bail!("Liability view '{}' not found", id);
            }
            store.save(&ledger);
            println!("Removed liability view '{}'", id);
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let ledger = store.load();
            let mut data = Vec::new();
            // Liability views are always selectable; no eligibility column.
            for v in sorted_for_display(&ledger.liability_views) {
                let members = liability_view_members(&ledger, v);
                data.push(vec![
                    v.id.clone(),
                    v.name.clone(),
                    members.len().to_string(),
                    fmt_money(&liability_view_total(&ledger, v)),
                ]);
            }
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                println!("{}", pretty_table(&["Id", "Name", "Members", "Total"], data));
            }
        }
        Some(("reorder", sub)) => {
            let ids: Vec<String> = sub.get_many::<String>("ids").unwrap().cloned().collect();
            let mut ledger = store.load();
            ledger.liability_views = reorder(std::mem::take(&mut ledger.liability_views), &ids);
            store.save(&ledger);
            println!("Reordered {} liability view(s)", ids.len());
        }
        _ => {}
    }
    Ok(())
}
