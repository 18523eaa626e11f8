// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use crate::integrity::{TaxonomyKind, delete_taxonomy, dependents};
use crate::models::{AssetClass, Ledger, LiabilityClass, unique_slug};
use crate::ordering::{reorder, sorted_for_display};
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("asset", side)) => side_handle(store, side, TaxonomyKind::AssetClass),
        Some(("liability", side)) => side_handle(store, side, TaxonomyKind::LiabilityClass),
        _ => Ok(()),
    }
}

fn side_handle(store: &Store, m: &clap::ArgMatches, kind: TaxonomyKind) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub, kind)?,
        Some(("rename", sub)) => rename(store, sub, kind)?,
        Some(("rm", sub)) => rm(store, sub, kind)?,
        Some(("list", sub)) => list(store, sub, kind)?,
        Some(("reorder", sub)) => apply_reorder(store, sub, kind)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches, kind: TaxonomyKind) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let color = sub.get_one::<String>("color").cloned();
    let mut ledger = store.load();
    let id = match kind {
        TaxonomyKind::AssetClass => {
            let id = unique_slug(name, |s| ledger.asset_classes.iter().any(|c| c.id == s));
            ledger.asset_classes.push(AssetClass {
                id: id.clone(),
                name: name.clone(),
                color,
                is_liquid: None,
                order: None,
            });
            id
        }
        TaxonomyKind::LiabilityClass => {
            let id = unique_slug(name, |s| ledger.liability_classes.iter().any(|c| c.id == s));
            ledger.liability_classes.push(LiabilityClass {
                id: id.clone(),
                name: name.clone(),
                color,
                order: None,
            });
            id
        }
        _ => unreachable!("class command only routes class kinds"),
    };
    store.save(&ledger);
    println!("Added {} '{}' id={}", kind.label(), name, id);
    Ok(())
}

fn rename(store: &Store, sub: &clap::ArgMatches, kind: TaxonomyKind) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let name = sub.get_one::<String>("name").unwrap();
    let mut ledger = store.load();
    let found = match kind {
        TaxonomyKind::AssetClass => rename_in(&mut ledger.asset_classes, id, name, |c| &c.id, |c, n| c.name = n),
        TaxonomyKind::LiabilityClass => {
            rename_in(&mut ledger.liability_classes, id, name, |c| &c.id, |c, n| c.name = n)
        }
        _ => unreachable!("class command only routes class kinds"),
    };
    if !found {
        bail!("{} '{}' not found", kind.label(), id);
    }
    store.save(&ledger);
    println!("Renamed {} '{}' to '{}'", kind.label(), id, name);
    Ok(())
}

fn rename_in<T>(
    items: &mut [T],
    id: &str,
    name: &str,
    id_of: impl Fn(&T) -> &str,
    set_name: impl Fn(&mut T, String),
) -> bool {
    for item in items.iter_mut() {
        if id_of(item) == id {
            set_name(item, name.to_string());
            return true;
        }
    }
    false
}

fn rm(store: &Store, sub: &clap::ArgMatches, kind: TaxonomyKind) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let force = sub.get_flag("force");
    let mut ledger = store.load();

    let refs = dependents(&ledger, kind, id);
    if refs > 0 && !force {
        bail!(
            "{} '{}' still has {} dependent(s); pass --force to delete anyway",
            kind.label(),
            id,
            refs
        );
    }
    if !delete_taxonomy(&mut ledger, kind, id) {
        bail!("{} '{}' not found", kind.label(), id);
    }
    store.save(&ledger);
    println!("Removed {} '{}'", kind.label(), id);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches, kind: TaxonomyKind) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = store.load();
    let data = match kind {
        TaxonomyKind::AssetClass => asset_class_rows(&ledger),
        TaxonomyKind::LiabilityClass => liability_class_rows(&ledger),
        _ => unreachable!("class command only routes class kinds"),
    };
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Id", "Name", "In use by"], data));
    }
    Ok(())
}

fn asset_class_rows(ledger: &Ledger) -> Vec<Vec<String>> {
    sorted_for_display(&ledger.asset_classes)
        .into_iter()
        .map(|c| {
            vec![
                c.id.clone(),
                c.name.clone(),
                dependents(ledger, TaxonomyKind::AssetClass, &c.id).to_string(),
            ]
        })
        .collect()
}

fn liability_class_rows(ledger: &Ledger) -> Vec<Vec<String>> {
    sorted_for_display(&ledger.liability_classes)
        .into_iter()
        .map(|c| {
            vec![
                c.id.clone(),
                c.name.clone(),
                dependents(ledger, TaxonomyKind::LiabilityClass, &c.id).to_string(),
            ]
        })
        .collect()
}

fn apply_reorder(store: &Store, sub: &clap::ArgMatches, kind: TaxonomyKind) -> Result<()> {
    let ids: Vec<String> = sub.get_many::<String>("ids").unwrap().cloned().collect();
    let mut ledger = store.load();
    match kind {
        TaxonomyKind::AssetClass => {
            ledger.asset_classes = reorder(std::mem::take(&mut ledger.asset_classes), &ids);
        }
        TaxonomyKind::LiabilityClass => {
            ledger.liability_classes = reorder(std::mem::take(&mut ledger.liability_classes), &ids);
        }
        _ => unreachable!("class command only routes class kinds"),
    }
    store.save(&ledger);
    println!("Reordered {} {} entries", ids.len(), kind.label());
    Ok(())
}
