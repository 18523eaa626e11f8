// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::Utc;

use crate::models::{Asset, new_id};
use crate::ordering::{reorder, sorted_for_display};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};
use crate::views::{asset_view_members, class_display_name};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("reorder", sub)) => apply_reorder(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let class = sub.get_one::<String>("class").unwrap();
    let value = parse_amount(sub.get_one::<String>("value").unwrap())?;
    let date_added = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Utc::now().date_naive(),
    };

    let mut ledger = store.load();
    let id = new_id();
    ledger.assets.push(Asset {
        id: id.clone(),
        name: name.clone(),
        class: class.clone(),
        value,
        institution: sub.get_one::<String>("institution").cloned(),
        notes: sub.get_one::<String>("notes").cloned(),
        date_added,
        order: None,
    });
    store.save(&ledger);
    println!("Added asset '{}' ({}) id={}", name, class, id);
    Ok(())
}

fn update(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut ledger = store.load();
    let Some(asset) = ledger.assets.iter_mut().find(|a| &a.id == id) else {
        bail!("Asset '{}' not found", id);
    };
    if let Some(name) = sub.get_one::<String>("name") {
        asset.name = name.clone();
    }
    if let Some(class) = sub.get_one::<String>("class") {
        asset.class = class.clone();
    }
    if let Some(value) = sub.get_one::<String>("value") {
        asset.value = parse_amount(value)?;
    }
    if let Some(inst) = sub.get_one::<String>("institution") {
        asset.institution = Some(inst.clone());
    }
    if let Some(notes) = sub.get_one::<String>("notes") {
        asset.notes = Some(notes.clone());
    }
    store.save(&ledger);
    println!("Updated asset '{}'", id);
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut ledger = store.load();
    let before = ledger.assets.len();
    ledger.assets.retain(|a| &a.id != id);
    if ledger.assets.len() == before {
        bail!("Asset '{}' not found", id);
    }
    store.save(&ledger);
    println!("Removed asset '{}'", id);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = store.load();

    // "all" (or no view at all) bypasses the filter engine entirely.
    let members: Vec<&crate::models::Asset> = match sub.get_one::<String>("view") {
        None => ledger.assets.iter().collect(),
        Some(v) if v.as_str() == "all" => ledger.assets.iter().collect(),
        Some(v) => {
            let Some(view) = ledger
                .asset_views
                .iter()
                .find(|av| av.id == *v || av.name.eq_ignore_ascii_case(v))
            else {
                bail!("Asset view '{}' not found", v);
            };
            asset_view_members(&ledger, view)
        }
    };

    let owned: Vec<crate::models::Asset> = members.into_iter().cloned().collect();
    let mut data = Vec::new();
    for a in sorted_for_display(&owned) {
        data.push(vec![
            a.id.clone(),
            a.name.clone(),
            class_display_name(&a.class, &ledger.asset_classes).to_string(),
            fmt_money(&a.value),
            a.institution.clone().unwrap_or_default(),
            a.date_added.to_string(),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Class", "Value", "Institution", "Added"], data)
        );
    }
    Ok(())
}

fn apply_reorder(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let ids: Vec<String> = sub.get_many::<String>("ids").unwrap().cloned().collect();
    let mut ledger = store.load();
    ledger.assets = reorder(std::mem::take(&mut ledger.assets), &ids);
    store.save(&ledger);
    println!("Reordered {} asset(s)", ids.len());
    Ok(())
}
