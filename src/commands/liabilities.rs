// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::Utc;
use rust_decimal::Decimal;

use crate::models::{Liability, new_id};
use crate::ordering::{reorder, sorted_for_display};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, parse_decimal, pretty_table};
use crate::views::{class_display_name, liability_view_members};

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

fn parse_rate(s: &str) -> Result<Decimal> {
    let rate = parse_decimal(s)?;
    if rate < Decimal::ZERO || rate > Decimal::from(100) {
        bail!("Interest rate '{}' must be between 0 and 100", s);
    }
    Ok(rate)
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let class = sub.get_one::<String>("class").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let interest_rate = sub
        .get_one::<String>("interest-rate")
        .map(|s| parse_rate(s))
        .transpose()?;
    let date_added = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Utc::now().date_naive(),
    };

    let mut ledger = store.load();
    let id = new_id();
    ledger.liabilities.push(Liability {
        id: id.clone(),
        name: name.clone(),
        class: class.clone(),
        amount,
        interest_rate,
        notes: sub.get_one::<String>("notes").cloned(),
        date_added,
        order: None,
    });
    store.save(&ledger);
    println!("Added liability '{}' ({}) id={}", name, class, id);
    Ok(())
}

fn update(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut ledger = store.load();
    let Some(liability) = ledger.liabilities.iter_mut().find(|l| &l.id == id) else {
        bail!("Liability '{}' not found", id);
    };
    if let Some(name) = sub.get_one::<String>("name") {
        liability.name = name.clone();
    }
    if let Some(class) = sub.get_one::<String>("class") {
        liability.class = class.clone();
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        liability.amount = parse_amount(amount)?;
    }
    if let Some(rate) = sub.get_one::<String>("interest-rate") {
        liability.interest_rate = Some(parse_rate(rate)?);
    }
    if let Some(notes) = sub.get_one::<String>("notes") {
        liability.notes = Some(notes.clone());
    }
    store.save(&ledger);
    println!("Updated liability '{}'", id);
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut ledger = store.load();
    let before = ledger.liabilities.len();
    ledger.liabilities.retain(|l| &l.id != id);
    if ledger.liabilities.len() == before {
        bail!("Liability '{}' not found", id);
    }
    store.save(&ledger);
    println!("Removed liability '{}'", id);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = store.load();

    let members: Vec<&crate::models::Liability> = match sub.get_one::<String>("view") {
        None => ledger.liabilities.iter().collect(),
        Some(v) if v.as_str() == "all" => ledger.liabilities.iter().collect(),
        Some(v) => {
            let Some(view) = ledger
                .liability_views
                .iter()
                .find(|lv| lv.id == *v || lv.name.eq_ignore_ascii_case(v))
            else {
                bail!("Liability view '{}' not found", v);
            };
            liability_view_members(&ledger, view)
        }
    };

    let owned: Vec<crate::models::Liability> = members.into_iter().cloned().collect();
    let mut data = Vec::new();
    for l in sorted_for_display(&owned) {
        data.push(vec![
            l.id.clone(),
            l.name.clone(),
            class_display_name(&l.class, &ledger.liability_classes).to_string(),
            fmt_money(&l.amount),
            l.interest_rate.map(|r| format!("{}%", r)).unwrap_or_default(),
            l.date_added.to_string(),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Class", "Amount", "Rate", "Added"], data)
        );
    }
    Ok(())
}

fn apply_reorder(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let ids: Vec<String> = sub.get_many::<String>("ids").unwrap().cloned().collect();
    let mut ledger = store.load();
    ledger.liabilities = reorder(std::mem::take(&mut ledger.liabilities), &ids);
    store.save(&ledger);
    println!("Reordered {} liabilities", ids.len());
    Ok(())
}
