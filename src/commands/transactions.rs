// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::{Datelike, Utc};

use crate::models::{FlowKind, Transaction, new_id};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, parse_month, pretty_table};
use crate::views::class_display_name;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(s: &str) -> FlowKind {
    if s == "income" { FlowKind::Income } else { FlowKind::Expense }
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("type").unwrap());
    let category = sub.get_one::<String>("category").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Utc::now().date_naive(),
    };

    let mut ledger = store.load();
    let id = new_id();
    ledger.transactions.push(Transaction {
        id: id.clone(),
        kind,
        category: category.clone(),
        amount,
        description: description.clone(),
        merchant: sub.get_one::<String>("merchant").cloned(),
        date,
        reviewed: None,
        order: None,
    });
    store.save(&ledger);
    println!("Added transaction '{}' {} id={}", description, fmt_money(&amount), id);
    Ok(())
}

fn update(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut ledger = store.load();
    let Some(tx) = ledger.transactions.iter_mut().find(|t| &t.id == id) else {
        bail!("Transaction '{}' not found", id);
    };
    if let Some(category) = sub.get_one::<String>("category") {
        tx.category = category.clone();
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        tx.amount = parse_amount(amount)?;
    }
    if let Some(description) = sub.get_one::<String>("description") {
        tx.description = description.clone();
    }
    if let Some(merchant) = sub.get_one::<String>("merchant") {
        tx.merchant = Some(merchant.clone());
    }
    if let Some(reviewed) = sub.get_one::<bool>("reviewed") {
        tx.reviewed = Some(*reviewed);
    }
    store.save(&ledger);
    println!("Updated transaction '{}'", id);
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let mut ledger = store.load();
    let before = ledger.transactions.len();
    ledger.transactions.retain(|t| &t.id != id);
    if ledger.transactions.len() == before {
        bail!("Transaction '{}' not found", id);
    }
    store.save(&ledger);
    println!("Removed transaction '{}'", id);
    Ok(())
}

/// Rows for `tx list`, newest first; public so tests can drive it through
/// parsed CLI matches.
pub fn query_rows(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let ledger = store.load();
    let month = sub.get_one::<String>("month").map(|m| parse_month(m)).transpose()?;
    let mut rows: Vec<Transaction> = ledger
        .transactions
        .iter()
        .filter(|t| match month {
            Some((y, mo)) => t.date.year() == y && t.date.month() == mo,
            None => true,
        })
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = store.load();
    let rows = query_rows(store, sub)?;

    let mut data = Vec::new();
    for t in &rows {
        let kind = match t.kind {
            FlowKind::Income => "income",
            FlowKind::Expense => "expense",
        };
        data.push(vec![
            t.id.clone(),
            t.date.to_string(),
            kind.to_string(),
            // Category resolves like a class reference; a stale name shows as-is.
            class_display_name(&t.category, &ledger.cash_flow_categories).to_string(),
            fmt_money(&t.amount),
            t.description.clone(),
            t.merchant.clone().unwrap_or_default(),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Category", "Amount", "Description", "Merchant"],
                data
            )
        );
    }
    Ok(())
}

