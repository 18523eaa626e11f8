// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::json;

use crate::backup::{backup_file_name, export_ledger};
use crate::models::FlowKind;
use crate::store::Store;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ledger", sub)) => export_whole_ledger(store, sub),
        Some(("tx", sub)) => export_transactions(store, sub),
        _ => Ok(()),
    }
}

fn export_whole_ledger(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let out = match sub.get_one::<String>("out") {
        Some(p) => p.clone(),
        None => backup_file_name(Utc::now().date_naive()),
    };
    let ledger = store.load();
    std::fs::write(&out, export_ledger(&ledger)).with_context(|| format!("Write backup {}", out))?;
    println!("Exported ledger to {}", out);
    Ok(())
}

fn export_transactions(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let ledger = store.load();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "type", "category", "amount", "description", "merchant"])?;
            for t in &ledger.transactions {
                let kind = match t.kind {
                    FlowKind::Income => "income",
                    FlowKind::Expense => "expense",
                };
                wtr.write_record([
                    t.date.to_string(),
                    kind.to_string(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.description.clone(),
                    t.merchant.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for t in &ledger.transactions {
                items.push(json!({
                    "date": t.date, "type": t.kind, "category": t.category,
                    "amount": t.amount, "description": t.description, "merchant": t.merchant
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
