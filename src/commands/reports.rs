// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;

use crate::aggregates::{
    asset_allocation, liability_allocation, monthly_cash_flow, net_worth, net_worth_change,
};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("net-worth", sub)) => net_worth_report(store, sub)?,
        Some(("cashflow", sub)) => cashflow_report(store, sub)?,
        Some(("allocation", sub)) => allocation_report(store, sub)?,
        Some(("change", sub)) => change_report(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn net_worth_report(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = store.load();
    let assets: rust_decimal::Decimal = ledger.assets.iter().map(|a| a.value).sum();
    let liabilities: rust_decimal::Decimal = ledger.liabilities.iter().map(|l| l.amount).sum();
    let data = vec![vec![
        fmt_money(&assets),
        fmt_money(&liabilities),
        fmt_money(&net_worth(&ledger)),
    ]];
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Assets", "Liabilities", "Net worth"], data)
        );
    }
    Ok(())
}

fn cashflow_report(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (year, month) = parse_month(sub.get_one::<String>("month").unwrap())?;
    let ledger = store.load();
    let flow = monthly_cash_flow(&ledger, year, month);
    if maybe_print_json(json_flag, jsonl_flag, &flow)? {
        return Ok(());
    }
    let data = vec![vec![
        format!("{:04}-{:02}", year, month),
        fmt_money(&flow.income),
        fmt_money(&flow.expenses),
        fmt_money(&flow.net()),
    ]];
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Net"], data)
    );
    Ok(())
}

fn allocation_report(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let side = sub.get_one::<String>("side").unwrap();
    let ledger = store.load();
    let buckets = if side == "liability" {
        liability_allocation(&ledger)
    } else {
        asset_allocation(&ledger)
    };
    if maybe_print_json(json_flag, jsonl_flag, &buckets)? {
        return Ok(());
    }
    let data = buckets
        .iter()
        .map(|b| {
            vec![
                b.name.clone(),
                fmt_money(&b.value),
                format!("{:.1}%", b.percentage.round_dp(1)),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Class", "Value", "Share"], data));
    Ok(())
}

fn change_report(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let days = *sub.get_one::<u64>("days").unwrap();
    let ledger = store.load();
    let change = net_worth_change(&ledger, days, Utc::now().date_naive());
    if maybe_print_json(json_flag, jsonl_flag, &change)? {
        return Ok(());
    }
    let data = vec![vec![
        format!("{}d", days),
        fmt_money(&change.delta),
        format!("{:.1}%", change.percentage.round_dp(1)),
    ]];
    println!("{}", pretty_table(&["Window", "Change", "Change %"], data));
    Ok(())
}
