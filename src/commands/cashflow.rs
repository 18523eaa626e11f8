// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use crate::integrity::{TaxonomyKind, delete_taxonomy, dependents};
use crate::models::{CashFlowCategory, CashFlowGroup, CashFlowLineItem, FlowKind, Ledger, new_id, unique_slug};
use crate::ordering::{reorder, sorted_for_display};
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use crate::views::class_display_name;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("item", side)) => item_handle(store, side),
        Some(("group", side)) => taxonomy_handle(store, side, TaxonomyKind::CashFlowGroup),
        Some(("category", side)) => taxonomy_handle(store, side, TaxonomyKind::CashFlowCategory),
        _ => Ok(()),
    }
}

fn item_handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind = if sub.get_one::<String>("type").unwrap() == "income" {
                FlowKind::Income
            } else {
                FlowKind::Expense
            };
            let mut ledger = store.load();
            let group_id = resolve_group_arg(&ledger, sub.get_one::<String>("group"))?;
            let category_id = resolve_category_arg(&ledger, sub.get_one::<String>("category"))?;
            let id = new_id();
            ledger.cash_flow_line_items.push(CashFlowLineItem {
                id: id.clone(),
                name: name.clone(),
                kind,
                group_id: group_id.flatten(),
                category_id: category_id.flatten(),
                notes: sub.get_one::<String>("notes").cloned(),
                order: None,
            });
            store.save(&ledger);
            println!("Added line item '{}' id={}", name, id);
        }
        Some(("update", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let mut ledger = store.load();
            let group_id = resolve_group_arg(&ledger, sub.get_one::<String>("group"))?;
            let category_id = resolve_category_arg(&ledger, sub.get_one::<String>("category"))?;
            let Some(item) = ledger.cash_flow_line_items.iter_mut().find(|i| &i.id == id) else {
                bail!("Line item '{}' not found", id);
            };
            if let Some(name) = sub.get_one::<String>("name") {
                item.name = name.clone();
            }
            if let Some(change) = group_id {
                item.group_id = change;
            }
            if let Some(change) = category_id {
                item.category_id = change;
            }
            if let Some(notes) = sub.get_one::<String>("notes") {
                item.notes = Some(notes.clone());
            }
            store.save(&ledger);
            println!("Updated line item '{}'", id);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let mut ledger = store.load();
            let before = ledger.cash_flow_line_items.len();
            ledger.cash_flow_line_items.retain(|i| &i.id != id);
            if ledger.cash_flow_line_items.len() == before {
                bail!("Line item '{}' not found", id);
            }
            store.save(&ledger);
            println!("Removed line item '{}'", id);
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let ledger = store.load();
            let mut data = Vec::new();
            for i in sorted_for_display(&ledger.cash_flow_line_items) {
                let kind = match i.kind {
                    FlowKind::Income => "income",
                    FlowKind::Expense => "expense",
                };
                data.push(vec![
                    i.id.clone(),
                    i.name.clone(),
                    kind.to_string(),
                    // Dangling ids show as the raw id; "(ungrouped)" when unset.
                    i.group_id
                        .as_deref()
                        .map(|g| class_display_name(g, &ledger.cash_flow_groups).to_string())
                        .unwrap_or_else(|| "(ungrouped)".into()),
                    i.category_id
                        .as_deref()
                        .map(|c| class_display_name(c, &ledger.cash_flow_categories).to_string())
                        .unwrap_or_else(|| "(uncategorized)".into()),
                ]);
            }
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                println!(
                    "{}",
                    pretty_table(&["Id", "Name", "Type", "Group", "Category"], data)
                );
            }
        }
        Some(("reorder", sub)) => {
            let ids: Vec<String> = sub.get_many::<String>("ids").unwrap().cloned().collect();
            let mut ledger = store.load();
            ledger.cash_flow_line_items =
                reorder(std::mem::take(&mut ledger.cash_flow_line_items), &ids);
            store.save(&ledger);
            println!("Reordered {} line item(s)", ids.len());
        }
        _ => {}
    }
    Ok(())
}

// Group/category args accept an id or a name, stored as the canonical id.
// Outer None: flag absent. Inner None: empty value, meaning unset the field
// (back to ungrouped/uncategorized).
fn resolve_group_arg(ledger: &Ledger, arg: Option<&String>) -> Result<Option<Option<String>>> {
    match arg {
        None => Ok(None),
        Some(text) if text.is_empty() => Ok(Some(None)),
        Some(text) => match crate::views::resolve_class(text, &ledger.cash_flow_groups) {
            Some(g) => Ok(Some(Some(g.id.clone()))),
            None => bail!("Cash-flow group '{}' not found", text),
        },
    }
}

fn resolve_category_arg(ledger: &Ledger, arg: Option<&String>) -> Result<Option<Option<String>>> {
    match arg {
        None => Ok(None),
        Some(text) if text.is_empty() => Ok(Some(None)),
        Some(text) => match crate::views::resolve_class(text, &ledger.cash_flow_categories) {
            Some(c) => Ok(Some(Some(c.id.clone()))),
            None => bail!("Cash-flow category '{}' not found", text),
        },
    }
}

fn taxonomy_handle(store: &Store, m: &clap::ArgMatches, kind: TaxonomyKind) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let mut ledger = store.load();
            let id = match kind {
                TaxonomyKind::CashFlowGroup => {
                    let id = unique_slug(name, |s| ledger.cash_flow_groups.iter().any(|g| g.id == s));
                    ledger.cash_flow_groups.push(CashFlowGroup {
                        id: id.clone(),
                        name: name.clone(),
                        order: None,
                    });
                    id
                }
                TaxonomyKind::CashFlowCategory => {
                    let id =
                        unique_slug(name, |s| ledger.cash_flow_categories.iter().any(|c| c.id == s));
                    ledger.cash_flow_categories.push(CashFlowCategory {
                        id: id.clone(),
                        name: name.clone(),
                        order: None,
                    });
                    id
                }
                _ => unreachable!("cashflow command only routes cash-flow kinds"),
            };
            store.save(&ledger);
            println!("Added {} '{}' id={}", kind.label(), name, id);
        }
        Some(("rename", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            let mut ledger = store.load();
            let found = match kind {
                TaxonomyKind::CashFlowGroup => ledger
                    .cash_flow_groups
                    .iter_mut()
                    .find(|g| &g.id == id)
                    .map(|g| g.name = name.clone())
                    .is_some(),
                TaxonomyKind::CashFlowCategory => ledger
                    .cash_flow_categories
                    .iter_mut()
                    .find(|c| &c.id == id)
                    .map(|c| c.name = name.clone())
                    .is_some(),
                _ => unreachable!("cashflow command only routes cash-flow kinds"),
            };
            if !found {
                bail!("{} '{}' not found", kind.label(), id);
            }
            store.save(&ledger);
            println!("Renamed {} '{}' to '{}'", kind.label(), id, name);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let force = sub.get_flag("force");
            let mut ledger = store.load();
            let refs = dependents(&ledger, kind, id);
            if refs > 0 && !force {
                bail!(
                    "{} '{}' still has {} dependent line item(s); pass --force to delete and \
                     clear those references",
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
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let ledger = store.load();
            let data: Vec<Vec<String>> = match kind {
                TaxonomyKind::CashFlowGroup => sorted_for_display(&ledger.cash_flow_groups)
                    .into_iter()
                    .map(|g| {
                        vec![
                            g.id.clone(),
                            g.name.clone(),
                            dependents(&ledger, kind, &g.id).to_string(),
                        ]
                    })
                    .collect(),
                TaxonomyKind::CashFlowCategory => sorted_for_display(&ledger.cash_flow_categories)
                    .into_iter()
                    .map(|c| {
                        vec![
                            c.id.clone(),
                            c.name.clone(),
                            dependents(&ledger, kind, &c.id).to_string(),
                        ]
                    })
                    .collect(),
                _ => unreachable!("cashflow command only routes cash-flow kinds"),
            };
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                println!("{}", pretty_table(&["Id", "Name", "In use by"], data));
            }
        }
        Some(("reorder", sub)) => {
            let ids: Vec<String> = sub.get_many::<String>("ids").unwrap().cloned().collect();
            let mut ledger = store.load();
            match kind {
                TaxonomyKind::CashFlowGroup => {
                    ledger.cash_flow_groups = reorder(std::mem::take(&mut ledger.cash_flow_groups), &ids);
                }
                TaxonomyKind::CashFlowCategory => {
                    ledger.cash_flow_categories =
                        reorder(std::mem::take(&mut ledger.cash_flow_categories), &ids);
                }
                _ => unreachable!("cashflow command only routes cash-flow kinds"),
            }
            store.save(&ledger);
            println!("Reordered {} {} entries", ids.len(), kind.label());
        }
        _ => {}
    }
    Ok(())
}
