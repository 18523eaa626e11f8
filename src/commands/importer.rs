// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;

use crate::backup::{ImportMode, apply_import, backup_file_name, validate_import};
use crate::store::Store;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").unwrap().trim();
    let mode = match m.get_one::<String>("mode").unwrap().as_str() {
        "replace" => ImportMode::Replace,
        _ => ImportMode::Merge,
    };

    let blob = std::fs::read_to_string(path).with_context(|| format!("Open backup {}", path))?;
    // Validation failures surface before anything is touched; import is the
    // one storage path where the user gets an explicit error.
    let candidate = validate_import(&blob)?;

    let current = store.load();
    let outcome = apply_import(current, candidate, mode);

    if let Some(safety) = &outcome.safety_backup {
        let dir = m
            .get_one::<String>("backup-dir")
            .map(PathBuf::from)
            .or_else(|| store.path().parent().map(|p| p.to_path_buf()))
            .unwrap_or_default();
        let backup_path = dir.join(format!(
            "pre-replace-{}",
            backup_file_name(Utc::now().date_naive())
        ));
        std::fs::write(&backup_path, safety)
            .with_context(|| format!("Write safety backup {}", backup_path.display()))?;
        println!("Safety backup written to {}", backup_path.display());
    }

    store.save(&outcome.ledger);
    println!(
        "Imported {} ({} assets, {} liabilities, {} transactions now in store)",
        path,
        outcome.ledger.assets.len(),
        outcome.ledger.liabilities.len(),
        outcome.ledger.transactions.len()
    );
    Ok(())
}
