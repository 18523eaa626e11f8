// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{error, warn};
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Ledger;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Nestegg", "nestegg"));

const SLOT_NAME: &str = "ledger.json";

/// Storage-layer failures. Never propagated out of `load`/`save`; read paths
/// must stay total and always hand back some valid Ledger.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage slot unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
    #[error("stored record is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn slot_path() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("NESTEGG_DATA_DIR") {
        let dir = PathBuf::from(dir);
        fs::create_dir_all(&dir).context("Failed to create data dir")?;
        return Ok(dir.join(SLOT_NAME));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join(SLOT_NAME))
}

/// One named slot holding one serialized Ledger. Every mutation is a
/// load-mutate-save cycle over the whole blob; last writer wins.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn open_default() -> Result<Store> {
        Ok(Store { path: slot_path()? })
    }

    pub fn at_path<P: AsRef<Path>>(path: P) -> Store {
        Store {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total read: an absent or unparseable slot degrades to the seed Ledger,
    /// and a partial record is filled out by the per-collection defaults.
    pub fn load(&self) -> Ledger {
        let mut ledger = match self.try_read() {
            Ok(Some(ledger)) => ledger,
            Ok(None) => Ledger::default(),
            Err(e) => {
                warn!("loading {}: {e}; starting from seed ledger", self.path.display());
                Ledger::default()
            }
        };
        migrate_legacy_categories(&mut ledger);
        ledger
    }

    fn try_read(&self) -> Result<Option<Ledger>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Whole-blob write. Failures are logged, never thrown; a lost write must
    /// not take down the reading/rendering path.
    pub fn save(&self, ledger: &Ledger) {
        if let Err(e) = self.try_write(ledger) {
            error!("saving {}: {e}; changes not persisted", self.path.display());
        }
    }

    fn try_write(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(ledger)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// Early records tagged transactions with a fixed category enum instead of a
/// CashFlowCategory reference. Map those tags onto the seeded category names
/// so the resolver finds them.
fn migrate_legacy_categories(ledger: &mut Ledger) {
    for tx in &mut ledger.transactions {
        let mapped = match tx.category.as_str() {
            "salary" | "paycheck" => "Income",
            "rent" | "mortgage" => "Housing",
            "groceries" | "dining" => "Food",
            "gas" | "car" => "Transport",
            _ => continue,
        };
        tx.category = mapped.to_string();
    }
}
