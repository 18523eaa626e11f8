// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::Value;
use thiserror::Error;

use crate::models::Ledger;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid import format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    Replace,
    Merge,
}

/// Serializes the whole Ledger verbatim for backup; the same blob round-trips
/// back through `validate_import`.
pub fn export_ledger(ledger: &Ledger) -> String {
    // Ledger is composed entirely of serializable fields; this cannot fail.
    serde_json::to_string_pretty(ledger).unwrap_or_default()
}

/// Conventional backup file name, ISO date embedded.
pub fn backup_file_name(date: chrono::NaiveDate) -> String {
    format!("nestegg-backup-{}.json", date.format("%Y-%m-%d"))
}

/// A validated import blob. Collection defaulting fills anything the blob
/// omits, so merge decisions need to remember which configuration keys the
/// blob actually carried.
#[derive(Debug)]
pub struct ImportCandidate {
    pub ledger: Ledger,
    has_asset_classes: bool,
    has_liability_classes: bool,
    has_preferences: bool,
}

/// Structural acceptance check: the blob must parse as an object carrying
/// `assets`, `liabilities` and `transactions` as arrays. Deep entity-shape
/// validation is left to serde's field decoding; nothing is mutated here.
pub fn validate_import(blob: &str) -> Result<ImportCandidate, ImportError> {
    let value: Value = serde_json::from_str(blob)
        .map_err(|e| ImportError::InvalidFormat(format!("not parseable as JSON: {e}")))?;
    let obj = value
        .as_object()
        .ok_or_else(|| ImportError::InvalidFormat("top level is not an object".into()))?;
    for key in ["assets", "liabilities", "transactions"] {
        match obj.get(key) {
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(ImportError::InvalidFormat(format!("'{key}' is not an array")));
            }
            None => {
                return Err(ImportError::InvalidFormat(format!("missing '{key}' collection")));
            }
        }
    }
    let has_asset_classes = obj.contains_key("assetClasses");
    let has_liability_classes = obj.contains_key("liabilityClasses");
    let has_preferences = obj.contains_key("preferences");
    let ledger = serde_json::from_value(value)
        .map_err(|e| ImportError::InvalidFormat(format!("record does not decode: {e}")))?;
    Ok(ImportCandidate {
        ledger,
        has_asset_classes,
        has_liability_classes,
        has_preferences,
    })
}

/// Result of applying an import. On `Replace` the previous Ledger rides along
/// as a serialized safety backup for the caller to persist before anything
/// else; discarding it silently is not an option.
pub struct ImportOutcome {
    pub ledger: Ledger,
    pub safety_backup: Option<String>,
}

/// `Replace` swaps the whole store for the candidate. `Merge` concatenates
/// entity sequences (no de-duplication by id) but replaces taxonomy and
/// preference configuration wholesale when the candidate carried it; the
/// asymmetry is contractual.
pub fn apply_import(current: Ledger, candidate: ImportCandidate, mode: ImportMode) -> ImportOutcome {
    match mode {
        ImportMode::Replace => {
            let safety_backup = export_ledger(&current);
            ImportOutcome {
                ledger: candidate.ledger,
                safety_backup: Some(safety_backup),
            }
        }
        ImportMode::Merge => {
            let mut merged = current;
            let incoming = candidate.ledger;
            merged.assets.extend(incoming.assets);
            merged.liabilities.extend(incoming.liabilities);
            merged.transactions.extend(incoming.transactions);
            merged.budgets.extend(incoming.budgets);
            if candidate.has_asset_classes {
                merged.asset_classes = incoming.asset_classes;
            }
            if candidate.has_liability_classes {
                merged.liability_classes = incoming.liability_classes;
            }
            if candidate.has_preferences {
                merged.preferences = incoming.preferences;
            }
            ImportOutcome {
                ledger: merged,
                safety_backup: None,
            }
        }
    }
}
