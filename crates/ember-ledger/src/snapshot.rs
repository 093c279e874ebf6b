//! Ledger state persistence.
//!
//! The full [`LedgerState`] is durable between calls: [`save`] writes it as
//! JSON, [`load`] restores it, and [`Ledger::from_state`] rewires the
//! collaborators around it. [`state_digest`] is a deterministic BLAKE3 hash
//! over the canonical bincode encoding — state maps are `BTreeMap`s, so the
//! encoding (and therefore the digest) is identical for identical states.
//!
//! [`Ledger::from_state`]: crate::ledger::Ledger::from_state

use std::fs;
use std::path::Path;

use ember_core::error::EmberError;

use crate::ledger::LedgerState;

/// Deterministic digest of the full ledger state.
pub fn state_digest(state: &LedgerState) -> Result<[u8; 32], EmberError> {
    let encoded = bincode::encode_to_vec(state, bincode::config::standard())
        .map_err(|e| EmberError::Snapshot(e.to_string()))?;
    Ok(blake3::hash(&encoded).into())
}

/// Persist the ledger state as JSON.
pub fn save(state: &LedgerState, path: &Path) -> Result<(), EmberError> {
    let json = serde_json::to_vec_pretty(state).map_err(|e| EmberError::Snapshot(e.to_string()))?;
    fs::write(path, json).map_err(|e| EmberError::Snapshot(e.to_string()))
}

/// Restore a previously saved ledger state.
pub fn load(path: &Path) -> Result<LedgerState, EmberError> {
    let bytes = fs::read(path).map_err(|e| EmberError::Snapshot(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| EmberError::Snapshot(e.to_string()))
}
