//! Genesis wiring and well-known internal addresses.
//!
//! The ledger's internal accounts (its own treasury identity, the
//! liquidity accumulator, the lottery pool, and the pair sink) are derived
//! deterministically from fixed labels, so every deployment computes the
//! identical addresses. All four are fee- and eligibility-exempt from the
//! start: fee accounting never double-counts internal transfers.

use ember_core::config::TokenConfig;
use ember_core::error::LedgerError;
use ember_core::traits::{DrawSource, LiquidityRouter};
use ember_core::types::Address;

use crate::ledger::Ledger;

/// Derive a well-known address from a fixed label.
fn derived_address(label: &[u8]) -> Address {
    let digest = blake3::hash(label);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest.as_bytes()[..20]);
    Address::from_bytes(bytes)
}

/// The ledger's own identity: the authorized caller of lottery mutators.
pub fn token_address() -> Address {
    derived_address(b"ember token contract")
}

/// Account holding accumulated liquidity-fee tokens.
pub fn liquidity_address() -> Address {
    derived_address(b"ember liquidity accumulator")
}

/// Account holding the lottery pool between draws.
pub fn lottery_address() -> Address {
    derived_address(b"ember lottery pool")
}

/// Sink for tokens handed to the router during provisioning.
pub fn pair_address() -> Address {
    derived_address(b"ember pair sink")
}

/// Build a fully wired ledger and perform the one-shot genesis mint of
/// `config.initial_supply` to `deployer`.
pub fn genesis(
    config: TokenConfig,
    deployer: Address,
    router: Box<dyn LiquidityRouter>,
    draw: Box<dyn DrawSource>,
) -> Result<Ledger, LedgerError> {
    let initial_supply = config.initial_supply;
    let mut ledger = Ledger::new(config, deployer, router, draw);
    ledger.mint(deployer, initial_supply)?;
    Ok(ledger)
}
