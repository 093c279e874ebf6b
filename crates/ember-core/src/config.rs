//! Fee and token configuration.
//!
//! [`FeeConfig`] is the single mutable knob of the fee engine. It is only
//! ever replaced through the bounds-validating [`FeeConfig::with_fee`], so a
//! stored configuration is valid by construction.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BURN_FEE_BPS, DEFAULT_LIQUIDITY_FEE_BPS, DEFAULT_LIQUIDITY_THRESHOLD,
    DEFAULT_LOTTERY_FEE_BPS, DRAW_INTERVAL, INITIAL_SUPPLY, MAX_TOTAL_FEE_BPS,
};
use crate::error::FeeError;

/// Which of the three fee rates an admin operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeKind {
    /// Supply-destroying portion.
    Burn,
    /// Portion accumulated for DEX liquidity provisioning.
    Liquidity,
    /// Portion pooled for the periodic draw.
    Lottery,
}

/// Transfer-fee rates in basis points.
///
/// Invariant: `burn_bps + liquidity_bps + lottery_bps <= 10_000`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[derive(bincode::Encode, bincode::Decode)]
pub struct FeeConfig {
    /// Burn rate in bps.
    pub burn_bps: u16,
    /// Liquidity rate in bps.
    pub liquidity_bps: u16,
    /// Lottery rate in bps.
    pub lottery_bps: u16,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            burn_bps: DEFAULT_BURN_FEE_BPS,
            liquidity_bps: DEFAULT_LIQUIDITY_FEE_BPS,
            lottery_bps: DEFAULT_LOTTERY_FEE_BPS,
        }
    }
}

impl FeeConfig {
    /// Sum of the three rates in bps.
    pub fn total_bps(&self) -> u32 {
        self.burn_bps as u32 + self.liquidity_bps as u32 + self.lottery_bps as u32
    }

    /// Check the `total <= 10_000` invariant.
    pub fn validate(&self) -> Result<(), FeeError> {
        let total = self.total_bps();
        if total > MAX_TOTAL_FEE_BPS {
            return Err(FeeError::InvalidFeeConfiguration { total_bps: total });
        }
        Ok(())
    }

    /// Return a copy with one rate replaced, re-validated.
    pub fn with_fee(&self, kind: FeeKind, bps: u16) -> Result<Self, FeeError> {
        let mut updated = *self;
        match kind {
            FeeKind::Burn => updated.burn_bps = bps,
            FeeKind::Liquidity => updated.liquidity_bps = bps,
            FeeKind::Lottery => updated.lottery_bps = bps,
        }
        updated.validate()?;
        Ok(updated)
    }

    /// The rate for one fee kind.
    pub fn rate(&self, kind: FeeKind) -> u16 {
        match kind {
            FeeKind::Burn => self.burn_bps,
            FeeKind::Liquidity => self.liquidity_bps,
            FeeKind::Lottery => self.lottery_bps,
        }
    }
}

/// Genesis-time token parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[derive(bincode::Encode, bincode::Decode)]
pub struct TokenConfig {
    /// Human-readable token name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Supply minted by the one-shot genesis mint.
    pub initial_supply: u128,
    /// Qualifying transfers between draw attempts.
    pub draw_interval: u64,
    /// Accumulated liquidity tokens required before a swap triggers.
    pub liquidity_threshold: u128,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "Ember".to_string(),
            symbol: "EMBR".to_string(),
            initial_supply: INITIAL_SUPPLY,
            draw_interval: DRAW_INTERVAL,
            liquidity_threshold: DEFAULT_LIQUIDITY_THRESHOLD,
        }
    }
}
