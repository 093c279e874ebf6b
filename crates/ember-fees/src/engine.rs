//! Fee engine implementing the [`FeeSplitter`] trait.
//!
//! Pure computation: the engine holds no state of its own; the only input
//! besides the gross amount is the [`FeeConfig`] threaded in by the caller.

use ember_core::config::FeeConfig;
use ember_core::constants::BPS_PRECISION;
use ember_core::error::FeeError;
use ember_core::traits::FeeSplitter;
use ember_core::types::FeeBreakdown;

/// The production fee splitter.
///
/// Implements [`FeeSplitter`] with flooring bps division and checked
/// arithmetic. A validated [`FeeConfig`] guarantees the fee parts never
/// exceed the gross amount.
#[derive(Debug, Clone, Default)]
pub struct FeeEngine;

impl FeeEngine {
    /// Create a new FeeEngine.
    pub fn new() -> Self {
        Self
    }
}

/// The single flooring fee primitive: `floor(amount * bps / 10_000)`.
pub fn percentage_of_amount(amount: u128, bps: u16) -> Result<u128, FeeError> {
    amount
        .checked_mul(bps as u128)
        .map(|v| v / BPS_PRECISION)
        .ok_or(FeeError::ArithmeticOverflow)
}

impl FeeSplitter for FeeEngine {
    fn split(&self, config: &FeeConfig, gross: u128) -> Result<FeeBreakdown, FeeError> {
        let burn = percentage_of_amount(gross, config.burn_bps)?;
        let liquidity = percentage_of_amount(gross, config.liquidity_bps)?;
        let lottery = percentage_of_amount(gross, config.lottery_bps)?;

        // Flooring guarantees burn + liquidity + lottery <= gross for any
        // validated config, so the subtractions cannot underflow.
        let net = gross
            .checked_sub(burn)
            .and_then(|v| v.checked_sub(liquidity))
            .and_then(|v| v.checked_sub(lottery))
            .ok_or(FeeError::ArithmeticOverflow)?;

        Ok(FeeBreakdown {
            net,
            burn,
            liquidity,
            lottery,
        })
    }
}
