//! Trait interfaces for the Ember ledger.
//!
//! These traits define the contracts between crates:
//! - [`FeeSplitter`] — fee math engine (ember-fees implements)
//! - [`DrawSource`] — injected randomness for winner selection (ember-lottery implements)
//! - [`LiquidityRouter`] — external DEX collaborator (callers supply an implementation)

use crate::config::FeeConfig;
use crate::error::{FeeError, LiquidityError};
use crate::types::{Address, FeeBreakdown};

/// Pure decomposition of a gross transfer amount into net and fee parts.
///
/// All fee math uses integer bps arithmetic with flooring division, so the
/// four parts always sum exactly to the gross amount. Implemented by the
/// fee engine (ember-fees).
pub trait FeeSplitter: Send + Sync {
    /// Split `gross` according to `config`.
    fn split(&self, config: &FeeConfig, gross: u128) -> Result<FeeBreakdown, FeeError>;
}

/// Injected randomness for lottery winner selection.
///
/// The core never reads ambient entropy; every draw is a pure function of
/// the source's own state and the draw number, so runs are reproducible.
pub trait DrawSource: Send {
    /// An index in `[0, bound)` for the given draw number.
    ///
    /// `bound` is the current eligible-set size and is always nonzero when
    /// the ledger calls this (an empty set skips the draw entirely).
    fn draw_index(&mut self, draw_number: u64, bound: u64) -> u64;
}

/// Outcome reported by a successful router call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidityReceipt {
    /// Tokens actually consumed by the router.
    pub token_used: u128,
    /// Pair-currency amount actually consumed.
    pub pair_used: u128,
}

/// External DEX router capability.
///
/// The ledger only calls this and consumes success or failure; the router
/// is never reimplemented here. The call is synchronous and runs inside the
/// accumulator's `Swapping` phase, so implementations cannot re-trigger a
/// swap however they behave.
pub trait LiquidityRouter: Send {
    /// Provision liquidity from `token_amount` tokens and `pair_amount`
    /// pair currency, respecting the given minimums and deadline.
    fn add_liquidity(
        &mut self,
        token_amount: u128,
        pair_amount: u128,
        min_token: u128,
        min_pair: u128,
        recipient: Address,
        deadline: u64,
    ) -> Result<LiquidityReceipt, LiquidityError>;
}
