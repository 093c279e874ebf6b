//! Liquidity accumulator state machine.
//!
//! The accumulator's held balance is its ledger account; this module owns
//! the trigger threshold and the `Idle → Swapping → Idle` phase flag. The
//! flag is an explicit single-writer reentrancy guard: the ledger checks
//! it before triggering a swap and holds it across the nested router call,
//! so transfers processed during the swap cannot re-enter the trigger
//! logic.

use serde::{Deserialize, Serialize};

use ember_core::error::LiquidityError;

/// Phase of the liquidity provisioning state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[derive(bincode::Encode, bincode::Decode)]
pub enum SwapPhase {
    /// No swap in flight; credits may trigger one.
    Idle,
    /// A router call is in progress; triggering is blocked.
    Swapping,
}

/// Result of the liquidity trigger check after a transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Held balance below threshold, or a swap was already in flight.
    NotTriggered,
    /// The router accepted the swap; `token_amount` tokens were consumed.
    Provisioned { token_amount: u128 },
    /// The router call failed; fee accounting stands, tokens were retained.
    Failed { reason: String },
}

/// Threshold and phase flag for liquidity provisioning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[derive(bincode::Encode, bincode::Decode)]
pub struct LiquidityAccumulator {
    threshold: u128,
    phase: SwapPhase,
}

impl LiquidityAccumulator {
    /// Create an idle accumulator with the given trigger threshold.
    pub fn new(threshold: u128) -> Self {
        Self {
            threshold,
            phase: SwapPhase::Idle,
        }
    }

    /// Held tokens required before a swap is triggered.
    pub fn threshold(&self) -> u128 {
        self.threshold
    }

    /// Current phase.
    pub fn phase(&self) -> SwapPhase {
        self.phase
    }

    /// Whether a credit bringing the held balance to `held` should trigger
    /// a swap now.
    pub fn should_trigger(&self, held: u128) -> bool {
        self.phase == SwapPhase::Idle && held >= self.threshold
    }

    /// Enter the `Swapping` phase.
    pub fn begin_swap(&mut self) -> Result<(), LiquidityError> {
        if self.phase == SwapPhase::Swapping {
            return Err(LiquidityError::SwapInProgress);
        }
        self.phase = SwapPhase::Swapping;
        Ok(())
    }

    /// Return to `Idle`, whether the router call succeeded or failed.
    pub fn finish_swap(&mut self) {
        self.phase = SwapPhase::Idle;
    }
}
