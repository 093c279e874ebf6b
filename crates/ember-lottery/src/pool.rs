//! Lottery cadence and winner history.
//!
//! The pool's token balance lives in the ledger under the pool address;
//! this module owns everything else: the eligibility tracker, the cadence
//! counter, and the append-only winner list. A draw is attempted after
//! every `draw_interval`th qualifying transfer. An empty eligible set
//! skips the draw — a defined no-op, not an error — and the cadence
//! counter resets either way.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use ember_core::traits::DrawSource;
use ember_core::types::Address;

use crate::eligibility::EligibilityTracker;

/// Result of a triggered draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    /// The selected winner.
    pub winner: Address,
    /// Zero-based draw number (position in the winner history).
    pub draw_number: u64,
}

/// Lottery state: eligibility, cadence, and winners.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[derive(bincode::Encode, bincode::Decode)]
pub struct Lottery {
    tracker: EligibilityTracker,
    /// Winners in draw order. Only ever appended to.
    winners: Vec<Address>,
    /// Qualifying transfers since the last draw attempt.
    transfers_since_draw: u64,
    /// Completed draws (also the next draw number).
    draws: u64,
    /// Qualifying transfers between draw attempts.
    draw_interval: u64,
}

impl Lottery {
    /// Create a lottery bound to the given token address.
    pub fn new(token: Address, draw_interval: u64) -> Self {
        Self {
            tracker: EligibilityTracker::new(token),
            winners: Vec::new(),
            transfers_since_draw: 0,
            draws: 0,
            draw_interval,
        }
    }

    /// The eligibility tracker.
    pub fn tracker(&self) -> &EligibilityTracker {
        &self.tracker
    }

    /// Mutable access for the owning ledger.
    pub fn tracker_mut(&mut self) -> &mut EligibilityTracker {
        &mut self.tracker
    }

    /// Winner history in draw order.
    pub fn winners(&self) -> &[Address] {
        &self.winners
    }

    /// Number of completed draws.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Qualifying transfers counted toward the next draw.
    pub fn transfers_since_draw(&self) -> u64 {
        self.transfers_since_draw
    }

    /// Register one qualifying transfer and attempt a draw when due.
    ///
    /// Returns the draw outcome when the cadence fired and an eligible
    /// address was available.
    pub fn on_qualifying_transfer(
        &mut self,
        source: &mut dyn DrawSource,
    ) -> Option<DrawOutcome> {
        if self.draw_interval == 0 {
            return None;
        }
        self.transfers_since_draw += 1;
        if self.transfers_since_draw < self.draw_interval {
            return None;
        }
        // Due: the counter resets whether or not a winner can be drawn.
        self.transfers_since_draw = 0;
        self.attempt_draw(source)
    }

    fn attempt_draw(&mut self, source: &mut dyn DrawSource) -> Option<DrawOutcome> {
        let bound = self.tracker.len() as u64;
        if bound == 0 {
            warn!(draw_number = self.draws, "draw skipped: no eligible addresses");
            return None;
        }
        let index = source.draw_index(self.draws, bound);
        let winner = self
            .tracker
            .member_at(index as usize)
            .expect("draw index is reduced modulo the member count");
        let outcome = DrawOutcome {
            winner,
            draw_number: self.draws,
        };
        self.draws += 1;
        self.winners.push(winner);
        info!(%winner, draw_number = outcome.draw_number, "lottery winner drawn");
        Some(outcome)
    }
}
