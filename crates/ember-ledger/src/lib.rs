//! # ember-ledger
//! The Ember token ledger: balances, allowances, the fee pipeline, the
//! liquidity accumulator state machine, and state snapshots.
//!
//! Execution is strictly single-threaded and transactional: every transfer
//! runs to completion as one unit of work, and any failure aborts it with
//! no partial state mutation. The only nested call is the synchronous
//! liquidity-router invocation, guarded by the accumulator's `Swapping`
//! phase.

pub mod genesis;
pub mod ledger;
pub mod liquidity;
pub mod snapshot;

pub use ledger::{Ledger, LedgerState, PayoutSummary, TransferReceipt};
pub use liquidity::{LiquidityAccumulator, SwapOutcome, SwapPhase};
