//! # ember-lottery — Eligibility tracking and winner draws.
//!
//! Maintains the set of lottery-eligible addresses (nonzero balance, not
//! exempt) and the append-only winner history. Winner selection goes
//! through an injected [`DrawSource`](ember_core::traits::DrawSource) so
//! every draw is reproducible; no ambient entropy is ever read.
//!
//! Membership mutators are restricted to the token contract that the
//! tracker was bound to at construction — any other caller is rejected
//! with the exact authorization message asserted by the interface tests.

pub mod draw;
pub mod eligibility;
pub mod pool;

pub use draw::{HashDraw, SeededRngDraw};
pub use eligibility::EligibilityTracker;
pub use pool::Lottery;
