//! # ember-fees — Transfer-fee splitting engine.
//!
//! All calculations use integer arithmetic only for determinism.
//!
//! A gross transfer amount decomposes into net/burn/liquidity/lottery via
//! flooring basis-point division: each fee part is
//! `floor(gross * bps / 10_000)` and the net amount is the remainder, so
//! the four parts always sum exactly to the gross amount — no base unit is
//! lost or invented.

pub mod engine;

pub use engine::{percentage_of_amount, FeeEngine};
