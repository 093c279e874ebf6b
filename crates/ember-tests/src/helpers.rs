//! Shared test helpers for E2E and adversarial tests.

use std::sync::{Arc, Mutex};

use ember_core::config::TokenConfig;
use ember_core::error::LiquidityError;
use ember_core::traits::{DrawSource, LiquidityReceipt, LiquidityRouter};
use ember_core::types::Address;
use ember_ledger::{genesis, Ledger};
use ember_lottery::HashDraw;

/// Simple address from a seed byte.
pub fn addr(seed: u8) -> Address {
    Address::from_bytes([seed; 20])
}

/// The deployer / fee admin used across tests.
pub fn deployer() -> Address {
    addr(0xD0)
}

/// Shared call log for [`RecordingRouter`]: one entry per router call,
/// carrying the token amount offered.
pub type RouterLog = Arc<Mutex<Vec<u128>>>;

/// Router double that records every call and consumes everything offered.
pub struct RecordingRouter {
    log: RouterLog,
    fail: bool,
}

impl RecordingRouter {
    pub fn succeeding(log: RouterLog) -> Box<Self> {
        Box::new(Self { log, fail: false })
    }

    pub fn failing(log: RouterLog) -> Box<Self> {
        Box::new(Self { log, fail: true })
    }
}

impl LiquidityRouter for RecordingRouter {
    fn add_liquidity(
        &mut self,
        token_amount: u128,
        pair_amount: u128,
        _min_token: u128,
        _min_pair: u128,
        _recipient: Address,
        _deadline: u64,
    ) -> Result<LiquidityReceipt, LiquidityError> {
        self.log.lock().unwrap().push(token_amount);
        if self.fail {
            return Err(LiquidityError::RouterFailure("pair unavailable".into()));
        }
        Ok(LiquidityReceipt {
            token_used: token_amount,
            pair_used: pair_amount,
        })
    }
}

/// Always selects the given index (modulo the eligible count).
pub struct FixedDraw(pub u64);

impl DrawSource for FixedDraw {
    fn draw_index(&mut self, _draw_number: u64, bound: u64) -> u64 {
        self.0 % bound
    }
}

/// A fully wired ledger with default config and the production draw source.
pub fn test_token() -> (Ledger, RouterLog) {
    test_token_with(TokenConfig::default())
}

/// A fully wired ledger with a custom config.
pub fn test_token_with(config: TokenConfig) -> (Ledger, RouterLog) {
    let log: RouterLog = Arc::new(Mutex::new(Vec::new()));
    let ledger = genesis::genesis(
        config,
        deployer(),
        RecordingRouter::succeeding(log.clone()),
        Box::new(HashDraw::default()),
    )
    .unwrap();
    (ledger, log)
}

/// Sum of every account balance, for conservation checks.
pub fn sum_of_balances(ledger: &Ledger) -> u128 {
    ledger.iter_balances().map(|(_, balance)| balance).sum()
}
