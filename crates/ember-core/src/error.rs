//! Error types for the Ember ledger.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance: have {have}, need {need}")] InsufficientBalance { have: u128, need: u128 },
    #[error("transfer to the zero address")] ZeroAddress,
    #[error("ledger already initialized")] AlreadyInitialized,
    #[error("insufficient allowance: have {have}, need {need}")] InsufficientAllowance { have: u128, need: u128 },
    #[error("value overflow")] ValueOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeError {
    #[error("unauthorized: caller is not the fee admin")] Unauthorized,
    #[error("invalid fee configuration: total {total_bps} bps exceeds 10000")] InvalidFeeConfiguration { total_bps: u32 },
    #[error("arithmetic overflow")] ArithmeticOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LotteryError {
    #[error("Only the token contract may call this function")] Unauthorized,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiquidityError {
    #[error("router call failed: {0}")] RouterFailure(String),
    #[error("swap already in progress")] SwapInProgress,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid length")] InvalidLength,
    #[error("invalid hex")] InvalidHex,
}

#[derive(Error, Debug)]
pub enum EmberError {
    #[error(transparent)] Ledger(#[from] LedgerError),
    #[error(transparent)] Fee(#[from] FeeError),
    #[error(transparent)] Lottery(#[from] LotteryError),
    #[error(transparent)] Liquidity(#[from] LiquidityError),
    #[error(transparent)] Address(#[from] AddressError),
    #[error("snapshot: {0}")] Snapshot(String),
}
