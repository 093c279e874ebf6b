//! Protocol constants. All monetary values in base units (1 EMBR = 10^18).

/// Fractional decimal digits of the token.
pub const DECIMALS: u8 = 18;

/// Base units per whole token.
pub const COIN: u128 = 1_000_000_000_000_000_000;

/// Total supply minted once at genesis: 1,000,000 EMBR.
pub const INITIAL_SUPPLY: u128 = 1_000_000 * COIN;

/// Basis-point denominator (100% = 10_000 bps).
pub const BPS_PRECISION: u128 = 10_000;

/// Upper bound on the sum of all configured fee rates.
pub const MAX_TOTAL_FEE_BPS: u32 = 10_000;

/// Default burn fee: 3%.
pub const DEFAULT_BURN_FEE_BPS: u16 = 300;

/// Default liquidity fee: 1%.
pub const DEFAULT_LIQUIDITY_FEE_BPS: u16 = 100;

/// Default lottery fee: 1%.
pub const DEFAULT_LOTTERY_FEE_BPS: u16 = 100;

/// A draw is attempted after every `DRAW_INTERVAL`th qualifying transfer.
pub const DRAW_INTERVAL: u64 = 10;

/// Accumulated liquidity-fee tokens required before a swap is triggered.
pub const DEFAULT_LIQUIDITY_THRESHOLD: u128 = 5_000 * COIN;

/// Deadline offset (seconds) passed to the router on liquidity provisioning.
pub const SWAP_DEADLINE_SECS: u64 = 3_600;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_matches_decimals() {
        assert_eq!(COIN, 10u128.pow(DECIMALS as u32));
    }

    #[test]
    fn supply_math() {
        assert_eq!(INITIAL_SUPPLY / COIN, 1_000_000);
    }

    #[test]
    fn default_fees_within_bounds() {
        let total = DEFAULT_BURN_FEE_BPS as u32
            + DEFAULT_LIQUIDITY_FEE_BPS as u32
            + DEFAULT_LOTTERY_FEE_BPS as u32;
        assert!(total <= MAX_TOTAL_FEE_BPS);
        // 5% total by default
        assert_eq!(total, 500);
    }

    #[test]
    fn liquidity_threshold_in_whole_tokens() {
        assert_eq!(DEFAULT_LIQUIDITY_THRESHOLD / COIN, 5_000);
    }
}
