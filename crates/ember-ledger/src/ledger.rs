//! The token ledger: balances, allowances, and the transfer pipeline.
//!
//! A transfer runs as one indivisible unit of work:
//! 1. validate (recipient nonzero, sender balance covers the gross amount)
//! 2. split the gross amount via the fee engine (exempt endpoints skip fees)
//! 3. apply all balance mutations: debit gross, credit net, credit the
//!    liquidity accumulator and lottery pool, reduce supply by the burn
//! 4. reconcile eligibility for sender and recipient
//! 5. give the liquidity accumulator a chance to swap
//! 6. count the transfer toward the draw cadence and pay out a winner when
//!    it fires
//!
//! Validation happens before the first mutation, so a failed call leaves
//! the state untouched. The ledger is not thread-safe; the execution model
//! is single-threaded and transactional by construction.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use ember_core::config::{FeeConfig, FeeKind, TokenConfig};
use ember_core::constants::{DECIMALS, SWAP_DEADLINE_SECS};
use ember_core::error::{EmberError, FeeError, LedgerError, LotteryError};
use ember_core::traits::{DrawSource, FeeSplitter, LiquidityRouter};
use ember_core::types::{Address, FeeBreakdown};
use ember_fees::FeeEngine;
use ember_lottery::Lottery;

use crate::genesis::{liquidity_address, lottery_address, pair_address, token_address};
use crate::liquidity::{LiquidityAccumulator, SwapOutcome};

/// A completed lottery payout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayoutSummary {
    /// The drawn winner.
    pub winner: Address,
    /// Pool balance paid out (zero when the pool was empty).
    pub amount: u128,
    /// Zero-based draw number.
    pub draw_number: u64,
}

/// What a transfer did, beyond moving the net amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferReceipt {
    /// The applied fee decomposition (fee-free for exempt endpoints).
    pub fees: FeeBreakdown,
    /// Whether the transfer was processed as exempt.
    pub exempt: bool,
    /// A winner payout, if the draw cadence fired on this transfer.
    pub payout: Option<PayoutSummary>,
    /// The liquidity trigger result.
    pub swap: SwapOutcome,
}

/// The durable ledger state. Everything the engine needs to persist.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[derive(bincode::Encode, bincode::Decode)]
pub struct LedgerState {
    config: TokenConfig,
    fee_config: FeeConfig,
    admin: Address,
    initialized: bool,
    accounts: BTreeMap<Address, u128>,
    /// owner → spender → remaining allowance.
    allowances: BTreeMap<Address, BTreeMap<Address, u128>>,
    total_supply: u128,
    total_burned: u128,
    total_fees: u128,
    fee_exempt: BTreeSet<Address>,
    lottery: Lottery,
    liquidity: LiquidityAccumulator,
}

/// The ledger engine: durable state plus the injected collaborators.
pub struct Ledger {
    state: LedgerState,
    fee_engine: FeeEngine,
    router: Box<dyn LiquidityRouter>,
    draw: Box<dyn DrawSource>,
}

impl Ledger {
    /// Create an un-minted ledger with wired internal exemptions.
    ///
    /// `admin` is the only principal allowed to reconfigure fees and
    /// exemptions. Call [`mint`](Self::mint) (or
    /// [`genesis`](crate::genesis::genesis)) to create the supply.
    pub fn new(
        config: TokenConfig,
        admin: Address,
        router: Box<dyn LiquidityRouter>,
        draw: Box<dyn DrawSource>,
    ) -> Self {
        let mut lottery = Lottery::new(token_address(), config.draw_interval);
        let liquidity = LiquidityAccumulator::new(config.liquidity_threshold);

        let internal = [
            token_address(),
            liquidity_address(),
            lottery_address(),
            pair_address(),
        ];
        let mut fee_exempt = BTreeSet::new();
        for addr in internal {
            fee_exempt.insert(addr);
            lottery.tracker_mut().set_exempt(addr);
        }

        Self {
            state: LedgerState {
                config,
                fee_config: FeeConfig::default(),
                admin,
                initialized: false,
                accounts: BTreeMap::new(),
                allowances: BTreeMap::new(),
                total_supply: 0,
                total_burned: 0,
                total_fees: 0,
                fee_exempt,
                lottery,
                liquidity,
            },
            fee_engine: FeeEngine::new(),
            router,
            draw,
        }
    }

    /// Rebuild a ledger from restored state and fresh collaborators.
    pub fn from_state(
        state: LedgerState,
        router: Box<dyn LiquidityRouter>,
        draw: Box<dyn DrawSource>,
    ) -> Self {
        Self {
            state,
            fee_engine: FeeEngine::new(),
            router,
            draw,
        }
    }

    /// The durable state, for snapshots.
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Deterministic digest of the full ledger state.
    ///
    /// Stable across save/load round trips and unchanged by read-only
    /// operations; see [`crate::snapshot::state_digest`].
    pub fn state_digest(&self) -> Result<[u8; 32], EmberError> {
        crate::snapshot::state_digest(&self.state)
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// Token name.
    pub fn name(&self) -> &str {
        &self.state.config.name
    }

    /// Ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.state.config.symbol
    }

    /// Fractional decimal digits (always 18).
    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    /// Current total supply.
    pub fn total_supply(&self) -> u128 {
        self.state.total_supply
    }

    /// Balance of an address (zero for unknown accounts).
    pub fn balance_of(&self, addr: Address) -> u128 {
        self.state.accounts.get(&addr).copied().unwrap_or(0)
    }

    /// Iterate over all funded accounts in address order.
    ///
    /// Used for audits and conservation checks; drained accounts are
    /// dropped from the map and do not appear.
    pub fn iter_balances(&self) -> impl Iterator<Item = (Address, u128)> + '_ {
        self.state.accounts.iter().map(|(addr, bal)| (*addr, *bal))
    }

    /// Cumulative burned amount.
    pub fn total_burned(&self) -> u128 {
        self.state.total_burned
    }

    /// Cumulative fees deducted (burn + liquidity + lottery).
    pub fn total_fees(&self) -> u128 {
        self.state.total_fees
    }

    /// Remaining allowance from `owner` to `spender`.
    pub fn allowance(&self, owner: Address, spender: Address) -> u128 {
        self.state
            .allowances
            .get(&owner)
            .and_then(|spenders| spenders.get(&spender))
            .copied()
            .unwrap_or(0)
    }

    /// The lottery pool account address.
    pub fn lottery_contract(&self) -> Address {
        lottery_address()
    }

    /// Accumulated liquidity tokens required before a swap triggers.
    pub fn minimum_before_adding_liquidity(&self) -> u128 {
        self.state.liquidity.threshold()
    }

    /// Tokens currently held by the liquidity accumulator.
    pub fn lp_token_balance(&self) -> u128 {
        self.balance_of(liquidity_address())
    }

    /// Whether an address is excluded from fee deduction.
    pub fn is_fee_exempt(&self, addr: Address) -> bool {
        self.state.fee_exempt.contains(&addr)
    }

    /// Whether an address is currently draw-eligible.
    pub fn is_eligible(&self, addr: Address) -> bool {
        self.state.lottery.tracker().is_eligible(addr)
    }

    /// Winner history in draw order.
    pub fn winners(&self) -> &[Address] {
        self.state.lottery.winners()
    }

    /// The lottery state.
    pub fn lottery(&self) -> &Lottery {
        &self.state.lottery
    }

    /// Current fee configuration.
    pub fn fee_config(&self) -> FeeConfig {
        self.state.fee_config
    }

    /// The fee/exemption admin.
    pub fn admin(&self) -> Address {
        self.state.admin
    }

    // ------------------------------------------------------------------
    // Genesis
    // ------------------------------------------------------------------

    /// One-shot genesis mint, crediting the full initial supply to `to`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AlreadyInitialized`] on any call after the first
    /// - [`LedgerError::ZeroAddress`] for a null recipient
    pub fn mint(&mut self, to: Address, amount: u128) -> Result<(), LedgerError> {
        if self.state.initialized {
            return Err(LedgerError::AlreadyInitialized);
        }
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.state.initialized = true;
        self.state.total_supply = amount;
        self.credit(to, amount)?;
        self.refresh_eligibility(to);
        info!(%to, amount, "genesis mint");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Transfers
    // ------------------------------------------------------------------

    /// Transfer `gross` from `from` to `to`, deducting fees unless either
    /// endpoint is exempt.
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        gross: u128,
    ) -> Result<TransferReceipt, LedgerError> {
        self.execute_transfer(from, to, gross)
    }

    /// Approve `spender` to transfer up to `amount` on behalf of `owner`.
    pub fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if spender.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let spenders = self.state.allowances.entry(owner).or_default();
        if amount == 0 {
            spenders.remove(&spender);
        } else {
            spenders.insert(spender, amount);
        }
        Ok(())
    }

    /// Transfer on behalf of `from`, consuming `spender`'s allowance.
    ///
    /// The transfer path is identical to [`transfer`](Self::transfer);
    /// the allowance is reduced by the gross amount after the transfer
    /// succeeds, so a failed transfer leaves it untouched.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        gross: u128,
    ) -> Result<TransferReceipt, LedgerError> {
        let allowed = self.allowance(from, spender);
        if allowed < gross {
            return Err(LedgerError::InsufficientAllowance {
                have: allowed,
                need: gross,
            });
        }
        let receipt = self.execute_transfer(from, to, gross)?;
        let remaining = allowed - gross;
        self.approve(from, spender, remaining)?;
        Ok(receipt)
    }

    // ------------------------------------------------------------------
    // Admin operations
    // ------------------------------------------------------------------

    /// Replace one fee rate. Admin-only, bounds-validated.
    pub fn set_fee(&mut self, caller: Address, kind: FeeKind, bps: u16) -> Result<(), FeeError> {
        self.check_admin(caller)?;
        self.state.fee_config = self.state.fee_config.with_fee(kind, bps)?;
        info!(?kind, bps, "fee reconfigured");
        Ok(())
    }

    /// Exclude an address from fees and eligibility. Admin-only.
    pub fn exclude_from_fees(&mut self, caller: Address, addr: Address) -> Result<(), FeeError> {
        self.check_admin(caller)?;
        self.state.fee_exempt.insert(addr);
        self.state.lottery.tracker_mut().set_exempt(addr);
        Ok(())
    }

    /// Re-include an address in fees and eligibility. Admin-only.
    ///
    /// Internal accounts stay exempt regardless; re-including them would
    /// let fee accounting double-count its own bookkeeping transfers.
    pub fn include_in_fees(&mut self, caller: Address, addr: Address) -> Result<(), FeeError> {
        self.check_admin(caller)?;
        if self.is_internal(addr) {
            return Ok(());
        }
        self.state.fee_exempt.remove(&addr);
        let balance = self.balance_of(addr);
        self.state.lottery.tracker_mut().clear_exempt(addr, balance);
        Ok(())
    }

    /// Force-add an address to the eligible set on behalf of `caller`.
    ///
    /// The lottery only honors the ledger's own token address; any other
    /// caller fails with [`LotteryError::Unauthorized`].
    pub fn add_to_lottery(&mut self, caller: Address, addr: Address) -> Result<(), LotteryError> {
        self.state.lottery.tracker_mut().add_to_lottery(caller, addr)
    }

    /// Force-remove an address from the eligible set on behalf of `caller`.
    pub fn remove_from_lottery(
        &mut self,
        caller: Address,
        addr: Address,
    ) -> Result<(), LotteryError> {
        self.state
            .lottery
            .tracker_mut()
            .remove_from_lottery(caller, addr)
    }

    fn check_admin(&self, caller: Address) -> Result<(), FeeError> {
        if caller != self.state.admin {
            return Err(FeeError::Unauthorized);
        }
        Ok(())
    }

    fn is_internal(&self, addr: Address) -> bool {
        addr == token_address()
            || addr == liquidity_address()
            || addr == lottery_address()
            || addr == pair_address()
    }

    // ------------------------------------------------------------------
    // Transfer pipeline
    // ------------------------------------------------------------------

    fn execute_transfer(
        &mut self,
        from: Address,
        to: Address,
        gross: u128,
    ) -> Result<TransferReceipt, LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let have = self.balance_of(from);
        if have < gross {
            return Err(LedgerError::InsufficientBalance { have, need: gross });
        }

        let exempt = self.is_fee_exempt(from) || self.is_fee_exempt(to);
        let fees = if exempt {
            FeeBreakdown::fee_free(gross)
        } else {
            // Gross is bounded by the total supply, so the bps product
            // cannot overflow u128; the mapping is for completeness.
            self.fee_engine
                .split(&self.state.fee_config, gross)
                .map_err(|_| LedgerError::ValueOverflow)?
        };

        self.apply_breakdown(from, to, gross, &fees)?;
        debug!(%from, %to, gross, net = fees.net, exempt, "transfer applied");

        self.refresh_eligibility(from);
        self.refresh_eligibility(to);

        let swap = self.maybe_provision_liquidity();
        let payout = if !exempt && gross > 0 {
            self.maybe_draw()?
        } else {
            None
        };

        Ok(TransferReceipt {
            fees,
            exempt,
            payout,
            swap,
        })
    }

    /// Apply the precomputed amounts. Preconditions were validated, so
    /// nothing here can fail on well-formed state.
    fn apply_breakdown(
        &mut self,
        from: Address,
        to: Address,
        gross: u128,
        fees: &FeeBreakdown,
    ) -> Result<(), LedgerError> {
        self.debit(from, gross)?;
        self.credit(to, fees.net)?;
        if fees.liquidity > 0 {
            self.credit(liquidity_address(), fees.liquidity)?;
        }
        if fees.lottery > 0 {
            self.credit(lottery_address(), fees.lottery)?;
        }
        if fees.burn > 0 {
            self.state.total_supply = self
                .state
                .total_supply
                .checked_sub(fees.burn)
                .ok_or(LedgerError::ValueOverflow)?;
            self.state.total_burned = self
                .state
                .total_burned
                .checked_add(fees.burn)
                .ok_or(LedgerError::ValueOverflow)?;
        }
        let total_fee = fees.total_fee().ok_or(LedgerError::ValueOverflow)?;
        self.state.total_fees = self
            .state
            .total_fees
            .checked_add(total_fee)
            .ok_or(LedgerError::ValueOverflow)?;
        Ok(())
    }

    fn debit(&mut self, addr: Address, amount: u128) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }
        let balance = self.balance_of(addr);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                have: balance,
                need: amount,
            })?;
        if remaining == 0 {
            self.state.accounts.remove(&addr);
        } else {
            self.state.accounts.insert(addr, remaining);
        }
        Ok(())
    }

    fn credit(&mut self, addr: Address, amount: u128) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }
        let balance = self.balance_of(addr);
        let updated = balance
            .checked_add(amount)
            .ok_or(LedgerError::ValueOverflow)?;
        self.state.accounts.insert(addr, updated);
        Ok(())
    }

    fn refresh_eligibility(&mut self, addr: Address) {
        let balance = self.balance_of(addr);
        self.state
            .lottery
            .tracker_mut()
            .on_balance_changed(addr, balance);
    }

    // ------------------------------------------------------------------
    // Liquidity trigger
    // ------------------------------------------------------------------

    fn maybe_provision_liquidity(&mut self) -> SwapOutcome {
        let held = self.balance_of(liquidity_address());
        if !self.state.liquidity.should_trigger(held) {
            return SwapOutcome::NotTriggered;
        }
        if self.state.liquidity.begin_swap().is_err() {
            return SwapOutcome::NotTriggered;
        }

        // Stage the held tokens at the pair sink through the normal
        // transfer path. Both endpoints are exempt, so the nested transfer
        // is fee-free, and its own trigger check sees the Swapping phase
        // and backs off.
        if let Err(err) = self.execute_transfer(liquidity_address(), pair_address(), held) {
            self.state.liquidity.finish_swap();
            warn!(%err, "liquidity staging failed");
            return SwapOutcome::Failed {
                reason: err.to_string(),
            };
        }

        // The router swaps part of the staged tokens for pair currency and
        // provisions the pool; LP tokens go to the treasury.
        let result = self.router.add_liquidity(
            held,
            0,
            0,
            0,
            token_address(),
            SWAP_DEADLINE_SECS,
        );

        // Return flows run while still in the Swapping phase: a refund that
        // refills the accumulator past the threshold must not retrigger.
        let outcome = match result {
            Ok(receipt) => {
                let used = receipt.token_used.min(held);
                let leftover = held - used;
                if leftover > 0 {
                    if let Err(err) =
                        self.execute_transfer(pair_address(), liquidity_address(), leftover)
                    {
                        warn!(%err, "liquidity leftover return failed");
                    }
                }
                info!(token_amount = used, "liquidity provisioned");
                SwapOutcome::Provisioned { token_amount: used }
            }
            Err(err) => {
                // Degrade: fee accounting stands, tokens return to the
                // accumulator for the next attempt.
                if let Err(refund_err) =
                    self.execute_transfer(pair_address(), liquidity_address(), held)
                {
                    warn!(%refund_err, "liquidity refund failed");
                }
                warn!(%err, "liquidity provisioning failed; swap deferred");
                SwapOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        };
        self.state.liquidity.finish_swap();
        outcome
    }

    // ------------------------------------------------------------------
    // Lottery cadence
    // ------------------------------------------------------------------

    fn maybe_draw(&mut self) -> Result<Option<PayoutSummary>, LedgerError> {
        let Some(outcome) = self
            .state
            .lottery
            .on_qualifying_transfer(self.draw.as_mut())
        else {
            return Ok(None);
        };

        // Pay the entire pool to the winner as a net-only credit: no fee
        // deduction, no cadence counting, no liquidity trigger.
        let amount = self.balance_of(lottery_address());
        if amount > 0 {
            self.debit(lottery_address(), amount)?;
            self.credit(outcome.winner, amount)?;
            self.refresh_eligibility(outcome.winner);
        }
        info!(winner = %outcome.winner, amount, "lottery payout");
        Ok(Some(PayoutSummary {
            winner: outcome.winner,
            amount,
            draw_number: outcome.draw_number,
        }))
    }
}
