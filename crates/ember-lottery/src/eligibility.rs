//! Incremental tracking of lottery-eligible addresses.
//!
//! Membership is a pure function of ledger state: an address is eligible
//! iff its balance is strictly positive and it is not exempt. The tracker
//! maintains that set incrementally from balance transitions reported by
//! the ledger, with:
//! - O(1) membership queries via the position index
//! - O(1) insertion and swap-removal
//! - stable, deterministic member positions given the same operation order
//!
//! External mutation ([`add_to_lottery`](EligibilityTracker::add_to_lottery),
//! [`remove_from_lottery`](EligibilityTracker::remove_from_lottery)) is
//! restricted to the bound token address.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use ember_core::error::LotteryError;
use ember_core::types::Address;

/// The set of draw-eligible addresses.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[derive(bincode::Encode, bincode::Decode)]
pub struct EligibilityTracker {
    /// The only address allowed to call the external mutators.
    token: Address,
    /// Members in insertion order; removal swaps the last member in.
    members: Vec<Address>,
    /// Member → position in `members`.
    index: BTreeMap<Address, usize>,
    /// Addresses excluded from eligibility bookkeeping.
    exempt: BTreeSet<Address>,
}

impl EligibilityTracker {
    /// Create a tracker bound to the given token address.
    pub fn new(token: Address) -> Self {
        Self {
            token,
            members: Vec::new(),
            index: BTreeMap::new(),
            exempt: BTreeSet::new(),
        }
    }

    /// The token address this tracker accepts mutations from.
    pub fn token(&self) -> Address {
        self.token
    }

    /// Whether `addr` is currently eligible for a draw.
    pub fn is_eligible(&self, addr: Address) -> bool {
        self.index.contains_key(&addr)
    }

    /// Whether `addr` is excluded from eligibility bookkeeping.
    pub fn is_exempt(&self, addr: Address) -> bool {
        self.exempt.contains(&addr)
    }

    /// Number of eligible addresses.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no address is eligible.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The member at a draw index, if within bounds.
    pub fn member_at(&self, position: usize) -> Option<Address> {
        self.members.get(position).copied()
    }

    /// All eligible addresses in positional order.
    pub fn members(&self) -> &[Address] {
        &self.members
    }

    /// Mark an address exempt and drop any existing membership.
    ///
    /// Ledger-internal wiring; not part of the authorized-caller surface.
    pub fn set_exempt(&mut self, addr: Address) {
        self.exempt.insert(addr);
        self.remove_member(addr);
    }

    /// Clear an exemption, re-inserting the address if its balance is
    /// currently positive.
    pub fn clear_exempt(&mut self, addr: Address, balance: u128) {
        self.exempt.remove(&addr);
        self.on_balance_changed(addr, balance);
    }

    /// Reconcile membership with a new balance. Idempotent.
    ///
    /// Exempt addresses never change membership. Otherwise membership
    /// follows `balance > 0` exactly.
    pub fn on_balance_changed(&mut self, addr: Address, balance: u128) {
        if self.exempt.contains(&addr) {
            return;
        }
        if balance > 0 {
            self.insert_member(addr);
        } else {
            self.remove_member(addr);
        }
    }

    /// Force-add an address. Restricted to the bound token contract.
    pub fn add_to_lottery(&mut self, caller: Address, addr: Address) -> Result<(), LotteryError> {
        self.check_caller(caller)?;
        if !self.exempt.contains(&addr) {
            self.insert_member(addr);
        }
        Ok(())
    }

    /// Force-remove an address. Restricted to the bound token contract.
    pub fn remove_from_lottery(
        &mut self,
        caller: Address,
        addr: Address,
    ) -> Result<(), LotteryError> {
        self.check_caller(caller)?;
        self.remove_member(addr);
        Ok(())
    }

    fn check_caller(&self, caller: Address) -> Result<(), LotteryError> {
        if caller != self.token {
            return Err(LotteryError::Unauthorized);
        }
        Ok(())
    }

    fn insert_member(&mut self, addr: Address) {
        if self.index.contains_key(&addr) {
            return;
        }
        self.index.insert(addr, self.members.len());
        self.members.push(addr);
        debug!(%addr, members = self.members.len(), "lottery eligibility gained");
    }

    fn remove_member(&mut self, addr: Address) {
        let Some(position) = self.index.remove(&addr) else {
            return;
        };
        self.members.swap_remove(position);
        if let Some(&moved) = self.members.get(position) {
            self.index.insert(moved, position);
        }
        debug!(%addr, members = self.members.len(), "lottery eligibility lost");
    }
}
