//! Balance and allowance storage
//!
//! Two keyed maps with default-zero semantics: absent entries read as
//! zero, and zero writes drop the entry. Only read values are observable;
//! all policy (authorization checks, commit ordering) lives in the token
//! layer above.

use crate::account::Address;
use crate::amount::Amount;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Balances and allowances for a single ledger
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LedgerStore {
    /// Balances: account -> amount
    balances: HashMap<Address, Amount>,
    /// Allowances: owner -> (spender -> amount)
    allowances: HashMap<Address, HashMap<Address, Amount>>,
}

impl LedgerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of an account, zero if absent
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances
            .get(account)
            .copied()
            .unwrap_or_else(Amount::zero)
    }

    /// Allowance granted by `owner` to `spender`, zero if absent
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or_else(Amount::zero)
    }

    /// Write a balance; a zero write drops the entry
    pub fn set_balance(&mut self, account: Address, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, amount);
        }
    }

    /// Write an allowance; a zero write drops the entry
    pub fn set_allowance(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount.is_zero() {
            if let Some(spenders) = self.allowances.get_mut(&owner) {
                spenders.remove(&spender);
                if spenders.is_empty() {
                    self.allowances.remove(&owner);
                }
            }
        } else {
            self.allowances
                .entry(owner)
                .or_default()
                .insert(spender, amount);
        }
    }

    /// Sum of all balances, checked
    pub fn total_balances(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(Amount::zero(), |acc, balance| acc.checked_add(*balance))
    }

    /// Number of accounts with a non-zero balance
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|b| !b.is_zero()).count()
    }
}
