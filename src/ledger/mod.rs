//! Fungible liquidity-share balances.
//!
//! [`LiquidityLedger`] tracks holder balances and the total supply.  The
//! sum of all balances equals [`total_shares`](LiquidityLedger::total_shares)
//! after every call; every mutation checks before it writes, so a failed
//! call leaves the ledger untouched.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Address, Shares};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Share balances of one pool.
///
/// Shares held by [`Address::SINK`] are the permanent minimum floor and
/// can never be moved or burned.
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::domain::{Address, Shares};
/// use adaptive_cpamm::ledger::LiquidityLedger;
///
/// let alice = Address::from_bytes([10u8; 32]);
/// let mut ledger = LiquidityLedger::new();
/// ledger.mint(&alice, Shares::new(100)).expect("no overflow");
/// assert_eq!(ledger.balance_of(&alice), Shares::new(100));
/// assert_eq!(ledger.total_shares(), Shares::new(100));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiquidityLedger {
    balances: HashMap<Address, Shares>,
    total: Shares,
}

impl LiquidityLedger {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total shares outstanding.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.total
    }

    /// Balance of `holder`; zero if unknown.
    #[must_use]
    pub fn balance_of(&self, holder: &Address) -> Shares {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    /// Holders with a non-zero balance, in no particular order.
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &Shares)> + '_ {
        self.balances.iter()
    }

    /// Returns `true` if the balances add up to the total supply.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        self.balances
            .values()
            .try_fold(0u128, |acc, s| acc.checked_add(s.get()))
            == Some(self.total.get())
    }

    /// Creates `amount` new shares owned by `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if the total supply would overflow.
    pub fn mint(&mut self, to: &Address, amount: Shares) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        let total = self.total.safe_add(&amount, "total shares")?;
        let balance = self.balance_of(to).safe_add(&amount, "holder shares")?;
        self.total = total;
        self.balances.insert(*to, balance);
        debug!(holder = %to, %amount, "shares minted");
        Ok(())
    }

    /// Destroys `amount` shares owned by `from`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::LockedShares`] if `from` is the sink.
    /// - [`AmmError::InsufficientShares`] if `from` holds fewer than `amount`.
    pub fn burn(&mut self, from: &Address, amount: Shares) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        let balance = self.debit(from, amount)?;
        let total = self.total.safe_sub(&amount, "total shares")?;
        self.total = total;
        self.store(from, balance);
        debug!(holder = %from, %amount, "shares burned");
        Ok(())
    }

    /// Moves `amount` shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::LockedShares`] if `from` is the sink.
    /// - [`AmmError::InsufficientShares`] if `from` holds fewer than `amount`.
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: Shares) -> Result<(), AmmError> {
        let debited = self.debit(from, amount)?;
        if from == to || amount.is_zero() {
            return Ok(());
        }
        let credited = self.balance_of(to).safe_add(&amount, "holder shares")?;
        self.store(from, debited);
        self.store(to, credited);
        Ok(())
    }

    fn debit(&self, holder: &Address, amount: Shares) -> Result<Shares, AmmError> {
        if *holder == Address::SINK {
            return Err(AmmError::LockedShares);
        }
        let balance = self.balance_of(holder);
        balance
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientShares {
                holder: *holder,
                balance,
                needed: amount,
            })
    }

    fn store(&mut self, holder: &Address, balance: Shares) {
        if balance.is_zero() {
            self.balances.remove(holder);
        } else {
            self.balances.insert(*holder, balance);
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    fn funded(holder: Address, amount: u128) -> LiquidityLedger {
        let mut ledger = LiquidityLedger::new();
        let Ok(()) = ledger.mint(&holder, Shares::new(amount)) else {
            panic!("expected Ok");
        };
        ledger
    }

    // -- mint / burn -------------------------------------------------------

    #[test]
    fn mint_and_burn_track_total() {
        let mut ledger = funded(addr(1), 100);
        let Ok(()) = ledger.burn(&addr(1), Shares::new(40)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.total_shares(), Shares::new(60));
        assert_eq!(ledger.balance_of(&addr(1)), Shares::new(60));
        assert!(ledger.is_conserved());
    }

    #[test]
    fn mint_overflow_leaves_ledger_untouched() {
        let mut ledger = funded(addr(1), u128::MAX);
        let result = ledger.mint(&addr(2), Shares::new(1));
        assert!(matches!(result, Err(AmmError::Overflow(_))));
        assert_eq!(ledger.balance_of(&addr(2)), Shares::ZERO);
        assert!(ledger.is_conserved());
    }

    #[test]
    fn burn_more_than_held() {
        let mut ledger = funded(addr(1), 5);
        let Err(AmmError::InsufficientShares { balance, needed, .. }) =
            ledger.burn(&addr(1), Shares::new(6))
        else {
            panic!("expected InsufficientShares");
        };
        assert_eq!(balance, Shares::new(5));
        assert_eq!(needed, Shares::new(6));
    }

    #[test]
    fn burned_out_holder_is_removed() {
        let mut ledger = funded(addr(1), 5);
        assert!(ledger.burn(&addr(1), Shares::new(5)).is_ok());
        assert_eq!(ledger.holders().count(), 0);
    }

    // -- transfer ----------------------------------------------------------

    #[test]
    fn transfer_moves_shares() {
        let mut ledger = funded(addr(1), 10);
        let Ok(()) = ledger.transfer(&addr(1), &addr(2), Shares::new(3)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.balance_of(&addr(1)), Shares::new(7));
        assert_eq!(ledger.balance_of(&addr(2)), Shares::new(3));
        assert_eq!(ledger.total_shares(), Shares::new(10));
        assert!(ledger.is_conserved());
    }

    #[test]
    fn sink_shares_are_locked() {
        let mut ledger = funded(Address::SINK, 1_000);
        assert_eq!(
            ledger.transfer(&Address::SINK, &addr(2), Shares::new(1)),
            Err(AmmError::LockedShares)
        );
        assert_eq!(
            ledger.burn(&Address::SINK, Shares::new(1)),
            Err(AmmError::LockedShares)
        );
        assert_eq!(ledger.balance_of(&Address::SINK), Shares::new(1_000));
    }

    #[test]
    fn self_transfer_checks_balance() {
        let mut ledger = funded(addr(1), 1);
        assert!(ledger.transfer(&addr(1), &addr(1), Shares::new(1)).is_ok());
        assert!(ledger.transfer(&addr(1), &addr(1), Shares::new(2)).is_err());
        assert_eq!(ledger.balance_of(&addr(1)), Shares::new(1));
    }
}
