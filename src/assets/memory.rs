//! Hash-map backed asset balances.

use std::collections::HashMap;

use crate::domain::{Address, Amount};
use crate::error::TransferError;
use crate::traits::AssetLedger;

/// In-memory [`AssetLedger`] keyed by `(asset, holder)`.
///
/// Assets can be marked as frozen to model tokens that reject transfers.
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::assets::InMemoryAssets;
/// use adaptive_cpamm::domain::{Address, Amount};
/// use adaptive_cpamm::traits::AssetLedger;
///
/// let usdc = Address::from_bytes([1u8; 32]);
/// let alice = Address::from_bytes([10u8; 32]);
/// let bob = Address::from_bytes([11u8; 32]);
///
/// let mut assets = InMemoryAssets::new();
/// assets.mint(&usdc, &alice, Amount::new(100));
/// assets.transfer(&usdc, &alice, &bob, Amount::new(40)).expect("funded");
/// assert_eq!(assets.balance_of(&usdc, &bob), Amount::new(40));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssets {
    balances: HashMap<(Address, Address), Amount>,
    frozen: Vec<Address>,
}

impl InMemoryAssets {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `asset` to `holder` out of thin air, saturating.
    pub fn mint(&mut self, asset: &Address, holder: &Address, amount: Amount) {
        let slot = self.balances.entry((*asset, *holder)).or_default();
        *slot = Amount::new(slot.get().saturating_add(amount.get()));
    }

    /// Makes every later transfer of `asset` fail.
    pub fn freeze(&mut self, asset: Address) {
        if !self.frozen.contains(&asset) {
            self.frozen.push(asset);
        }
    }

    /// Re-enables transfers of `asset`.
    pub fn unfreeze(&mut self, asset: &Address) {
        self.frozen.retain(|a| a != asset);
    }
}

impl AssetLedger for InMemoryAssets {
    fn balance_of(&self, asset: &Address, holder: &Address) -> Amount {
        self.balances
            .get(&(*asset, *holder))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if self.frozen.contains(asset) {
            return Err(TransferError::Rejected(format!("asset {asset} is frozen")));
        }
        let balance = self.balance_of(asset, from);
        let debited = balance
            .checked_sub(&amount)
            .ok_or(TransferError::InsufficientBalance {
                holder: *from,
                balance,
                needed: amount,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(asset, to)
            .checked_add(&amount)
            .ok_or(TransferError::BalanceOverflow)?;
        self.balances.insert((*asset, *from), debited);
        self.balances.insert((*asset, *to), credited);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    #[test]
    fn transfer_moves_balance() {
        let mut assets = InMemoryAssets::new();
        assets.mint(&addr(1), &addr(10), Amount::new(50));
        let Ok(()) = assets.transfer(&addr(1), &addr(10), &addr(11), Amount::new(20)) else {
            panic!("expected Ok");
        };
        assert_eq!(assets.balance_of(&addr(1), &addr(10)), Amount::new(30));
        assert_eq!(assets.balance_of(&addr(1), &addr(11)), Amount::new(20));
    }

    #[test]
    fn overdraft_leaves_state_untouched() {
        let mut assets = InMemoryAssets::new();
        assets.mint(&addr(1), &addr(10), Amount::new(5));
        let result = assets.transfer(&addr(1), &addr(10), &addr(11), Amount::new(6));
        assert!(matches!(result, Err(TransferError::InsufficientBalance { .. })));
        assert_eq!(assets.balance_of(&addr(1), &addr(10)), Amount::new(5));
        assert_eq!(assets.balance_of(&addr(1), &addr(11)), Amount::ZERO);
    }

    #[test]
    fn frozen_asset_rejects_transfers() {
        let mut assets = InMemoryAssets::new();
        assets.mint(&addr(1), &addr(10), Amount::new(5));
        assets.freeze(addr(1));
        assert!(matches!(
            assets.transfer(&addr(1), &addr(10), &addr(11), Amount::new(1)),
            Err(TransferError::Rejected(_))
        ));
        assets.unfreeze(&addr(1));
        assert!(assets
            .transfer(&addr(1), &addr(10), &addr(11), Amount::new(1))
            .is_ok());
    }

    #[test]
    fn self_transfer_is_noop() {
        let mut assets = InMemoryAssets::new();
        assets.mint(&addr(1), &addr(10), Amount::new(5));
        assert!(assets
            .transfer(&addr(1), &addr(10), &addr(10), Amount::new(5))
            .is_ok());
        assert_eq!(assets.balance_of(&addr(1), &addr(10)), Amount::new(5));
    }
}
