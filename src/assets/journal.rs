//! Transfer journal providing all-or-nothing semantics over an
//! [`AssetLedger`].

use tracing::{error, warn};

use crate::domain::{Address, Amount};
use crate::error::TransferError;
use crate::traits::AssetLedger;

#[derive(Debug, Clone, Copy)]
struct Entry {
    asset: Address,
    from: Address,
    to: Address,
    amount: Amount,
}

/// Records every successful transfer made through it so the whole batch
/// can be reverted.
///
/// The pool wraps the caller's ledger in a `Journal` for any operation
/// that moves assets more than once or hands control to external code.
/// On success the journal is [`commit`](Self::commit)ted; on failure
/// [`rollback`](Self::rollback) replays the inverse transfers newest first.
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::assets::{InMemoryAssets, Journal};
/// use adaptive_cpamm::domain::{Address, Amount};
/// use adaptive_cpamm::traits::AssetLedger;
///
/// let asset = Address::from_bytes([1u8; 32]);
/// let (alice, bob) = (Address::from_bytes([10u8; 32]), Address::from_bytes([11u8; 32]));
/// let mut assets = InMemoryAssets::new();
/// assets.mint(&asset, &alice, Amount::new(10));
///
/// let mut journal = Journal::new(&mut assets);
/// journal.transfer(&asset, &alice, &bob, Amount::new(10)).expect("funded");
/// journal.rollback();
/// assert_eq!(assets.balance_of(&asset, &alice), Amount::new(10));
/// ```
pub struct Journal<'a, L: AssetLedger + ?Sized> {
    inner: &'a mut L,
    entries: Vec<Entry>,
}

impl<'a, L: AssetLedger + ?Sized> Journal<'a, L> {
    /// Starts an empty journal over `inner`.
    pub fn new(inner: &'a mut L) -> Self {
        Self {
            inner,
            entries: Vec::new(),
        }
    }

    /// Number of transfers recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keeps all recorded transfers.
    pub fn commit(self) {}

    /// Reverts all recorded transfers, newest first.
    ///
    /// A transfer that succeeded can always be inverted on a conforming
    /// ledger; a failing inverse is logged and the remaining entries are
    /// still attempted.
    pub fn rollback(mut self) {
        if !self.entries.is_empty() {
            warn!(transfers = self.entries.len(), "rolling back asset transfers");
        }
        while let Some(e) = self.entries.pop() {
            if let Err(err) = self.inner.transfer(&e.asset, &e.to, &e.from, e.amount) {
                error!(
                    asset = %e.asset,
                    from = %e.to,
                    to = %e.from,
                    amount = %e.amount,
                    %err,
                    "failed to revert transfer"
                );
            }
        }
    }
}

impl<L: AssetLedger + ?Sized> AssetLedger for Journal<'_, L> {
    fn balance_of(&self, asset: &Address, holder: &Address) -> Amount {
        self.inner.balance_of(asset, holder)
    }

    fn transfer(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.inner.transfer(asset, from, to, amount)?;
        self.entries.push(Entry {
            asset: *asset,
            from: *from,
            to: *to,
            amount,
        });
        Ok(())
    }
}
