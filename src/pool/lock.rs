//! Two-state reentrancy lock.

use core::cell::Cell;

use tracing::warn;

use crate::error::AmmError;

/// Free/busy flag guarding every state-changing pool operation.
#[derive(Debug, Default)]
pub(crate) struct Lock {
    busy: Cell<bool>,
}

impl Lock {
    /// Marks the pool busy until the returned guard drops.
    ///
    /// # Errors
    ///
    /// [`AmmError::Reentrancy`] if the pool is already busy.
    pub(crate) fn acquire(&self) -> Result<LockGuard<'_>, AmmError> {
        if self.busy.replace(true) {
            warn!("reentrant call rejected");
            return Err(AmmError::Reentrancy);
        }
        Ok(LockGuard { busy: &self.busy })
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

/// Releases the lock on every exit path, including `?` early returns.
#[derive(Debug)]
pub(crate) struct LockGuard<'a> {
    busy: &'a Cell<bool>,
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}
