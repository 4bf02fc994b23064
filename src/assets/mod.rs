//! Asset-ledger implementations.
//!
//! - [`InMemoryAssets`] — hash-map balances for embedding and tests.
//! - [`Journal`] — wraps any ledger and can revert everything it moved.

mod journal;
mod memory;

pub use journal::Journal;
pub use memory::InMemoryAssets;
