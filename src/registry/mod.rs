//! Deterministic pool creation and lookup.
//!
//! The [`PoolRegistry`] keeps exactly one [`Pool`](crate::pool::Pool) per
//! canonical [`AssetPair`](crate::domain::AssetPair), derives each pool's
//! custody address from the pair with BLAKE3, and owns the protocol fee
//! recipient shared by all of its pools.

mod pool_registry;

pub use pool_registry::PoolRegistry;
