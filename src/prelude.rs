//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use adaptive_cpamm::prelude::*;
//! ```

pub use crate::assets::{InMemoryAssets, Journal};
pub use crate::config::{AssetTable, FeeSchedule, PoolConfig};
pub use crate::domain::{
    Address, Amount, AssetClass, AssetPair, BasisPoints, FeeTier, Observation, Price, Rounding,
    Shares, Timestamp, VolatilityScore,
};
pub use crate::error::{AmmError, ErrorKind, Result};
pub use crate::math::CheckedArithmetic;
pub use crate::oracle::Twap;
pub use crate::pool::{
    CallContext, FeeSwitch, Pool, PoolEvent, SwapOutcome, SwapRequest, VolatilityUpdate,
};
pub use crate::registry::PoolRegistry;
pub use crate::traits::{AssetClassifier, AssetLedger, FlashBorrower};
