//! Fundamental domain value types.
//!
//! Newtypes with validated constructors: identities, amounts, shares,
//! prices, timestamps, fee tiers and oracle snapshots.  Everything here
//! is `Copy` and free of pool state.

mod address;
mod amount;
mod asset_class;
mod asset_pair;
mod basis_points;
mod fee_tier;
mod observation;
mod price;
mod rounding;
mod shares;
mod timestamp;
mod volatility;

pub use address::Address;
pub use amount::{Amount, MAX_RESERVE};
pub use asset_class::AssetClass;
pub use asset_pair::{AssetPair, Side};
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use fee_tier::FeeTier;
pub use observation::Observation;
pub use price::{Price, RESOLUTION};
pub use rounding::Rounding;
pub use shares::Shares;
pub use timestamp::Timestamp;
pub use volatility::VolatilityScore;
