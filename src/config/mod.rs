//! Declarative pool parameters.
//!
//! - [`PoolConfig`] — oracle, volatility and share-floor tuning.
//! - [`FeeSchedule`] — tiers per classifier outcome and volatility band.
//! - [`AssetTable`] — static stable/major allow-list.
//!
//! Every struct validates on construction or via `validate()`; a pool
//! built from a validated config starts in a valid state.  With the
//! `serde` feature all three load from any serde format.

mod asset_table;
mod fee_schedule;
mod pool_config;

pub use asset_table::AssetTable;
pub use fee_schedule::FeeSchedule;
pub use pool_config::{
    PoolConfig, DEFAULT_HYSTERESIS, DEFAULT_INITIAL_VOLATILITY, DEFAULT_MINIMUM_SHARE_FLOOR,
    DEFAULT_OBSERVATION_CAPACITY, DEFAULT_OBSERVATION_INTERVAL, DEFAULT_PROTOCOL_FEE_FACTOR,
    DEFAULT_VOLATILITY_COOLDOWN, DEFAULT_VOLATILITY_WINDOW,
};
