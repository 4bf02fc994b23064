//! Time-weighted price oracle.
//!
//! - [`PriceOracle`] — wrapping cumulative accumulators plus TWAP lookup.
//! - [`ObservationRing`] — bounded circular history of snapshots.

mod price_oracle;
mod ring;

pub use price_oracle::{PriceOracle, Twap};
pub use ring::ObservationRing;
