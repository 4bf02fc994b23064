//! Fee selection and fee accounting.
//!
//! - [`fee_tier_for`] — pure pair/volatility → tier classifier.
//! - [`score_from_change`] and [`damped`] — volatility scoring with a
//!   hysteresis margin.
//! - [`protocol_fee_shares`] — the protocol's cut of fee growth.

mod classifier;
mod protocol;
mod volatility;

pub use classifier::fee_tier_for;
pub use protocol::protocol_fee_shares;
pub use volatility::{damped, score_from_change};
