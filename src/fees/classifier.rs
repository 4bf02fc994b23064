//! Fee tier selection from asset classes and volatility.

use crate::config::FeeSchedule;
use crate::domain::{AssetClass, AssetPair, FeeTier, VolatilityScore};
use crate::traits::AssetClassifier;

/// Selects the fee tier for `pair` at the given volatility.
///
/// Total and pure:
///
/// | Pair | Tier |
/// |------|------|
/// | stable / stable | [`FeeSchedule::stable_pair`] |
/// | stable / major (either order) | [`FeeSchedule::stable_major`] |
/// | anything else | [`FeeSchedule::for_volatility`] |
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::config::{AssetTable, FeeSchedule};
/// use adaptive_cpamm::domain::{Address, AssetPair, FeeTier, VolatilityScore};
/// use adaptive_cpamm::fees::fee_tier_for;
///
/// let usdc = Address::from_bytes([1u8; 32]);
/// let dai = Address::from_bytes([2u8; 32]);
/// let table = AssetTable::new().with_stable(usdc).with_stable(dai);
/// let pair = AssetPair::new(usdc, dai).expect("distinct");
///
/// let tier = fee_tier_for(&pair, VolatilityScore::new(90), &table, &FeeSchedule::default());
/// assert_eq!(tier, FeeTier::TIER_0_01_PERCENT);
/// ```
#[must_use]
pub fn fee_tier_for<C: AssetClassifier + ?Sized>(
    pair: &AssetPair,
    volatility: VolatilityScore,
    classifier: &C,
    schedule: &FeeSchedule,
) -> FeeTier {
    let a = classifier.classify(&pair.asset_a());
    let b = classifier.classify(&pair.asset_b());
    match (a, b) {
        (AssetClass::Stable, AssetClass::Stable) => schedule.stable_pair(),
        (AssetClass::Stable, AssetClass::Major) | (AssetClass::Major, AssetClass::Stable) => {
            schedule.stable_major()
        }
        _ => schedule.for_volatility(volatility),
    }
}
