//! Rate-limited volatility rescoring.

use tracing::debug;

use super::events::PoolEvent;
use super::{CallContext, Pool};
use crate::domain::{FeeTier, Price, VolatilityScore};
use crate::error::AmmError;
use crate::fees::{damped, fee_tier_for, score_from_change};

/// What [`Pool::update_volatility`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolatilityUpdate {
    /// Called within the cooldown or while a reserve is zero; nothing
    /// changed.
    Skipped,
    /// The candidate score was within the hysteresis margin; only the
    /// update time advanced.
    Unchanged {
        /// Score computed from the price change.
        candidate: VolatilityScore,
    },
    /// A new score was committed and the fee tier recomputed.
    Changed {
        /// Score before the update.
        previous: VolatilityScore,
        /// Committed score.
        current: VolatilityScore,
        /// Tier in force after the update.
        fee_tier: FeeTier,
    },
}

impl Pool {
    /// Rescores volatility from the move between the spot price and the
    /// oracle price one lookback window ago.
    ///
    /// Anyone may call this.  It does nothing until the cooldown has
    /// passed since the last run, or while a reserve is zero.  A run
    /// always advances the update time; the score and fee tier change
    /// only when the new score differs by more than the hysteresis
    /// margin.
    ///
    /// # Errors
    ///
    /// [`AmmError::Reentrancy`] if the pool is busy.
    pub fn update_volatility(&self, ctx: &CallContext) -> Result<VolatilityUpdate, AmmError> {
        let _guard = self.lock.acquire()?;
        let now = ctx.now;
        let (previous, candidate) = {
            let state = self.state.borrow();
            let cooling = state
                .last_volatility_update
                .is_some_and(|last| now.elapsed_since(last) < self.config.volatility_cooldown());
            if cooling || state.reserve_a.is_zero() || state.reserve_b.is_zero() {
                return Ok(VolatilityUpdate::Skipped);
            }
            let spot = Price::from_ratio(state.reserve_b, state.reserve_a)?;
            let past = state
                .oracle
                .consult(
                    now,
                    self.config.volatility_window(),
                    state.reserve_a,
                    state.reserve_b,
                )?
                .price_a;
            let change = spot.percent_change_from(&past);
            debug!(%spot, %past, change, "volatility sample");
            (state.volatility, score_from_change(change))
        };

        let mut state = self.state.borrow_mut();
        state.last_volatility_update = Some(now);
        let Some(current) = damped(previous, candidate, self.config.hysteresis()) else {
            return Ok(VolatilityUpdate::Unchanged { candidate });
        };
        let fee_tier = fee_tier_for(
            &self.pair,
            current,
            &*self.classifier,
            self.config.fee_schedule(),
        );
        let previous_tier = state.fee_tier;
        state.volatility = current;
        state.fee_tier = fee_tier;
        state.events.emit(PoolEvent::FeeTierChanged {
            previous: previous_tier,
            current: fee_tier,
            volatility: current,
        });
        Ok(VolatilityUpdate::Changed {
            previous,
            current,
            fee_tier,
        })
    }
}
