//! Per-pool tuning parameters.

use super::FeeSchedule;
use crate::domain::{Shares, VolatilityScore};
use crate::error::AmmError;

/// Default ring capacity: one day of hourly observations.
pub const DEFAULT_OBSERVATION_CAPACITY: usize = 24;
/// Default minimum spacing between stored observations (1 h).
pub const DEFAULT_OBSERVATION_INTERVAL: u32 = 3_600;
/// Default minimum spacing between volatility recomputations (24 h).
pub const DEFAULT_VOLATILITY_COOLDOWN: u32 = 86_400;
/// Default TWAP lookback used by the volatility updater (24 h).
pub const DEFAULT_VOLATILITY_WINDOW: u32 = 86_400;
/// Default score change required before a new score is committed.
pub const DEFAULT_HYSTERESIS: u8 = 5;
/// Default starting volatility of a new pool.
pub const DEFAULT_INITIAL_VOLATILITY: u8 = 30;
/// Default shares permanently locked at the sink on the first deposit.
pub const DEFAULT_MINIMUM_SHARE_FLOOR: u128 = 1_000;
/// Default protocol fee factor: the protocol receives `1 / (factor + 1)`
/// of share-value growth.
pub const DEFAULT_PROTOCOL_FEE_FACTOR: u32 = 5;

/// Largest accepted observation ring.
const MAX_OBSERVATION_CAPACITY: usize = 65_535;

/// Tuning parameters for a [`Pool`](crate::pool::Pool).
///
/// Built from [`Default`] and adjusted with the `with_*` methods; the pool
/// calls [`validate`](Self::validate) on construction.
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::config::PoolConfig;
/// use adaptive_cpamm::domain::Shares;
///
/// let cfg = PoolConfig::default()
///     .with_observation_capacity(48)
///     .with_minimum_share_floor(Shares::new(1));
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.observation_capacity(), 48);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    observation_capacity: usize,
    observation_interval: u32,
    volatility_cooldown: u32,
    volatility_window: u32,
    hysteresis: u8,
    initial_volatility: VolatilityScore,
    minimum_share_floor: Shares,
    protocol_fee_factor: u32,
    fee_schedule: FeeSchedule,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            observation_capacity: DEFAULT_OBSERVATION_CAPACITY,
            observation_interval: DEFAULT_OBSERVATION_INTERVAL,
            volatility_cooldown: DEFAULT_VOLATILITY_COOLDOWN,
            volatility_window: DEFAULT_VOLATILITY_WINDOW,
            hysteresis: DEFAULT_HYSTERESIS,
            initial_volatility: VolatilityScore::new(DEFAULT_INITIAL_VOLATILITY),
            minimum_share_floor: Shares::new(DEFAULT_MINIMUM_SHARE_FLOOR),
            protocol_fee_factor: DEFAULT_PROTOCOL_FEE_FACTOR,
            fee_schedule: FeeSchedule::default(),
        }
    }
}

impl PoolConfig {
    /// Validates all parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the observation ring
    /// is empty or oversized, if any interval is zero, if the minimum share
    /// floor or the protocol fee factor is zero, or if the fee schedule is
    /// invalid.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.observation_capacity == 0 {
            return Err(AmmError::InvalidConfiguration(
                "observation capacity must be positive",
            ));
        }
        if self.observation_capacity > MAX_OBSERVATION_CAPACITY {
            return Err(AmmError::InvalidConfiguration(
                "observation capacity exceeds 65535",
            ));
        }
        if self.observation_interval == 0 {
            return Err(AmmError::InvalidConfiguration(
                "observation interval must be positive",
            ));
        }
        if self.volatility_window == 0 {
            return Err(AmmError::InvalidConfiguration(
                "volatility window must be positive",
            ));
        }
        if self.minimum_share_floor.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "minimum share floor must be positive",
            ));
        }
        if self.protocol_fee_factor == 0 {
            return Err(AmmError::InvalidConfiguration(
                "protocol fee factor must be positive",
            ));
        }
        self.fee_schedule.validate()
    }

    /// Sets the observation ring capacity.
    #[must_use]
    pub const fn with_observation_capacity(mut self, capacity: usize) -> Self {
        self.observation_capacity = capacity;
        self
    }

    /// Sets the minimum spacing between observations, in seconds.
    #[must_use]
    pub const fn with_observation_interval(mut self, secs: u32) -> Self {
        self.observation_interval = secs;
        self
    }

    /// Sets the volatility recomputation cooldown, in seconds.
    #[must_use]
    pub const fn with_volatility_cooldown(mut self, secs: u32) -> Self {
        self.volatility_cooldown = secs;
        self
    }

    /// Sets the TWAP lookback of the volatility updater, in seconds.
    #[must_use]
    pub const fn with_volatility_window(mut self, secs: u32) -> Self {
        self.volatility_window = secs;
        self
    }

    /// Sets the hysteresis margin.
    #[must_use]
    pub const fn with_hysteresis(mut self, margin: u8) -> Self {
        self.hysteresis = margin;
        self
    }

    /// Sets the starting volatility score.
    #[must_use]
    pub const fn with_initial_volatility(mut self, score: VolatilityScore) -> Self {
        self.initial_volatility = score;
        self
    }

    /// Sets the minimum share floor locked on the first deposit.
    #[must_use]
    pub const fn with_minimum_share_floor(mut self, floor: Shares) -> Self {
        self.minimum_share_floor = floor;
        self
    }

    /// Sets the protocol fee factor.
    #[must_use]
    pub const fn with_protocol_fee_factor(mut self, factor: u32) -> Self {
        self.protocol_fee_factor = factor;
        self
    }

    /// Replaces the fee schedule.
    #[must_use]
    pub const fn with_fee_schedule(mut self, schedule: FeeSchedule) -> Self {
        self.fee_schedule = schedule;
        self
    }

    /// Observation ring capacity.
    #[must_use]
    pub const fn observation_capacity(&self) -> usize {
        self.observation_capacity
    }

    /// Minimum spacing between observations.
    #[must_use]
    pub const fn observation_interval(&self) -> u32 {
        self.observation_interval
    }

    /// Volatility recomputation cooldown.
    #[must_use]
    pub const fn volatility_cooldown(&self) -> u32 {
        self.volatility_cooldown
    }

    /// Volatility TWAP lookback.
    #[must_use]
    pub const fn volatility_window(&self) -> u32 {
        self.volatility_window
    }

    /// Hysteresis margin.
    #[must_use]
    pub const fn hysteresis(&self) -> u8 {
        self.hysteresis
    }

    /// Starting volatility.
    #[must_use]
    pub const fn initial_volatility(&self) -> VolatilityScore {
        self.initial_volatility
    }

    /// Minimum share floor.
    pub const fn minimum_share_floor(&self) -> Shares {
        self.minimum_share_floor
    }

    /// Protocol fee factor.
    #[must_use]
    pub const fn protocol_fee_factor(&self) -> u32 {
        self.protocol_fee_factor
    }

    /// Fee schedule.
    #[must_use]
    pub const fn fee_schedule(&self) -> &FeeSchedule {
        &self.fee_schedule
    }
}
