//! The two-asset constant-product pool.
//!
//! A [`Pool`] custodies two assets at its own [`address`](Pool::address)
//! on an external [`AssetLedger`], issues liquidity shares against
//! deposits, and trades under a fee-adjusted constant-product invariant.
//! Every reserve change feeds the time-weighted price oracle.
//!
//! # Operations
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`mint`](Pool::mint) | issue shares for assets already sent to the pool |
//! | [`burn`](Pool::burn) | redeem shares already sent to the pool |
//! | [`swap`](Pool::swap) / [`flash_swap`](Pool::flash_swap) | pay outputs, infer inputs, check the invariant |
//! | [`sync`](Pool::sync) | force reserves to balances |
//! | [`skim`](Pool::skim) | pay out balances above reserves |
//! | [`update_volatility`](Pool::update_volatility) | rescore volatility, maybe change fee tier |
//! | [`transfer_shares`](Pool::transfer_shares) | move the caller's shares |
//!
//! # Atomicity
//!
//! Operations take `&self`.  A two-state lock rejects any state-changing
//! call made while another is in flight with [`AmmError::Reentrancy`];
//! this is what stops a flash borrower from re-entering.  Each operation
//! validates and computes everything first and writes pool state last.
//! Asset transfers go through a [`Journal`](crate::assets::Journal) and
//! are reverted if anything after them fails.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use adaptive_cpamm::assets::InMemoryAssets;
//! use adaptive_cpamm::config::{AssetTable, PoolConfig};
//! use adaptive_cpamm::domain::{Address, Amount, AssetPair, Shares, Timestamp};
//! use adaptive_cpamm::pool::{CallContext, FeeSwitch, Pool};
//!
//! let (x, y) = (Address::from_bytes([1u8; 32]), Address::from_bytes([2u8; 32]));
//! let pool_addr = Address::from_bytes([0xaa; 32]);
//! let alice = Address::from_bytes([10u8; 32]);
//!
//! let pool = Pool::new(
//!     AssetPair::new(x, y).expect("distinct"),
//!     pool_addr,
//!     PoolConfig::default().with_minimum_share_floor(Shares::new(1)),
//!     Rc::new(AssetTable::new()),
//!     FeeSwitch::default(),
//!     Timestamp::new(0),
//! )
//! .expect("valid pool");
//!
//! let mut assets = InMemoryAssets::new();
//! assets.mint(&x, &pool_addr, Amount::new(1));
//! assets.mint(&y, &pool_addr, Amount::new(4));
//!
//! let ctx = CallContext::new(alice, Timestamp::new(1));
//! let minted = pool.mint(&ctx, &assets, alice).expect("first deposit");
//! assert_eq!(minted, Shares::new(1));
//! assert_eq!(pool.share_balance(&Address::SINK), Shares::new(1));
//! ```

mod context;
mod events;
mod liquidity;
mod lock;
mod state;
mod swap;
mod sync;
mod volatility;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod proptest_properties;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ethnum::U256;
use tracing::debug;

pub use context::{CallContext, FeeSwitch};
pub use events::PoolEvent;
pub use swap::{SwapOutcome, SwapRequest};
pub use volatility::VolatilityUpdate;

use self::events::EventLog;
use self::lock::Lock;
use self::state::PoolState;
use crate::config::PoolConfig;
use crate::domain::{
    Address, Amount, AssetPair, FeeTier, Observation, Price, Shares, Side, Timestamp,
    VolatilityScore,
};
use crate::error::AmmError;
use crate::fees::fee_tier_for;
use crate::ledger::LiquidityLedger;
use crate::math::get_amount_out;
use crate::oracle::{PriceOracle, Twap};
use crate::traits::{AssetClassifier, AssetLedger};

/// A two-asset constant-product pool with dynamic fees and a TWAP oracle.
pub struct Pool {
    address: Address,
    pair: AssetPair,
    config: PoolConfig,
    classifier: Rc<dyn AssetClassifier>,
    fee_switch: FeeSwitch,
    lock: Lock,
    state: RefCell<PoolState>,
}

impl Pool {
    /// Creates an empty pool custodied at `address`.
    ///
    /// The initial fee tier is classified from the configured initial
    /// volatility.  A [`PoolEvent::PoolCreated`] is emitted.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if `config` is invalid or
    ///   `address` is zero or one of the pair's assets.
    pub fn new(
        pair: AssetPair,
        address: Address,
        config: PoolConfig,
        classifier: Rc<dyn AssetClassifier>,
        fee_switch: FeeSwitch,
        now: Timestamp,
    ) -> Result<Self, AmmError> {
        config.validate()?;
        if address.is_zero() || pair.contains(&address) {
            return Err(AmmError::InvalidConfiguration(
                "pool address must be non-zero and distinct from its assets",
            ));
        }
        let volatility = config.initial_volatility();
        let fee_tier = fee_tier_for(&pair, volatility, &*classifier, config.fee_schedule());
        let oracle = PriceOracle::new(
            config.observation_capacity(),
            config.observation_interval(),
            now,
        )?;
        let mut events = EventLog::default();
        events.emit(PoolEvent::PoolCreated {
            pair,
            pool: address,
            fee_tier,
            volatility,
        });
        Ok(Self {
            address,
            pair,
            config,
            classifier,
            fee_switch,
            lock: Lock::default(),
            state: RefCell::new(PoolState {
                reserve_a: Amount::ZERO,
                reserve_b: Amount::ZERO,
                oracle,
                invariant_last: U256::ZERO,
                fee_tier,
                volatility,
                last_volatility_update: None,
                shares: LiquidityLedger::new(),
                events,
            }),
        })
    }

    // -- identity ---------------------------------------------------------

    /// Custody address holding the pool's assets and burn-pending shares.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The canonical asset pair.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Configuration the pool was built with.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Current protocol fee recipient.
    #[must_use]
    pub fn fee_recipient(&self) -> Option<Address> {
        self.fee_switch.recipient()
    }

    /// Returns `true` while a state-changing operation is in flight.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.lock.is_busy()
    }

    // -- reserves and pricing ---------------------------------------------

    /// `(reserve_a, reserve_b, last_update)`.
    #[must_use]
    pub fn reserves(&self) -> (Amount, Amount, Timestamp) {
        let state = self.state.borrow();
        (state.reserve_a, state.reserve_b, state.oracle.last_update())
    }

    /// Instantaneous price of A in B.
    ///
    /// # Errors
    ///
    /// [`AmmError::DivisionByZero`] while the pool is empty.
    pub fn spot_price(&self) -> Result<Price, AmmError> {
        let state = self.state.borrow();
        Price::from_ratio(state.reserve_b, state.reserve_a)
    }

    /// Current fee tier.
    #[must_use]
    pub fn fee_tier(&self) -> FeeTier {
        self.state.borrow().fee_tier
    }

    /// Current volatility score.
    #[must_use]
    pub fn volatility(&self) -> VolatilityScore {
        self.state.borrow().volatility
    }

    /// Time of the last non-skipped volatility update.
    #[must_use]
    pub fn last_volatility_update(&self) -> Option<Timestamp> {
        self.state.borrow().last_volatility_update
    }

    /// Invariant recorded at the last liquidity event while the protocol
    /// fee was on.
    #[must_use]
    pub fn invariant_last(&self) -> U256 {
        self.state.borrow().invariant_last
    }

    /// Output for an exact input of `asset_in` at the current fee tier,
    /// packaged as a request paying `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::AssetNotInPair`] if `asset_in` is not in the pair.
    /// - Any error from [`get_amount_out`].
    pub fn quote_exact_in(
        &self,
        asset_in: &Address,
        amount_in: Amount,
        to: Address,
    ) -> Result<SwapRequest, AmmError> {
        let (reserve_a, reserve_b, _) = self.reserves();
        let fee = self.fee_tier();
        match self.pair.side_of(asset_in) {
            Some(Side::A) => {
                let out = get_amount_out(amount_in, reserve_a, reserve_b, fee)?;
                Ok(SwapRequest::new(Amount::ZERO, out, to))
            }
            Some(Side::B) => {
                let out = get_amount_out(amount_in, reserve_b, reserve_a, fee)?;
                Ok(SwapRequest::new(out, Amount::ZERO, to))
            }
            None => Err(AmmError::AssetNotInPair(*asset_in)),
        }
    }

    // -- oracle -----------------------------------------------------------

    /// Price accumulators as they would read if updated at `now`.
    #[must_use]
    pub fn current_cumulative_prices(&self, now: Timestamp) -> (U256, U256) {
        let state = self.state.borrow();
        state
            .oracle
            .cumulatives_at(now, state.reserve_a, state.reserve_b)
    }

    /// Time-weighted average prices over roughly the last `seconds_ago`
    /// seconds.  See [`PriceOracle::consult`].
    ///
    /// # Errors
    ///
    /// [`AmmError::DivisionByZero`] if the spot fallback is needed while
    /// the pool is empty.
    pub fn consult(&self, now: Timestamp, seconds_ago: u32) -> Result<Twap, AmmError> {
        let state = self.state.borrow();
        state
            .oracle
            .consult(now, seconds_ago, state.reserve_a, state.reserve_b)
    }

    /// Stored observations, oldest first.
    #[must_use]
    pub fn observations(&self) -> Vec<Observation> {
        self.state.borrow().oracle.ring().iter().copied().collect()
    }

    /// Number of stored observations.
    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.state.borrow().oracle.ring().len()
    }

    /// Ring slot the next observation will be written to.
    #[must_use]
    pub fn observation_write_index(&self) -> usize {
        self.state.borrow().oracle.ring().write_index()
    }

    // -- shares -----------------------------------------------------------

    /// Total shares outstanding.
    #[must_use]
    pub fn total_shares(&self) -> Shares {
        self.state.borrow().shares.total_shares()
    }

    /// Share balance of `holder`.
    #[must_use]
    pub fn share_balance(&self, holder: &Address) -> Shares {
        self.state.borrow().shares.balance_of(holder)
    }

    /// Every non-zero share balance.
    #[must_use]
    pub fn share_holders(&self) -> Vec<(Address, Shares)> {
        self.state
            .borrow()
            .shares
            .holders()
            .map(|(a, s)| (*a, *s))
            .collect()
    }

    /// Returns `true` if share balances add up to the total supply.
    #[must_use]
    pub fn shares_conserved(&self) -> bool {
        self.state.borrow().shares.is_conserved()
    }

    // -- events -----------------------------------------------------------

    /// Events emitted since the last drain, oldest first.
    ///
    /// Reading does not release them; see [`drain_events`](Self::drain_events).
    #[must_use]
    pub fn pending_events(&self) -> Vec<PoolEvent> {
        self.state.borrow().events.pending().to_vec()
    }

    /// Takes all pending events.
    ///
    /// The pool keeps every event until it is drained, so a long-running
    /// embedder has to call this after each operation (or batch of
    /// operations) and forward the result to its indexer.
    pub fn drain_events(&self) -> Vec<PoolEvent> {
        self.state.borrow_mut().events.drain()
    }

    // -- internals --------------------------------------------------------

    fn balances<L: AssetLedger + ?Sized>(&self, assets: &L) -> (Amount, Amount) {
        (
            assets.balance_of(&self.pair.asset_a(), &self.address),
            assets.balance_of(&self.pair.asset_b(), &self.address),
        )
    }

    /// Pays `amount` of `asset` out of custody; zero amounts are skipped.
    fn send<L: AssetLedger + ?Sized>(
        &self,
        assets: &mut L,
        asset: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        debug!(asset = %asset, to = %to, %amount, "pool transfer");
        assets
            .transfer(asset, &self.address, to, amount)
            .map_err(|source| AmmError::TransferFailed {
                asset: *asset,
                to: *to,
                amount,
                source,
            })
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("address", &self.address)
            .field("pair", &self.pair)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
