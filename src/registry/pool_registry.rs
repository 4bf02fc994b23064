//! Canonical-pair keyed pool registry.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::info;

use crate::config::PoolConfig;
use crate::domain::{Address, AssetPair, Timestamp};
use crate::error::AmmError;
use crate::pool::{FeeSwitch, Pool};
use crate::traits::AssetClassifier;

const POOL_ADDRESS_DOMAIN: &[u8] = b"adaptive-cpamm/pool/v1";

/// One pool per canonical asset pair.
///
/// Pools share the registry's configuration, asset classifier and
/// [`FeeSwitch`], so setting the fee recipient here turns the protocol fee
/// on or off for every pool at once.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
///
/// use adaptive_cpamm::config::{AssetTable, PoolConfig};
/// use adaptive_cpamm::domain::{Address, Timestamp};
/// use adaptive_cpamm::registry::PoolRegistry;
///
/// let admin = Address::from_bytes([9u8; 32]);
/// let (x, y) = (Address::from_bytes([1u8; 32]), Address::from_bytes([2u8; 32]));
///
/// let mut registry =
///     PoolRegistry::new(PoolConfig::default(), Rc::new(AssetTable::new()), admin)
///         .expect("valid config");
/// let pool = registry.create_pool(y, x, Timestamp::new(0)).expect("new pair");
/// let again = registry.create_pool(x, y, Timestamp::new(5)).expect("same pair");
///
/// assert!(Rc::ptr_eq(&pool, &again));
/// assert_eq!(registry.all_pools().len(), 1);
/// assert_eq!(pool.pair().asset_a(), x);
/// ```
pub struct PoolRegistry {
    config: PoolConfig,
    classifier: Rc<dyn AssetClassifier>,
    fee_switch: FeeSwitch,
    fee_recipient_setter: Address,
    by_pair: HashMap<AssetPair, usize>,
    pools: Vec<Rc<Pool>>,
}

impl PoolRegistry {
    /// Creates an empty registry with the protocol fee off.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(
        config: PoolConfig,
        classifier: Rc<dyn AssetClassifier>,
        fee_recipient_setter: Address,
    ) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            config,
            classifier,
            fee_switch: FeeSwitch::default(),
            fee_recipient_setter,
            by_pair: HashMap::new(),
            pools: Vec::new(),
        })
    }

    /// Deterministic custody address of the pool for `pair`.
    #[must_use]
    pub fn pool_address(pair: &AssetPair) -> Address {
        let mut hasher = blake3::Hasher::new();
        hasher.update(POOL_ADDRESS_DOMAIN);
        hasher.update(&pair.asset_a().as_bytes());
        hasher.update(&pair.asset_b().as_bytes());
        Address::from_bytes(*hasher.finalize().as_bytes())
    }

    /// Returns the pool for `(x, y)`, creating it on first request.
    ///
    /// Idempotent: the argument order and repeated calls return the same
    /// pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] / [`AmmError::NullAsset`] for an
    ///   invalid pair.
    /// - Any error from [`Pool::new`].
    pub fn create_pool(
        &mut self,
        x: Address,
        y: Address,
        now: Timestamp,
    ) -> Result<Rc<Pool>, AmmError> {
        let pair = AssetPair::new(x, y)?;
        if let Some(pool) = self.by_pair.get(&pair).and_then(|&i| self.pools.get(i)) {
            return Ok(Rc::clone(pool));
        }
        let address = Self::pool_address(&pair);
        let pool = Rc::new(Pool::new(
            pair,
            address,
            self.config.clone(),
            Rc::clone(&self.classifier),
            self.fee_switch.clone(),
            now,
        )?);
        self.by_pair.insert(pair, self.pools.len());
        self.pools.push(Rc::clone(&pool));
        info!(%pair, pool = %address, index = self.pools.len() - 1, "pool created");
        Ok(pool)
    }

    /// The pool for `(x, y)` in either order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] / [`AmmError::NullAsset`] for an
    ///   invalid pair.
    /// - [`AmmError::PoolNotFound`] if no pool exists.
    pub fn pool(&self, x: Address, y: Address) -> Result<Rc<Pool>, AmmError> {
        let pair = AssetPair::new(x, y)?;
        self.by_pair
            .get(&pair)
            .and_then(|&i| self.pools.get(i))
            .map(Rc::clone)
            .ok_or(AmmError::PoolNotFound(pair))
    }

    /// Every pool, in creation order.
    #[must_use]
    pub fn all_pools(&self) -> &[Rc<Pool>] {
        &self.pools
    }

    /// Current protocol fee recipient.
    #[must_use]
    pub fn fee_recipient(&self) -> Option<Address> {
        self.fee_switch.recipient()
    }

    /// Identity allowed to change the fee recipient.
    #[must_use]
    pub const fn fee_recipient_setter(&self) -> Address {
        self.fee_recipient_setter
    }

    /// Sets or clears the fee recipient for every pool.
    ///
    /// # Errors
    ///
    /// [`AmmError::Unauthorized`] unless `caller` is the setter.
    pub fn set_fee_recipient(
        &mut self,
        caller: Address,
        recipient: Option<Address>,
    ) -> Result<(), AmmError> {
        self.authorize(caller)?;
        self.fee_switch.set(recipient);
        info!(?recipient, "fee recipient updated");
        Ok(())
    }

    /// Hands the setter role to `setter`.
    ///
    /// # Errors
    ///
    /// [`AmmError::Unauthorized`] unless `caller` is the current setter.
    pub fn set_fee_recipient_setter(
        &mut self,
        caller: Address,
        setter: Address,
    ) -> Result<(), AmmError> {
        self.authorize(caller)?;
        self.fee_recipient_setter = setter;
        Ok(())
    }

    fn authorize(&self, caller: Address) -> Result<(), AmmError> {
        if caller == self.fee_recipient_setter {
            Ok(())
        } else {
            Err(AmmError::Unauthorized(caller))
        }
    }
}

impl std::fmt::Debug for PoolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("pools", &self.pools.len())
            .field("fee_recipient", &self.fee_switch.recipient())
            .field("fee_recipient_setter", &self.fee_recipient_setter)
            .finish_non_exhaustive()
    }
}
