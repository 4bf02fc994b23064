//! Shared pool fixtures for unit tests.

#![allow(clippy::panic)]

use std::rc::Rc;

use super::{CallContext, FeeSwitch, Pool};
use crate::assets::InMemoryAssets;
use crate::config::{AssetTable, PoolConfig};
use crate::domain::{Address, Amount, AssetPair, Timestamp};

pub(crate) const X: Address = Address::from_bytes([1u8; 32]);
pub(crate) const Y: Address = Address::from_bytes([2u8; 32]);
pub(crate) const POOL: Address = Address::from_bytes([0xaa; 32]);
pub(crate) const LP: Address = Address::from_bytes([10u8; 32]);
pub(crate) const TRADER: Address = Address::from_bytes([11u8; 32]);
pub(crate) const TREASURY: Address = Address::from_bytes([12u8; 32]);

pub(crate) fn ctx(caller: Address, t: u32) -> CallContext {
    CallContext::new(caller, Timestamp::new(t))
}

pub(crate) fn pool_with(config: PoolConfig, fee_switch: FeeSwitch) -> Pool {
    let Ok(pair) = AssetPair::new(X, Y) else {
        panic!("valid pair");
    };
    let Ok(pool) = Pool::new(
        pair,
        POOL,
        config,
        Rc::new(AssetTable::new()),
        fee_switch,
        Timestamp::new(0),
    ) else {
        panic!("valid pool");
    };
    pool
}

/// Pool with a first deposit of `(ra, rb)` minted to [`LP`] at `t = 1`.
pub(crate) fn seeded_with(
    config: PoolConfig,
    fee_switch: FeeSwitch,
    ra: u128,
    rb: u128,
) -> (Pool, InMemoryAssets) {
    let pool = pool_with(config, fee_switch);
    let mut assets = InMemoryAssets::new();
    assets.mint(&X, &POOL, Amount::new(ra));
    assets.mint(&Y, &POOL, Amount::new(rb));
    let Ok(_) = pool.mint(&ctx(LP, 1), &assets, LP) else {
        panic!("seed deposit");
    };
    (pool, assets)
}

pub(crate) fn seeded(ra: u128, rb: u128) -> (Pool, InMemoryAssets) {
    seeded_with(PoolConfig::default(), FeeSwitch::default(), ra, rb)
}
