//! Integration tests exercising the public API end to end.
//!
//! Pools are created through [`PoolRegistry`] and funded through
//! [`InMemoryAssets`], the same way an embedding host would drive them.

#![allow(clippy::panic)]

use std::rc::Rc;

use adaptive_cpamm::prelude::*;
use ethnum::U256;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const X: Address = Address::from_bytes([1u8; 32]);
const Y: Address = Address::from_bytes([2u8; 32]);
const ADMIN: Address = Address::from_bytes([9u8; 32]);
const LP: Address = Address::from_bytes([10u8; 32]);
const TRADER: Address = Address::from_bytes([11u8; 32]);
const TREASURY: Address = Address::from_bytes([12u8; 32]);
const HOUR: u32 = 3_600;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ctx(caller: Address, t: u32) -> CallContext {
    CallContext::new(caller, Timestamp::new(t))
}

fn registry_with(config: PoolConfig, table: AssetTable) -> PoolRegistry {
    init_tracing();
    let Ok(registry) = PoolRegistry::new(config, Rc::new(table), ADMIN) else {
        panic!("valid registry");
    };
    registry
}

fn create(registry: &mut PoolRegistry, t: u32) -> Rc<Pool> {
    let Ok(pool) = registry.create_pool(X, Y, Timestamp::new(t)) else {
        panic!("pool creation");
    };
    pool
}

/// Transfers `(a, b)` from `from` into the pool and mints to `from`.
fn deposit(
    pool: &Pool,
    assets: &mut InMemoryAssets,
    from: Address,
    (a, b): (u128, u128),
    t: u32,
) -> Shares {
    assets.mint(&X, &from, Amount::new(a));
    assets.mint(&Y, &from, Amount::new(b));
    let (Ok(()), Ok(())) = (
        assets.transfer(&X, &from, &pool.address(), Amount::new(a)),
        assets.transfer(&Y, &from, &pool.address(), Amount::new(b)),
    ) else {
        panic!("funding transfer");
    };
    let Ok(shares) = pool.mint(&ctx(from, t), &*assets, from) else {
        panic!("mint");
    };
    shares
}

/// Sends `amount_in` of `asset_in` and swaps for the quoted output.
fn swap_exact_in(
    pool: &Pool,
    assets: &mut InMemoryAssets,
    asset_in: Address,
    amount_in: u128,
    t: u32,
) -> SwapOutcome {
    let Ok(request) = pool.quote_exact_in(&asset_in, Amount::new(amount_in), TRADER) else {
        panic!("quote");
    };
    assets.mint(&asset_in, &pool.address(), Amount::new(amount_in));
    let Ok(outcome) = pool.swap(&ctx(TRADER, t), assets, request) else {
        panic!("swap");
    };
    outcome
}

fn funded_pool(config: PoolConfig, reserves: (u128, u128)) -> (Rc<Pool>, InMemoryAssets) {
    let mut registry = registry_with(config, AssetTable::new());
    let pool = create(&mut registry, 0);
    let mut assets = InMemoryAssets::new();
    let _ = deposit(&pool, &mut assets, LP, reserves, 0);
    (pool, assets)
}

// ---------------------------------------------------------------------------
// Worked examples
// ---------------------------------------------------------------------------

#[test]
fn first_deposit_with_unit_floor() {
    let config = PoolConfig::default().with_minimum_share_floor(Shares::new(1));
    let (pool, _) = funded_pool(config, (1, 4));
    assert_eq!(pool.share_balance(&LP), Shares::new(1));
    assert_eq!(pool.share_balance(&Address::SINK), Shares::new(1));
    assert_eq!(pool.total_shares(), Shares::new(2));
    let (a, b, _) = pool.reserves();
    assert_eq!((a, b), (Amount::new(1), Amount::new(4)));
}

#[test]
fn small_swap_pays_one_unit() {
    let config = PoolConfig::default().with_minimum_share_floor(Shares::new(1));
    let (pool, mut assets) = funded_pool(config, (5, 10));
    let outcome = swap_exact_in(&pool, &mut assets, X, 1, 10);
    assert_eq!(outcome.amount_a_in, Amount::new(1));
    assert_eq!(outcome.amount_b_out, Amount::new(1));
    let (a, b, _) = pool.reserves();
    assert_eq!((a, b), (Amount::new(6), Amount::new(9)));
}

#[test]
fn hourly_observations_wrap_the_ring() {
    let (pool, assets) = funded_pool(PoolConfig::default(), (1_000_000, 1_000_000));
    for hour in 1..=24 {
        let Ok(()) = pool.sync(&ctx(TRADER, hour * HOUR), &assets) else {
            panic!("sync");
        };
    }
    assert_eq!(pool.observation_count(), 24);
    assert_eq!(pool.observation_write_index(), 1);
    let observations = pool.observations();
    assert_eq!(
        observations.first().map(|o| o.timestamp),
        Some(Timestamp::new(HOUR))
    );
    assert_eq!(
        observations.last().map(|o| o.timestamp),
        Some(Timestamp::new(24 * HOUR))
    );
}

// ---------------------------------------------------------------------------
// Swaps
// ---------------------------------------------------------------------------

#[test]
fn round_trip_swap_grows_invariant() {
    let (pool, mut assets) = funded_pool(PoolConfig::default(), (10_000_000, 20_000_000));
    let k0 = U256::new(10_000_000) * U256::new(20_000_000);
    let first = swap_exact_in(&pool, &mut assets, X, 50_000, 5);
    let _ = swap_exact_in(&pool, &mut assets, Y, first.amount_b_out.get(), 6);
    let (a, b, _) = pool.reserves();
    assert!(a.widen() * b.widen() > k0);
    assert_eq!(assets.balance_of(&X, &pool.address()), a);
    assert_eq!(assets.balance_of(&Y, &pool.address()), b);
}

#[test]
fn underpaid_swap_rolls_back() {
    let (pool, mut assets) = funded_pool(PoolConfig::default(), (1_000_000, 1_000_000));
    let Ok(request) = pool.quote_exact_in(&X, Amount::new(10_000), TRADER) else {
        panic!("quote");
    };
    let greedy = SwapRequest::new(
        Amount::ZERO,
        Amount::new(request.amount_b_out.get() + 1),
        TRADER,
    );
    assets.mint(&X, &pool.address(), Amount::new(10_000));
    let before = pool.reserves();
    let result = pool.swap(&ctx(TRADER, 5), &mut assets, greedy);
    let Err(err) = result else {
        panic!("expected rejection");
    };
    assert_eq!(err.kind(), ErrorKind::Invariant);
    assert_eq!(pool.reserves(), before);
    assert_eq!(assets.balance_of(&Y, &TRADER), Amount::ZERO);
}

struct Arbitrageur {
    repay: Amount,
}

impl FlashBorrower for Arbitrageur {
    fn on_borrow(
        &mut self,
        pool: &Pool,
        assets: &mut dyn AssetLedger,
        initiator: Address,
        _amount_a: Amount,
        amount_b: Amount,
        payload: &[u8],
    ) -> Result<()> {
        assert_eq!(payload, b"route-1");
        assert!(pool.is_locked());
        // the borrowed B is already spendable here
        assert!(assets.balance_of(&Y, &initiator) >= amount_b);
        assets
            .transfer(&X, &initiator, &pool.address(), self.repay)
            .map_err(|source| AmmError::TransferFailed {
                asset: X,
                to: pool.address(),
                amount: self.repay,
                source,
            })
    }
}

#[test]
fn flash_swap_repaid_in_callback() {
    let (pool, mut assets) = funded_pool(PoolConfig::default(), (1_000_000, 1_000_000));
    assets.mint(&X, &TRADER, Amount::new(10_000));
    let Ok(request) = pool.quote_exact_in(&X, Amount::new(10_000), TRADER) else {
        panic!("quote");
    };
    let mut borrower = Arbitrageur {
        repay: Amount::new(10_000),
    };
    let Ok(outcome) =
        pool.flash_swap(&ctx(TRADER, 5), &mut assets, request, &mut borrower, b"route-1")
    else {
        panic!("flash swap");
    };
    assert_eq!(outcome.amount_a_in, Amount::new(10_000));
    assert_eq!(assets.balance_of(&X, &TRADER), Amount::ZERO);
    assert!(!pool.is_locked());
}

struct Sneaky;

impl FlashBorrower for Sneaky {
    fn on_borrow(
        &mut self,
        pool: &Pool,
        assets: &mut dyn AssetLedger,
        initiator: Address,
        _amount_a: Amount,
        _amount_b: Amount,
        _payload: &[u8],
    ) -> Result<()> {
        // reading is fine, minting is not
        let _ = pool.reserves();
        pool.mint(&ctx(initiator, 5), &*assets, initiator).map(|_| ())
    }
}

#[test]
fn callback_cannot_reenter() {
    let (pool, mut assets) = funded_pool(PoolConfig::default(), (1_000_000, 1_000_000));
    let request = SwapRequest::new(Amount::new(1_000), Amount::ZERO, TRADER);
    let result = pool.flash_swap(&ctx(TRADER, 5), &mut assets, request, &mut Sneaky, &[]);
    assert_eq!(result, Err(AmmError::Reentrancy));
    assert_eq!(assets.balance_of(&X, &TRADER), Amount::ZERO);
    assert_eq!(pool.reserves().0, Amount::new(1_000_000));
}

// ---------------------------------------------------------------------------
// Liquidity
// ---------------------------------------------------------------------------

#[test]
fn burn_is_proportional_after_trading() {
    let (pool, mut assets) = funded_pool(PoolConfig::default(), (4_000_000, 1_000_000));
    let _ = swap_exact_in(&pool, &mut assets, Y, 25_000, 5);
    let (ra, rb, _) = pool.reserves();
    let total = pool.total_shares();
    let half = Shares::new(pool.share_balance(&LP).get() / 2);

    let Ok(()) = pool.transfer_shares(&ctx(LP, 6), pool.address(), half) else {
        panic!("custody transfer");
    };
    let Ok((a, b)) = pool.burn(&ctx(LP, 6), &mut assets, LP) else {
        panic!("burn");
    };
    assert_eq!(a.get(), half.get() * ra.get() / total.get());
    assert_eq!(b.get(), half.get() * rb.get() / total.get());
    assert_eq!(assets.balance_of(&X, &LP), a);
    assert!(pool.shares_conserved());
}

#[test]
fn shares_move_between_holders() {
    let (pool, mut assets) = funded_pool(PoolConfig::default(), (1_000_000, 1_000_000));
    let Ok(()) = pool.transfer_shares(&ctx(LP, 2), TRADER, Shares::new(10_000)) else {
        panic!("share transfer");
    };
    let Ok(()) = pool.transfer_shares(&ctx(TRADER, 3), pool.address(), Shares::new(10_000)) else {
        panic!("custody transfer");
    };
    let Ok((a, b)) = pool.burn(&ctx(TRADER, 3), &mut assets, TRADER) else {
        panic!("burn");
    };
    assert_eq!((a, b), (Amount::new(10_000), Amount::new(10_000)));
    assert_eq!(
        pool.transfer_shares(&ctx(Address::SINK, 4), TRADER, Shares::new(1)),
        Err(AmmError::LockedShares)
    );
}

#[test]
fn sync_twice_is_idempotent() {
    let (pool, mut assets) = funded_pool(PoolConfig::default(), (1_000_000, 1_000_000));
    assets.mint(&Y, &pool.address(), Amount::new(123));
    let Ok(()) = pool.sync(&ctx(TRADER, 9), &assets) else {
        panic!("sync");
    };
    let once = (pool.reserves(), pool.current_cumulative_prices(Timestamp::new(9)));
    let Ok(()) = pool.sync(&ctx(TRADER, 9), &assets) else {
        panic!("sync");
    };
    assert_eq!(
        (pool.reserves(), pool.current_cumulative_prices(Timestamp::new(9))),
        once
    );
    assert_eq!(pool.reserves().1, Amount::new(1_000_123));
}

// ---------------------------------------------------------------------------
// Registry and protocol fee
// ---------------------------------------------------------------------------

#[test]
fn registry_returns_one_pool_per_pair() {
    let mut registry = registry_with(PoolConfig::default(), AssetTable::new());
    assert!(matches!(
        registry.pool(X, Y),
        Err(AmmError::PoolNotFound(_))
    ));
    let pool = create(&mut registry, 0);
    let Ok(same) = registry.create_pool(Y, X, Timestamp::new(50)) else {
        panic!("idempotent create");
    };
    assert!(Rc::ptr_eq(&pool, &same));
    let Ok(pair) = AssetPair::new(Y, X) else {
        panic!("valid pair");
    };
    assert_eq!(pool.address(), PoolRegistry::pool_address(&pair));
    assert_eq!(registry.all_pools().len(), 1);
    assert_eq!(
        registry.create_pool(X, X, Timestamp::new(0)).map(|_| ()),
        Err(AmmError::IdenticalAssets(X))
    );
}

#[test]
fn registry_rejects_zero_share_floor() {
    init_tracing();
    let config = PoolConfig::default().with_minimum_share_floor(Shares::ZERO);
    let result = PoolRegistry::new(config, Rc::new(AssetTable::new()), ADMIN);
    let Err(err) = result else {
        panic!("expected rejection");
    };
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn protocol_fee_follows_registry_switch() {
    let mut registry = registry_with(PoolConfig::default(), AssetTable::new());
    assert_eq!(
        registry.set_fee_recipient(TRADER, Some(TREASURY)),
        Err(AmmError::Unauthorized(TRADER))
    );
    let Ok(()) = registry.set_fee_recipient(ADMIN, Some(TREASURY)) else {
        panic!("authorized");
    };
    let pool = create(&mut registry, 0);
    assert_eq!(pool.fee_recipient(), Some(TREASURY));

    let mut assets = InMemoryAssets::new();
    let _ = deposit(&pool, &mut assets, LP, (10_000_000, 10_000_000), 1);
    assert_eq!(
        pool.invariant_last(),
        U256::new(10_000_000) * U256::new(10_000_000)
    );
    for t in 2..12 {
        let _ = swap_exact_in(&pool, &mut assets, X, 500_000, t);
        let _ = swap_exact_in(&pool, &mut assets, Y, 500_000, t);
    }
    assert_eq!(pool.share_balance(&TREASURY), Shares::ZERO);

    // fee shares are only settled on the next liquidity event
    let _ = deposit(&pool, &mut assets, LP, (1_000, 1_000), 20);
    assert!(pool.share_balance(&TREASURY) > Shares::ZERO);
    let (a, b, _) = pool.reserves();
    assert_eq!(pool.invariant_last(), a.widen() * b.widen());
    assert!(pool.shares_conserved());

    let Ok(()) = registry.set_fee_recipient(ADMIN, None) else {
        panic!("authorized");
    };
    let _ = deposit(&pool, &mut assets, LP, (1_000, 1_000), 21);
    assert_eq!(pool.invariant_last(), U256::ZERO);
}

// ---------------------------------------------------------------------------
// Oracle and fee tiers
// ---------------------------------------------------------------------------

#[test]
fn twap_weights_prices_by_time() {
    let config = PoolConfig::default().with_observation_interval(10);
    let (pool, mut assets) = funded_pool(config, (1_000_000, 2_000_000));
    // price 2 from t = 0 to 100, then 4 from 100 to 200
    let Ok(()) = pool.sync(&ctx(TRADER, 100), &assets) else {
        panic!("sync");
    };
    assets.mint(&Y, &pool.address(), Amount::new(2_000_000));
    let Ok(()) = pool.sync(&ctx(TRADER, 100), &assets) else {
        panic!("sync");
    };
    let Ok(twap) = pool.consult(Timestamp::new(200), 200) else {
        panic!("consult");
    };
    assert_eq!(twap.window, 200);
    let Ok(three) = Price::from_ratio(Amount::new(3), Amount::new(1)) else {
        panic!("price");
    };
    assert_eq!(twap.price_a, three);
    let Ok(recent) = pool.consult(Timestamp::new(200), 100) else {
        panic!("consult");
    };
    assert_eq!(recent.window, 100);
    assert_eq!(recent.price_a.to_string(), "4.000000");
}

#[test]
fn asset_classes_pick_fee_tier() {
    const USDC: Address = Address::from_bytes([3u8; 32]);
    const DAI: Address = Address::from_bytes([4u8; 32]);
    const WETH: Address = Address::from_bytes([5u8; 32]);
    let table = AssetTable::new()
        .with_stable(USDC)
        .with_stable(DAI)
        .with_major(WETH);
    let mut registry = registry_with(PoolConfig::default(), table);
    let tier = |registry: &mut PoolRegistry, x, y| {
        let Ok(pool) = registry.create_pool(x, y, Timestamp::new(0)) else {
            panic!("pool creation");
        };
        pool.fee_tier()
    };
    assert_eq!(tier(&mut registry, USDC, DAI), FeeTier::TIER_0_01_PERCENT);
    assert_eq!(tier(&mut registry, WETH, USDC), FeeTier::TIER_0_05_PERCENT);
    assert_eq!(tier(&mut registry, X, Y), FeeTier::TIER_0_30_PERCENT);
}
