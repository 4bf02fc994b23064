//! Time-weighted average price example.
//!
//! Moves the price of a pool once a day, records hourly observations and
//! reads TWAPs over different windows, then lets the volatility updater
//! react to the move.
//!
//! # Run
//!
//! ```bash
//! cargo run --example twap
//! ```

use std::rc::Rc;

use adaptive_cpamm::prelude::*;

const HOUR: u32 = 3_600;
const DAY: u32 = 24 * HOUR;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== TWAP Oracle ===\n");

    // ── 1. Create and fund the pool ─────────────────────────────────────
    let base = Address::from_bytes([1u8; 32]);
    let quote = Address::from_bytes([2u8; 32]);
    let lp = Address::from_bytes([10u8; 32]);
    let keeper = Address::from_bytes([11u8; 32]);

    let mut registry = PoolRegistry::new(PoolConfig::default(), Rc::new(AssetTable::new()), lp)?;
    let pool = registry.create_pool(base, quote, Timestamp::new(0))?;

    let mut assets = InMemoryAssets::new();
    assets.mint(&base, &pool.address(), Amount::new(1_000_000));
    assets.mint(&quote, &pool.address(), Amount::new(2_000_000));
    let _shares = pool.mint(&CallContext::new(lp, Timestamp::new(0)), &assets, lp)?;
    println!("Spot price: {}", pool.spot_price()?);

    // ── 2. One flat day of hourly syncs ─────────────────────────────────
    for hour in 1..=24 {
        pool.sync(&CallContext::new(keeper, Timestamp::new(hour * HOUR)), &assets)?;
    }

    // ── 3. The quote side doubles, then another six hours pass ──────────
    assets.mint(&quote, &pool.address(), Amount::new(2_000_000));
    for hour in 25..=30 {
        pool.sync(&CallContext::new(keeper, Timestamp::new(hour * HOUR)), &assets)?;
    }
    let now = Timestamp::new(30 * HOUR);
    println!("Spot price after move: {}", pool.spot_price()?);
    println!(
        "Observations: {} stored, next slot {}",
        pool.observation_count(),
        pool.observation_write_index()
    );

    // ── 4. Read TWAPs over several windows ──────────────────────────────
    println!("\n--- TWAP by window ---");
    for window in [HOUR, 6 * HOUR, 12 * HOUR, DAY] {
        let twap = pool.consult(now, window)?;
        println!(
            "  {:>2}h requested, {:>6}s used: {}",
            window / HOUR,
            twap.window,
            twap.price_a
        );
    }

    // ── 5. Rescore volatility against the daily average ─────────────────
    let update = pool.update_volatility(&CallContext::new(keeper, now))?;
    println!("\n--- Volatility update ---");
    println!("  Result:    {update:?}");
    println!("  Score:     {}", pool.volatility().get());
    println!("  Fee tier:  {} bps", pool.fee_tier().basis_points().get());

    let events = pool.drain_events();
    println!("\n{} events drained", events.len());

    println!("\n=== Done ===");
    Ok(())
}
