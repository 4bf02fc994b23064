//! Flash swap example.
//!
//! Borrows WETH from a pool before paying for it, repays in USDC from
//! inside the callback, then shows that an underpaying borrower is
//! rolled back.
//!
//! # Run
//!
//! ```bash
//! cargo run --example flash_swap
//! ```

use std::rc::Rc;

use adaptive_cpamm::prelude::*;

/// Repays `repay` USDC from the initiator once the borrowed WETH arrives.
struct Repayer {
    usdc: Address,
    repay: Amount,
}

impl FlashBorrower for Repayer {
    fn on_borrow(
        &mut self,
        pool: &Pool,
        assets: &mut dyn AssetLedger,
        initiator: Address,
        _amount_a: Amount,
        amount_b: Amount,
        payload: &[u8],
    ) -> Result<()> {
        println!(
            "  callback: received {amount_b} WETH, payload {:?}",
            String::from_utf8_lossy(payload)
        );
        assets
            .transfer(&self.usdc, &initiator, &pool.address(), self.repay)
            .map_err(|source| AmmError::TransferFailed {
                asset: self.usdc,
                to: pool.address(),
                amount: self.repay,
                source,
            })
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== Flash Swap ===\n");

    // ── 1. Create and fund the pool ─────────────────────────────────────
    let usdc = Address::from_bytes([1u8; 32]);
    let weth = Address::from_bytes([2u8; 32]);
    let lp = Address::from_bytes([10u8; 32]);
    let trader = Address::from_bytes([11u8; 32]);

    let mut registry = PoolRegistry::new(PoolConfig::default(), Rc::new(AssetTable::new()), lp)?;
    let pool = registry.create_pool(usdc, weth, Timestamp::new(0))?;

    let mut assets = InMemoryAssets::new();
    assets.mint(&usdc, &pool.address(), Amount::new(1_000_000));
    assets.mint(&weth, &pool.address(), Amount::new(1_000_000));
    let shares = pool.mint(&CallContext::new(lp, Timestamp::new(1)), &assets, lp)?;
    println!("Pool {} funded, LP holds {shares} shares", pool.address());
    println!("  Fee tier: {} bps", pool.fee_tier().basis_points().get());

    // ── 2. Borrow WETH, repay USDC in the callback ──────────────────────
    let input = Amount::new(10_000);
    assets.mint(&usdc, &trader, input);
    let request = pool.quote_exact_in(&usdc, input, trader)?;
    let mut borrower = Repayer { usdc, repay: input };
    let ctx = CallContext::new(trader, Timestamp::new(2));
    let outcome = pool.flash_swap(&ctx, &mut assets, request, &mut borrower, b"arb")?;

    println!("\n--- Repaid flash swap ---");
    println!("  USDC in:   {}", outcome.amount_a_in);
    println!("  WETH out:  {}", outcome.amount_b_out);
    let (reserve_a, reserve_b, _) = pool.reserves();
    println!("  Reserves:  ({reserve_a}, {reserve_b})");

    // ── 3. Ask for one unit too many ────────────────────────────────────
    assets.mint(&usdc, &trader, input);
    let quoted = pool.quote_exact_in(&usdc, input, trader)?;
    let greedy = SwapRequest::new(
        Amount::ZERO,
        Amount::new(quoted.amount_b_out.get() + 1),
        trader,
    );
    let ctx = CallContext::new(trader, Timestamp::new(3));
    match pool.flash_swap(&ctx, &mut assets, greedy, &mut borrower, b"greedy") {
        Ok(_) => println!("\nUnexpected: greedy swap accepted"),
        Err(err) => {
            println!("\n--- Greedy flash swap ---");
            println!("  Rejected ({:?}): {err}", err.kind());
            println!(
                "  Trader still holds {} USDC",
                assets.balance_of(&usdc, &trader)
            );
        }
    }

    println!("\n=== Done ===");
    Ok(())
}
