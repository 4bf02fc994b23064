//! Property-based tests for the pool's economic invariants.
//!
//! 1. **Invariant monotonicity** — every quoted swap strictly grows `k`.
//! 2. **Share conservation** — balances sum to the supply after any
//!    sequence of deposits and withdrawals.
//! 3. **Proportionality** — a burn pays `s / total` of current balances.
//! 4. **Ring wraparound** — the ring keeps exactly the newest `N` entries.
//! 5. **Oracle accumulation** — cumulatives never decrease.

#![allow(clippy::panic)]

use ethnum::U256;
use proptest::prelude::*;

use super::fixtures::{ctx, seeded, LP, POOL, TRADER, X, Y};
use super::{Pool, SwapRequest};
use crate::domain::{Amount, Observation, Shares, Timestamp};
use crate::oracle::{ObservationRing, PriceOracle};
use crate::traits::AssetLedger;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn k(pool: &Pool) -> U256 {
    let (a, b, _) = pool.reserves();
    a.widen() * b.widen()
}

fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=1_000_000_000_000u128
}

/// Fraction in basis points, 1 ..= 5000.
fn fraction_strategy() -> impl Strategy<Value = u128> {
    1u128..=5_000u128
}

// ---------------------------------------------------------------------------
// Property 1: Invariant monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quoted_swap_grows_invariant(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        bps in fraction_strategy(),
        a_to_b in any::<bool>(),
    ) {
        let (pool, mut assets) = seeded(ra, rb);
        let (asset_in, reserve_in) = if a_to_b { (X, ra) } else { (Y, rb) };
        let amount_in = Amount::new((reserve_in * bps / 10_000).max(1));
        let Ok(request) = pool.quote_exact_in(&asset_in, amount_in, TRADER) else {
            return Ok(());
        };
        if request.amount_a_out.is_zero() && request.amount_b_out.is_zero() {
            return Ok(());
        }
        let before = k(&pool);
        assets.mint(&asset_in, &POOL, amount_in);
        let result = pool.swap(&ctx(TRADER, 2), &mut assets, request);
        prop_assert!(result.is_ok(), "quoted swap rejected: {:?}", result);
        prop_assert!(k(&pool) > before);
    }

    #[test]
    fn prop_overdrawn_swap_is_rejected_and_reverted(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        bps in fraction_strategy(),
    ) {
        let (pool, mut assets) = seeded(ra, rb);
        let amount_in = Amount::new((ra * bps / 10_000).max(1));
        let Ok(request) = pool.quote_exact_in(&X, amount_in, TRADER) else {
            return Ok(());
        };
        let greedy = SwapRequest::new(
            Amount::ZERO,
            Amount::new(request.amount_b_out.get() + 1),
            TRADER,
        );
        assets.mint(&X, &POOL, amount_in);
        let before = pool.reserves();
        let result = pool.swap(&ctx(TRADER, 2), &mut assets, greedy);
        prop_assert!(result.is_err());
        prop_assert_eq!(pool.reserves(), before);
        prop_assert_eq!(assets.balance_of(&Y, &TRADER), Amount::ZERO);
        prop_assert_eq!(assets.balance_of(&Y, &POOL), Amount::new(rb));
    }
}

// ---------------------------------------------------------------------------
// Property 2 & 3: Share conservation and proportionality
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_shares_conserved_across_operations(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        ops in prop::collection::vec((any::<bool>(), fraction_strategy()), 1..12),
    ) {
        let (pool, mut assets) = seeded(ra, rb);
        for (i, (deposit, bps)) in ops.into_iter().enumerate() {
            let t = 10 + u32::try_from(i).unwrap_or(0);
            if deposit {
                let (a, b, _) = pool.reserves();
                assets.mint(&X, &POOL, Amount::new(a.get() * bps / 10_000));
                assets.mint(&Y, &POOL, Amount::new(b.get() * bps / 10_000));
                if pool.mint(&ctx(TRADER, t), &assets, TRADER).is_err() {
                    // fold the rejected deposit into reserves
                    let Ok(()) = pool.sync(&ctx(TRADER, t), &assets) else {
                        panic!("sync within bounds");
                    };
                }
            } else {
                let held = pool.share_balance(&LP);
                let amount = Shares::new(held.get() * bps / 10_000);
                if pool.transfer_shares(&ctx(LP, t), POOL, amount).is_ok() {
                    let _ = pool.burn(&ctx(LP, t), &mut assets, LP);
                }
            }
            prop_assert!(pool.shares_conserved());
            let (a, b, _) = pool.reserves();
            prop_assert_eq!(assets.balance_of(&X, &POOL), a);
            prop_assert_eq!(assets.balance_of(&Y, &POOL), b);
        }
    }

    #[test]
    fn prop_burn_pays_share_of_current_balance(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        bps in fraction_strategy(),
        donation in 0u128..=1_000_000u128,
    ) {
        let (pool, mut assets) = seeded(ra, rb);
        assets.mint(&X, &POOL, Amount::new(donation));
        let shares = Shares::new(pool.share_balance(&LP).get() * bps / 10_000);
        prop_assume!(!shares.is_zero());
        let Ok(()) = pool.transfer_shares(&ctx(LP, 5), POOL, shares) else {
            panic!("LP holds the shares");
        };
        let total = pool.total_shares().get();
        let expected_a = shares.get() * (ra + donation) / total;
        let expected_b = shares.get() * rb / total;
        prop_assume!(expected_a > 0 && expected_b > 0);
        let Ok((paid_a, paid_b)) = pool.burn(&ctx(LP, 5), &mut assets, LP) else {
            panic!("burn of held shares");
        };
        prop_assert_eq!(paid_a, Amount::new(expected_a));
        prop_assert_eq!(paid_b, Amount::new(expected_b));
    }
}

// ---------------------------------------------------------------------------
// Property 4 & 5: Oracle ring and accumulation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_ring_keeps_newest(capacity in 1usize..=48, writes in 0u32..=150) {
        let Ok(mut ring) = ObservationRing::new(capacity) else {
            panic!("valid capacity");
        };
        for t in 0..writes {
            ring.push(Observation::new(Timestamp::new(t), U256::ZERO, U256::ZERO));
        }
        let n = writes as usize;
        prop_assert_eq!(ring.len(), n.min(capacity));
        prop_assert_eq!(ring.write_index(), n % capacity);
        let stamps: Vec<u32> = ring.iter().map(|o| o.timestamp.get()).collect();
        let start = u32::try_from(n.saturating_sub(capacity)).unwrap_or(0);
        prop_assert_eq!(stamps, (start..writes).collect::<Vec<_>>());
    }

    #[test]
    fn prop_cumulatives_never_decrease(
        steps in prop::collection::vec(
            (1u32..=10_000, 1u128..=1_000_000, 1u128..=1_000_000),
            1..40,
        ),
    ) {
        let Ok(mut oracle) = PriceOracle::new(8, 3_600, Timestamp::new(0)) else {
            panic!("valid oracle");
        };
        let mut now = Timestamp::new(0);
        let (mut reserve_a, mut reserve_b) = (Amount::new(1), Amount::new(1));
        for (dt, a, b) in steps {
            let before = (oracle.price_a_cumulative(), oracle.price_b_cumulative());
            now = now.add_secs(dt);
            oracle.accumulate(reserve_a, reserve_b, now);
            prop_assert!(oracle.price_a_cumulative() > before.0);
            prop_assert!(oracle.price_b_cumulative() >= before.1);
            reserve_a = Amount::new(a);
            reserve_b = Amount::new(b);
        }
    }
}
