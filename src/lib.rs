//! # Adaptive CPAMM
//!
//! Accounting and pricing core of a two-asset constant-product liquidity
//! pool with dynamically selected fee tiers.
//!
//! The crate holds two reserves, issues fungible liquidity shares against
//! deposits, and trades under the fee-adjusted invariant
//!
//! ```text
//! (balance_a·D − in_a·f) · (balance_b·D − in_b·f) ≥ reserve_a · reserve_b · D²
//! ```
//!
//! Every reserve change feeds a time-weighted price oracle whose snapshots
//! live in a fixed-size ring buffer.  A rate-limited volatility updater
//! reads that history and moves the pool between fee tiers.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for config, events and value types |
//!
//! # Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use adaptive_cpamm::assets::InMemoryAssets;
//! use adaptive_cpamm::config::{AssetTable, PoolConfig};
//! use adaptive_cpamm::domain::{Address, Amount, Timestamp};
//! use adaptive_cpamm::pool::CallContext;
//! use adaptive_cpamm::registry::PoolRegistry;
//! use adaptive_cpamm::traits::AssetLedger;
//!
//! let usdc = Address::from_bytes([1u8; 32]);
//! let weth = Address::from_bytes([2u8; 32]);
//! let lp = Address::from_bytes([10u8; 32]);
//! let trader = Address::from_bytes([11u8; 32]);
//!
//! // 1. Create the pool through a registry
//! let mut registry =
//!     PoolRegistry::new(PoolConfig::default(), Rc::new(AssetTable::new()), lp)
//!         .expect("valid config");
//! let pool = registry.create_pool(usdc, weth, Timestamp::new(0)).expect("new pair");
//!
//! // 2. Deposit: send assets to the pool, then mint
//! let mut assets = InMemoryAssets::new();
//! assets.mint(&usdc, &pool.address(), Amount::new(1_000_000));
//! assets.mint(&weth, &pool.address(), Amount::new(1_000_000));
//! let ctx = CallContext::new(lp, Timestamp::new(10));
//! let shares = pool.mint(&ctx, &assets, lp).expect("first deposit");
//! assert_eq!(shares.get(), 1_000_000 - 1_000);
//!
//! // 3. Swap: pay the input, then request the quoted output
//! let request = pool
//!     .quote_exact_in(&usdc, Amount::new(10_000), trader)
//!     .expect("quote");
//! assets.mint(&usdc, &pool.address(), Amount::new(10_000));
//! let ctx = CallContext::new(trader, Timestamp::new(20));
//! let outcome = pool.swap(&ctx, &mut assets, request).expect("swap");
//!
//! assert_eq!(outcome.amount_a_in, Amount::new(10_000));
//! assert_eq!(assets.balance_of(&weth, &trader), outcome.amount_b_out);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Registry    │  one pool per canonical pair, shared fee switch
//! └──────┬───────┘
//!        │ create_pool
//!        ▼
//! ┌──────────────┐     ┌────────────┐
//! │     Pool      │────▶│ AssetLedger │  external balances (journaled)
//! └──┬───┬───┬───┘     └────────────┘
//!    │   │   │
//!    ▼   ▼   ▼
//!  ledger oracle fees   shares · TWAP ring · tier classifier
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Price`](domain::Price), [`AssetPair`](domain::AssetPair), etc. |
//! | [`traits`] | Seams: [`AssetLedger`](traits::AssetLedger), [`AssetClassifier`](traits::AssetClassifier), [`FlashBorrower`](traits::FlashBorrower) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig), [`FeeSchedule`](config::FeeSchedule), [`AssetTable`](config::AssetTable) |
//! | [`pool`] | The [`Pool`](pool::Pool) itself, its events and call context |
//! | [`oracle`] | Cumulative price accumulators and the observation ring |
//! | [`ledger`] | Liquidity share balances |
//! | [`fees`] | Fee tier classifier, volatility scoring, protocol fee |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry) |
//! | [`assets`] | In-memory asset ledger and transfer journal |
//! | [`math`] | Checked arithmetic, square root, quote helpers |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod assets;
pub mod config;
pub mod domain;
pub mod error;
pub mod fees;
pub mod ledger;
pub mod math;
pub mod oracle;
pub mod pool;
pub mod prelude;
pub mod registry;
pub mod traits;
