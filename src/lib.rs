//! # Twinpool
//!
//! Two-asset constant-product exchange engine: prices swaps between two
//! fungible balances, tracks pooled liquidity as fungible shares, and
//! enforces fee and slippage invariants under concurrent access.
//!
//! The engine never custodies assets.  It consumes a read/compare-and-swap
//! interface to the pool's reserves and returns transfer intents
//! ([`SwapResult`](domain::SwapResult), [`LiquidityResult`](domain::LiquidityResult),
//! [`WithdrawResult`](domain::WithdrawResult)) for a settlement layer to
//! execute.  Every amount is an integer in base units; no floating point
//! is accepted, produced, or used internally.
//!
//! ## Quick start
//!
//! ```rust
//! use twinpool::prelude::*;
//!
//! let usdc = AssetId::new("USDC").expect("valid asset");
//! let eurc = AssetId::new("EURC").expect("valid asset");
//! let engine = ExchangeEngine::new(PoolConfig::new(usdc.clone(), eurc.clone()).expect("valid"))
//!     .expect("engine");
//!
//! // 1. Seed the pool; this fixes the initial exchange rate.
//! let lp = ProviderId::new("treasury").expect("valid provider");
//! let seeded = engine
//!     .add_liquidity(&lp, Amount::new(1_000_000), Amount::new(2_000_000))
//!     .expect("seeded");
//! assert_eq!(seeded.shares_minted, Shares::new(1_414_213));
//!
//! // 2. Quote, then execute against the quote's slippage floor.
//! let quote = engine.quote_swap(&usdc, &eurc, Amount::new(10_000)).expect("quote");
//! assert_eq!(quote.fee_amount(), Amount::new(30));
//! let fill = engine
//!     .execute_swap(&usdc, &eurc, quote.input_amount(), quote.minimum_output())
//!     .expect("fill");
//! assert_eq!(fill.output_amount(), Amount::new(19_743));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  ExchangeEngine  │  asset ids → directions, default tolerance
//! └───┬──────┬───┬───┘
//!     │      │   └──────────────┐
//!     ▼      ▼                  ▼
//! ┌────────┐ ┌───────────────┐ ┌──────────────┐
//! │Executor│ │LiquidityMgr   │ │PriceSampler  │ read-only
//! └───┬────┘ └──────┬────────┘ └──────┬───────┘
//!     │  pricing    │ pricing         │
//!     ▼             ▼                 ▼
//! ┌──────────────────────────────────────────┐
//! │ ReserveStore (versioned compare-and-swap)│
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Module guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`PoolState`](domain::PoolState), [`Quote`](domain::Quote), … |
//! | [`math`] | Checked arithmetic, explicit rounding, 256-bit `mul_div` |
//! | [`pricing`] | Pure swap and liquidity formulas |
//! | [`traits`] | [`ReserveStore`](traits::ReserveStore), [`PriceSink`](traits::PriceSink), [`FromConfig`](traits::FromConfig) |
//! | [`store`] | [`InMemoryReserveStore`](store::InMemoryReserveStore) and the [`transact`](store::transact) loop |
//! | [`executor`] | [`SwapExecutor`](executor::SwapExecutor) |
//! | [`liquidity`] | [`LiquidityManager`](liquidity::LiquidityManager) and the share ledger |
//! | [`history`] | [`PriceSampler`](history::PriceSampler) and an in-memory price history |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) |
//! | [`engine`] | [`ExchangeEngine`](engine::ExchangeEngine) facade |
//! | [`error`] | [`AmmError`](error::AmmError) |
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and spans and never installs a
//! subscriber.  Committed mutations log at `debug`, rejected requests at
//! `warn`, invariant breaches at `error`, store conflicts at `trace`.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod executor;
pub mod history;
pub mod liquidity;
pub mod math;
pub mod prelude;
pub mod pricing;
pub mod store;
pub mod traits;
