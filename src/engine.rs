//! The exchange facade.
//!
//! [`ExchangeEngine`] wires one reserve store into a [`SwapExecutor`], a
//! [`LiquidityManager`] and a [`PriceSampler`], and exposes them in terms
//! of asset identifiers rather than internal swap directions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::PoolConfig;
use crate::domain::{
    Amount, AssetId, AssetPair, BasisPoints, LiquidityResult, PoolState, PricePoint, ProviderId,
    Quote, Shares, SwapResult, WithdrawResult,
};
use crate::error::AmmError;
use crate::executor::SwapExecutor;
use crate::history::{InMemoryPriceHistory, PriceSampler};
use crate::liquidity::LiquidityManager;
use crate::pricing::{required_input, FEE_RATE};
use crate::store::InMemoryReserveStore;
use crate::traits::{FromConfig, PriceSink, ReserveStore};

/// One two-asset pool with its swap, liquidity and history services.
///
/// All methods take `&self`; share the engine across threads with an
/// `Arc`.  Writers are serialized by the reserve store, quotes read a
/// single snapshot and never block.
///
/// # Examples
///
/// ```
/// use twinpool::config::PoolConfig;
/// use twinpool::domain::{Amount, AssetId, ProviderId};
/// use twinpool::engine::ExchangeEngine;
///
/// let usdc = AssetId::new("USDC").expect("valid");
/// let eurc = AssetId::new("EURC").expect("valid");
/// let cfg = PoolConfig::new(usdc.clone(), eurc.clone()).expect("valid");
/// let engine = ExchangeEngine::new(cfg).expect("valid");
///
/// let lp = ProviderId::new("lp-1").expect("valid");
/// engine.add_liquidity(&lp, Amount::new(1_000_000), Amount::new(2_000_000)).expect("seeded");
///
/// let quote = engine.quote_swap(&usdc, &eurc, Amount::new(10_000)).expect("priced");
/// let done = engine
///     .execute_swap(&usdc, &eurc, quote.input_amount(), quote.minimum_output())
///     .expect("filled");
/// assert_eq!(done.output_amount(), quote.output_amount());
/// ```
#[derive(Debug)]
pub struct ExchangeEngine<S = InMemoryReserveStore, H = InMemoryPriceHistory> {
    config: PoolConfig,
    pair: AssetPair,
    store: Arc<S>,
    history: Arc<H>,
    executor: SwapExecutor<S>,
    liquidity: LiquidityManager<S>,
    sampler: PriceSampler<S, H>,
}

impl ExchangeEngine {
    /// Creates an engine over an empty in-memory pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(config: PoolConfig) -> crate::error::Result<Self> {
        let history = InMemoryPriceHistory::new(config.history_capacity())?;
        Self::with_parts(
            config,
            Arc::new(InMemoryReserveStore::empty()),
            Arc::new(history),
        )
    }
}

impl<S: ReserveStore, H: PriceSink> ExchangeEngine<S, H> {
    /// Creates an engine over caller-supplied storage.
    ///
    /// The liquidity ledger starts empty, so `store` should hold an empty
    /// pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn with_parts(
        config: PoolConfig,
        store: Arc<S>,
        history: Arc<H>,
    ) -> crate::error::Result<Self> {
        config.validate()?;
        let pair = config.pair()?;
        let executor = SwapExecutor::new(Arc::clone(&store), config.minimum_reserve())?;
        let liquidity = LiquidityManager::new(Arc::clone(&store), config.deposit_policy());
        let sampler = PriceSampler::new(Arc::clone(&store), Arc::clone(&history));
        info!(
            pair = %pair,
            fee = %FEE_RATE,
            minimum_reserve = %config.minimum_reserve(),
            "exchange engine ready"
        );
        Ok(Self {
            config,
            pair,
            store,
            history,
            executor,
            liquidity,
            sampler,
        })
    }

    /// The configuration the engine was built from.
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// The traded asset pair.
    pub const fn pair(&self) -> &AssetPair {
        &self.pair
    }

    /// The price sink receiving samples.
    pub const fn history(&self) -> &Arc<H> {
        &self.history
    }

    /// Current reserves and share supply.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Storage`] if the store is unavailable.
    pub fn pool_state(&self) -> crate::error::Result<PoolState> {
        self.store.load().map(|v| v.value)
    }

    /// Quotes selling `input_amount` of `input` for `output` using the
    /// configured default slippage tolerance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] for an unknown asset, a zero amount or
    ///   an empty pool.
    /// - [`AmmError::Storage`] if the store is unavailable.
    pub fn quote_swap(
        &self,
        input: &AssetId,
        output: &AssetId,
        input_amount: Amount,
    ) -> crate::error::Result<Quote> {
        self.quote_swap_with_tolerance(input, output, input_amount, self.config.default_slippage())
    }

    /// Quotes a swap with an explicit slippage tolerance.
    ///
    /// # Errors
    ///
    /// As [`quote_swap`](Self::quote_swap), plus [`AmmError::InvalidInput`]
    /// if `tolerance` exceeds 100%.
    pub fn quote_swap_with_tolerance(
        &self,
        input: &AssetId,
        output: &AssetId,
        input_amount: Amount,
        tolerance: BasisPoints,
    ) -> crate::error::Result<Quote> {
        let direction = self.pair.direction(input, output)?;
        self.executor.quote(direction, input_amount, tolerance)
    }

    /// Quotes the smallest input that buys at least `output_amount`.
    ///
    /// The result is an ordinary exact-input quote whose output is no less
    /// than requested; execute it with [`execute_swap`](Self::execute_swap).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] for an unknown asset, a zero amount or
    ///   an empty pool.
    /// - [`AmmError::InsufficientLiquidity`] if the pool cannot pay
    ///   `output_amount`.
    pub fn quote_exact_output(
        &self,
        input: &AssetId,
        output: &AssetId,
        output_amount: Amount,
    ) -> crate::error::Result<Quote> {
        let direction = self.pair.direction(input, output)?;
        let state = self.pool_state()?;
        let (reserve_in, reserve_out) = state.reserves_for(direction);
        let input_amount = required_input(output_amount, reserve_in, reserve_out, FEE_RATE)?;
        crate::pricing::build_quote(
            &state,
            direction,
            input_amount,
            self.config.default_slippage(),
        )
    }

    /// Sells `input_amount` of `input` for at least `minimum_output` of
    /// `output`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] for an unknown asset, a zero amount or
    ///   an empty pool.
    /// - [`AmmError::SlippageExceeded`] if the live output is below
    ///   `minimum_output`.
    /// - [`AmmError::NoOpSwap`] if the output rounds to zero.
    /// - [`AmmError::InsufficientLiquidity`] if the reserve floor would be
    ///   breached.
    pub fn execute_swap(
        &self,
        input: &AssetId,
        output: &AssetId,
        input_amount: Amount,
        minimum_output: Amount,
    ) -> crate::error::Result<SwapResult> {
        let direction = self.pair.direction(input, output)?;
        self.executor.execute(direction, input_amount, minimum_output)
    }

    /// Deposits both assets on behalf of `provider`.
    ///
    /// The first deposit into an empty pool fixes its exchange rate.
    ///
    /// # Errors
    ///
    /// See [`LiquidityManager::add_liquidity`].
    pub fn add_liquidity(
        &self,
        provider: &ProviderId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> crate::error::Result<LiquidityResult> {
        self.liquidity.add_liquidity(provider, amount_a, amount_b)
    }

    /// Prices a deposit without writing.
    ///
    /// # Errors
    ///
    /// See [`LiquidityManager::quote_add_liquidity`].
    pub fn quote_add_liquidity(
        &self,
        amount_a: Amount,
        amount_b: Amount,
    ) -> crate::error::Result<LiquidityResult> {
        self.liquidity.quote_add_liquidity(amount_a, amount_b)
    }

    /// Burns `shares` owned by `provider`.
    ///
    /// # Errors
    ///
    /// See [`LiquidityManager::remove_liquidity`].
    pub fn remove_liquidity(
        &self,
        provider: &ProviderId,
        shares: Shares,
    ) -> crate::error::Result<WithdrawResult> {
        self.liquidity.remove_liquidity(provider, shares)
    }

    /// Prices a withdrawal without writing.
    ///
    /// # Errors
    ///
    /// See [`LiquidityManager::quote_remove_liquidity`].
    pub fn quote_remove_liquidity(&self, shares: Shares) -> crate::error::Result<WithdrawResult> {
        self.liquidity.quote_remove_liquidity(shares)
    }

    /// Shares owned by `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Storage`] if the ledger lock is poisoned.
    pub fn shares_of(&self, provider: &ProviderId) -> crate::error::Result<Shares> {
        self.liquidity.shares_of(provider)
    }

    /// Sum of all provider balances.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Storage`] if the ledger lock is poisoned.
    pub fn total_provider_shares(&self) -> crate::error::Result<Shares> {
        self.liquidity.ledger_snapshot()?.total()
    }

    /// Samples the spot price now; meant for a periodic scheduler.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if the pool is empty.
    pub fn sample_price(&self) -> crate::error::Result<PricePoint> {
        self.sampler.sample()
    }

    /// Samples the spot price with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if the pool is empty.
    pub fn sample_price_at(&self, timestamp: DateTime<Utc>) -> crate::error::Result<PricePoint> {
        self.sampler.sample_at(timestamp)
    }
}

impl FromConfig<PoolConfig> for ExchangeEngine {
    fn from_config(config: &PoolConfig) -> Result<Self, AmmError> {
        Self::new(config.clone())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn id(code: &str) -> AssetId {
        let Ok(id) = AssetId::new(code) else {
            panic!("valid asset");
        };
        id
    }

    fn lp() -> ProviderId {
        let Ok(p) = ProviderId::new("lp") else {
            panic!("valid provider");
        };
        p
    }

    fn engine() -> ExchangeEngine {
        let Ok(cfg) = PoolConfig::new(id("USDC"), id("EURC")) else {
            panic!("expected Ok");
        };
        let Ok(e) = ExchangeEngine::from_config(&cfg) else {
            panic!("expected Ok");
        };
        e
    }

    fn seeded() -> ExchangeEngine {
        let e = engine();
        assert!(e
            .add_liquidity(&lp(), Amount::new(1_000_000), Amount::new(2_000_000))
            .is_ok());
        e
    }

    #[test]
    fn unknown_asset_rejected() {
        let e = seeded();
        assert!(matches!(
            e.quote_swap(&id("USDC"), &id("BTC"), Amount::new(1)),
            Err(AmmError::InvalidInput(_))
        ));
        assert!(matches!(
            e.execute_swap(&id("USDC"), &id("USDC"), Amount::new(1), Amount::ZERO),
            Err(AmmError::InvalidInput(_))
        ));
    }

    #[test]
    fn asset_order_selects_direction() {
        let e = seeded();
        let Ok(ab) = e.quote_swap(&id("USDC"), &id("EURC"), Amount::new(10_000)) else {
            panic!("expected Ok");
        };
        let Ok(ba) = e.quote_swap(&id("EURC"), &id("USDC"), Amount::new(10_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(ab.output_amount(), Amount::new(19_743));
        assert_eq!(ba.output_amount(), Amount::new(4_960));
    }

    #[test]
    fn exact_output_quote_covers_request() {
        let e = seeded();
        let Ok(q) = e.quote_exact_output(&id("EURC"), &id("USDC"), Amount::new(5_000)) else {
            panic!("expected Ok");
        };
        assert!(q.output_amount() >= Amount::new(5_000));
        let Ok(r) = e.execute_swap(&id("EURC"), &id("USDC"), q.input_amount(), Amount::new(5_000))
        else {
            panic!("expected Ok");
        };
        assert!(r.output_amount() >= Amount::new(5_000));
    }

    #[test]
    fn empty_pool_swap_is_invalid_input() {
        let e = engine();
        assert!(matches!(
            e.execute_swap(&id("USDC"), &id("EURC"), Amount::new(10), Amount::ZERO),
            Err(AmmError::InvalidInput(_))
        ));
        assert!(matches!(e.sample_price(), Err(AmmError::InvalidInput(_))));
    }

    #[test]
    fn sample_lands_in_history() {
        let e = seeded();
        let Ok(p) = e.sample_price() else {
            panic!("expected Ok");
        };
        assert_eq!(e.history().latest(), Ok(Some(p)));
    }

    #[test]
    fn ledger_tracks_supply() {
        let e = seeded();
        let Ok(state) = e.pool_state() else {
            panic!("expected Ok");
        };
        assert_eq!(e.total_provider_shares(), Ok(state.share_supply()));
        assert_eq!(e.shares_of(&lp()), Ok(state.share_supply()));
    }
}
