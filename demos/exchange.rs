//! Two-asset exchange walkthrough.
//!
//! Seeds a USDC/EURC pool from a TOML config, quotes and executes swaps,
//! samples the spot price, and withdraws liquidity.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=twinpool=debug cargo run --example exchange
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use twinpool::prelude::*;

const CONFIG: &str = r#"
asset_a = "USDC"
asset_b = "EURC"
minimum_reserve = 1000
default_slippage_bps = 50
deposit_policy = "refund_excess"
history_capacity = 288
"#;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "twinpool=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Two-asset exchange (x · y = k, {FEE_RATE} fee) ===\n");

    // ── 1. Build the engine from config ─────────────────────────────────
    let config = PoolConfig::from_toml_str(CONFIG)?;
    let usdc = config.asset_a().clone();
    let eurc = config.asset_b().clone();
    let engine = ExchangeEngine::from_config(&config)?;
    println!("Pool:            {}", engine.pair());
    println!("Reserve floor:   {}", config.minimum_reserve());

    // ── 2. Seed liquidity; the first deposit fixes the rate ─────────────
    let treasury = ProviderId::new("treasury")?;
    let seeded = engine.add_liquidity(&treasury, Amount::new(1_000_000), Amount::new(2_000_000))?;
    println!("\n--- Seed deposit ---");
    println!("{seeded}");
    println!("{}", engine.pool_state()?);

    // ── 3. Quote, then execute against the quote's floor ────────────────
    let quote = engine.quote_swap(&usdc, &eurc, Amount::new(10_000))?;
    println!("\n--- Quote: sell 10000 {usdc} ---");
    println!("{quote}");

    let fill = engine.execute_swap(&usdc, &eurc, quote.input_amount(), quote.minimum_output())?;
    println!("\n--- Fill ---");
    println!("{fill}");
    println!("{}", engine.pool_state()?);

    // ── 4. Buy an exact amount the other way ────────────────────────────
    let exact = engine.quote_exact_output(&eurc, &usdc, Amount::new(5_000))?;
    println!("\n--- Exact output: buy 5000 {usdc} ---");
    println!("  Required input: {} {eurc}", exact.input_amount());
    let fill = engine.execute_swap(&eurc, &usdc, exact.input_amount(), Amount::new(5_000))?;
    println!("  Received:       {} {usdc}", fill.output_amount());

    // ── 5. A stale quote is rejected, the pool is untouched ─────────────
    let stale = engine.quote_swap(&usdc, &eurc, Amount::new(20_000))?;
    engine.execute_swap(&usdc, &eurc, Amount::new(100_000), Amount::ZERO)?;
    let before = engine.pool_state()?;
    match engine.execute_swap(&usdc, &eurc, stale.input_amount(), stale.minimum_output()) {
        Err(e @ AmmError::SlippageExceeded { .. }) => println!("\nStale quote rejected: {e}"),
        other => println!("\nUnexpected outcome: {other:?}"),
    }
    assert_eq!(before, engine.pool_state()?);

    // ── 6. Second provider joins with an unbalanced deposit ─────────────
    let maker = ProviderId::new("market-maker")?;
    let joined = engine.add_liquidity(&maker, Amount::new(50_000), Amount::new(500_000))?;
    println!("\n--- Unbalanced deposit ---");
    println!("{joined}");

    // ── 7. Sample the spot price ────────────────────────────────────────
    let point = engine.sample_price()?;
    println!("\n--- Price sample ---");
    println!("  {eurc} per {usdc}: {}", point.spot_price);
    println!("  Volume A:     {}", point.volume_a);
    println!("  Volume B:     {}", point.volume_b);

    // ── 8. Withdraw everything the maker owns ───────────────────────────
    let owned = engine.shares_of(&maker)?;
    let out = engine.remove_liquidity(&maker, owned)?;
    println!("\n--- Withdrawal ---");
    println!("{out}");

    let state = engine.pool_state()?;
    println!("\nFinal {state}");
    println!("Swaps executed: {}", state.stats().swap_count);
    println!("Fees retained:  {} {usdc}, {} {eurc}", state.stats().fees_a, state.stats().fees_b);
    Ok(())
}
