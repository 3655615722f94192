use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use swap_route_selector::models::{from_identifier, token_identifier};
use swap_route_selector::utils::parse_decimal_amount;
use swap_route_selector::{
    load_pools, save_to_file, AppConfig, BestTradeSelector, CurrencyAmount, Pipeline, PoolQuoter,
    PoolRouter, QuoteBatcher, SelectionState, Token, TradeType,
};

#[derive(Parser, Debug)]
#[command(name = "swap-route-selector")]
#[command(about = "Select the best single-path swap route over a pool snapshot")]
#[command(version)]
struct Args {
    /// Pool snapshot JSON (array of pools or {"pools": [...]})
    #[arg(long)]
    pools: String,

    /// Optional JSON config (selector thresholds, max_hops, concurrency, retries)
    #[arg(short, long)]
    config: Option<String>,

    /// Treat <amount> as the exact output instead of the exact input
    #[arg(long)]
    exact_out: bool,

    /// Override max_hops from the config
    #[arg(long)]
    max_hops: Option<usize>,

    /// Also write the result JSON to this file
    #[arg(short, long)]
    output: Option<String>,

    /// Input token: 'native' or <policy_id><name_hex>
    token_in: String,

    /// Output token: 'native' or <policy_id><name_hex>
    token_out: String,

    /// Raw integer amount of the fixed side
    amount: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(max_hops) = args.max_hops {
        config.max_hops = max_hops;
    }
    config.validate()?;

    let pools = load_pools(&args.pools)?;
    info!(pools = pools.len(), path = %args.pools, "loaded pool snapshot");

    let token_in = resolve_token(&args.token_in, &pools)?;
    let token_out = resolve_token(&args.token_out, &pools)?;
    let raw = parse_decimal_amount(&args.amount)?;

    let (trade_type, fixed) = if args.exact_out {
        (TradeType::ExactOutput, CurrencyAmount::new(token_out.clone(), raw))
    } else {
        (TradeType::ExactInput, CurrencyAmount::new(token_in.clone(), raw))
    };

    let router = PoolRouter::new(pools.clone(), config.max_hops);
    let batcher = QuoteBatcher::new(PoolQuoter::new(pools), trade_type, config.concurrency)
        .with_retries(config.retries, config.retry_delay_ms);
    let selector = BestTradeSelector::new(config.selector.clone());
    let mut pipeline = Pipeline::new(router, batcher, selector);

    let result = pipeline.best_trade(&token_in, &token_out, &fixed).await?;
    match (&result.state, &result.trade) {
        (SelectionState::Valid | SelectionState::Syncing, Some(trade)) => info!(
            hops = trade.route().hop_count(),
            route = %trade.route().describe(),
            input = %trade.input_amount().to_exact(),
            output = %trade.output_amount().to_exact(),
            "best trade"
        ),
        (state, _) => warn!(?state, "no trade selected"),
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    if let Some(path) = &args.output {
        save_to_file(&result, path)?;
        info!(path = %path, "wrote result");
    }

    Ok(())
}

/// Prefer the snapshot's copy of a token so decimals are known.
fn resolve_token(id: &str, pools: &[swap_route_selector::LiquidityPool]) -> Result<Token> {
    let wanted = id.replace('.', "");
    let known = pools
        .iter()
        .flat_map(|p| [&p.asset_a, &p.asset_b])
        .find(|t| token_identifier(t) == wanted);
    match known {
        Some(token) => Ok(token.clone()),
        None => Ok(from_identifier(id, 0)?),
    }
}
