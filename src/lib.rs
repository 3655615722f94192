//! # swap-route-selector
//!
//! Picks the best single-path route for a swap from a set of candidate routes
//! and their asynchronously loaded quotes.
//!
//! ## Layers
//!
//! | Layer | Module | Role |
//! |-------|--------|------|
//! | Discovery | [`routing`] | `RouteProvider`, pool-graph `PoolRouter`, path encoding |
//! | Quoting | [`quoter`] | `QuoteProvider`, constant-product `PoolQuoter`, `QuoteBatcher` |
//! | Selection | [`selector`] | readiness state + best-route reduction, both directions |
//! | Wiring | [`pipeline`] | discovery → batch → selection |
//!
//! The selector never fails: missing arguments, pending lookups and empty
//! results all surface as a [`SelectionState`].
//!
//! ## Quick Start
//!
//! ```rust
//! use num_bigint::BigUint;
//! use swap_route_selector::{
//!     BestTradeSelector, CurrencyAmount, QuoteRecord, Route, RouteSet, SelectionState, Token,
//! };
//! use swap_route_selector::models::from_identifier;
//!
//! let snek = from_identifier("279c909f348e533da5808898f87f9a14bb2c3dfbbacccd631d927a3f534e454b", 0).unwrap();
//! let routes = RouteSet::ready(vec![Route::new(vec![Token::Native, snek.clone()]).unwrap()]);
//! let quotes = vec![QuoteRecord::settled(Some(BigUint::from(4_200u32)))];
//!
//! let amount_in = CurrencyAmount::native(BigUint::from(1_000_000u32));
//! let result = BestTradeSelector::default().exact_in(Some(&amount_in), Some(&snek), &routes, &quotes);
//! assert_eq!(result.state, SelectionState::Valid);
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Sell 1 ADA for SNEK using a local pool snapshot
//! cargo run --release -- --pools pools.json native 279c...534e454b 1000000
//!
//! # Buy exactly 500 SNEK
//! cargo run --release -- --pools pools.json --exact-out native 279c...534e454b 500
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod quoter;
pub mod routing;
pub mod selector;
pub mod utils;

pub use cache::{load_from_file, load_pools, save_to_file};
pub use config::AppConfig;
pub use error::RouteError;
pub use models::{
    Asset, CurrencyAmount, Fraction, LiquidityPool, Percent, QuoteRecord, QuoteRequest, Route,
    Token, Trade, TradeType,
};
pub use pipeline::Pipeline;
pub use quoter::{quote_requests, PoolQuoter, QuoteBatcher, QuoteProvider, QuoteRequestCache};
pub use routing::{encode_route_to_path, PoolRouter, RouteProvider, RouteSet};
pub use selector::{
    best_trade_exact_in, best_trade_exact_out, BestTradeSelector, SelectionResult,
    SelectionState, SelectorConfig,
};
