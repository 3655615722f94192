pub mod asset;
pub mod fraction;
pub mod liquidity_pool;
pub mod quote;
pub mod route;
pub mod trade;

pub use asset::{from_identifier, token_identifier, token_name, Asset, Token};
pub use fraction::{Fraction, Percent};
pub use liquidity_pool::LiquidityPool;
pub use quote::{QuoteRecord, QuoteRequest};
pub use route::Route;
pub use trade::{CurrencyAmount, Trade, TradeType};
