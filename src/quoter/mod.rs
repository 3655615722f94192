use std::collections::HashMap;

use async_trait::async_trait;
use num_bigint::BigUint;

use crate::models::{QuoteRequest, Route, TradeType};
use crate::routing::encode_route_to_path;
use crate::utils::to_hex_amount;

pub mod batch;
pub mod pool_quoter;

pub use batch::QuoteBatcher;
pub use pool_quoter::PoolQuoter;

/// Prices one encoded path for one amount.
///
/// `Ok(None)` means the lookup completed without a usable amount (the swap
/// would revert or the pools lack liquidity). `Err` is a transport failure and
/// may be retried.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    fn identifier(&self) -> &str;

    async fn quote_exact_input(
        &self,
        path: &str,
        amount_in: &BigUint,
    ) -> Result<Option<BigUint>, anyhow::Error>;

    async fn quote_exact_output(
        &self,
        path: &str,
        amount_out: &BigUint,
    ) -> Result<Option<BigUint>, anyhow::Error>;

    async fn quote(
        &self,
        trade_type: TradeType,
        path: &str,
        amount: &BigUint,
    ) -> Result<Option<BigUint>, anyhow::Error> {
        match trade_type {
            TradeType::ExactInput => self.quote_exact_input(path, amount).await,
            TradeType::ExactOutput => self.quote_exact_output(path, amount).await,
        }
    }
}

/// One request slot per route, positionally aligned with `routes`.
///
/// Every slot is `None` when `amount` is absent; the batch must still carry
/// one record per route.
pub fn quote_requests(
    routes: &[Route],
    amount: Option<&BigUint>,
    trade_type: TradeType,
) -> Vec<Option<QuoteRequest>> {
    let hex_amount = amount.map(to_hex_amount);
    routes
        .iter()
        .map(|route| {
            hex_amount.as_ref().map(|amount| QuoteRequest {
                path: encode_route_to_path(route, trade_type),
                amount: amount.clone(),
            })
        })
        .collect()
}

/// Memoizes encoded paths and the serialized amount between calls.
///
/// Purely a performance aid: [`QuoteRequestCache::requests`] returns the same
/// value as [`quote_requests`].
#[derive(Debug, Default)]
pub struct QuoteRequestCache {
    paths: HashMap<(Route, TradeType), String>,
    last_amount: Option<(BigUint, String)>,
}

impl QuoteRequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(
        &mut self,
        routes: &[Route],
        amount: Option<&BigUint>,
        trade_type: TradeType,
    ) -> Vec<Option<QuoteRequest>> {
        let hex_amount = amount.map(|amount| self.hex_amount(amount));
        routes
            .iter()
            .map(|route| {
                let amount = hex_amount.clone()?;
                let path = self
                    .paths
                    .entry((route.clone(), trade_type))
                    .or_insert_with(|| encode_route_to_path(route, trade_type))
                    .clone();
                Some(QuoteRequest { path, amount })
            })
            .collect()
    }

    pub fn cached_paths(&self) -> usize {
        self.paths.len()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
        self.last_amount = None;
    }

    fn hex_amount(&mut self, amount: &BigUint) -> String {
        match &self.last_amount {
            Some((cached, hex)) if cached == amount => hex.clone(),
            _ => {
                let hex = to_hex_amount(amount);
                self.last_amount = Some((amount.clone(), hex.clone()));
                hex
            }
        }
    }
}
