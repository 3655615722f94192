use anyhow::Result;
use tracing::{info, warn};

use crate::models::{token_identifier, CurrencyAmount, QuoteRecord, QuoteRequest, Token, TradeType};
use crate::quoter::{QuoteBatcher, QuoteProvider, QuoteRequestCache};
use crate::routing::{RouteProvider, RouteSet};
use crate::selector::{BestTradeSelector, SelectionResult};

/// Wires route discovery, batched quoting and selection for one direction.
pub struct Pipeline<R: RouteProvider, Q: QuoteProvider + 'static> {
    router: R,
    batcher: QuoteBatcher<Q>,
    selector: BestTradeSelector,
    requests: QuoteRequestCache,
}

impl<R: RouteProvider, Q: QuoteProvider + 'static> Pipeline<R, Q> {
    pub fn new(router: R, batcher: QuoteBatcher<Q>, selector: BestTradeSelector) -> Self {
        Self {
            router,
            batcher,
            selector,
            requests: QuoteRequestCache::new(),
        }
    }

    pub fn trade_type(&self) -> TradeType {
        self.batcher.trade_type()
    }

    pub fn batcher(&self) -> &QuoteBatcher<Q> {
        &self.batcher
    }

    /// Discover routes, wait for every quote, and select.
    ///
    /// `amount` is the fixed side: denominated in `input` for exact input and
    /// in `output` for exact output.
    pub async fn best_trade(
        &mut self,
        input: &Token,
        output: &Token,
        amount: &CurrencyAmount,
    ) -> Result<SelectionResult> {
        let (route_set, requests) = self.prepare(input, output, amount).await?;
        let quotes = self.batcher.settle(&requests).await;
        Ok(self.select(input, output, amount, &route_set, &quotes))
    }

    /// Start lookups without waiting and select on whatever has landed. Call
    /// again to observe progress.
    pub async fn poll(
        &mut self,
        input: &Token,
        output: &Token,
        amount: &CurrencyAmount,
    ) -> Result<SelectionResult> {
        let (route_set, requests) = self.prepare(input, output, amount).await?;
        self.batcher.dispatch(&requests).await;
        let quotes = self.batcher.snapshot(&requests).await;
        Ok(self.select(input, output, amount, &route_set, &quotes))
    }

    /// Re-fetch quotes for the current routes. Earlier results stay visible
    /// as syncing until the new ones land.
    pub async fn refresh(&mut self, input: &Token, output: &Token, amount: &CurrencyAmount) -> Result<usize> {
        let (_, requests) = self.prepare(input, output, amount).await?;
        Ok(self.batcher.refresh(&requests).await)
    }

    async fn prepare(
        &mut self,
        input: &Token,
        output: &Token,
        amount: &CurrencyAmount,
    ) -> Result<(RouteSet, Vec<Option<QuoteRequest>>)> {
        let route_set = self.router.route_set(input, output).await?;
        info!(
            router = self.router.identifier(),
            input = %token_identifier(input),
            output = %token_identifier(output),
            routes = route_set.len(),
            "discovered routes"
        );
        if route_set.is_empty() && !route_set.loading {
            warn!(router = self.router.identifier(), "no candidate routes");
        }
        let trade_type = self.trade_type();
        let requests = self
            .requests
            .requests(&route_set.routes, Some(&amount.raw), trade_type);
        Ok((route_set, requests))
    }

    fn select(
        &self,
        input: &Token,
        output: &Token,
        amount: &CurrencyAmount,
        route_set: &RouteSet,
        quotes: &[QuoteRecord],
    ) -> SelectionResult {
        match self.trade_type() {
            TradeType::ExactInput => self.selector.exact_in(Some(amount), Some(output), route_set, quotes),
            TradeType::ExactOutput => self.selector.exact_out(Some(input), Some(amount), route_set, quotes),
        }
    }
}
