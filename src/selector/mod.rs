//! Best-trade selection over a route set and its aligned quote batch.
//!
//! Selection is a pure function of its inputs. Callers re-run it whenever
//! routes or quotes change; nothing is cached between calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{CurrencyAmount, Fraction, QuoteRecord, Token, Trade, TradeType};
use crate::routing::RouteSet;

pub mod reducer;
pub mod state;

pub use reducer::{best_route_exact_in, best_route_exact_out, BestRoute};
pub use state::SelectionState;

/// Ratio constants used by the hop tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub one_bips: Fraction,
    /// How close a fewer-hop route must be to the best one to replace it.
    pub less_hops_threshold: Fraction,
    pub one_hundred_percent: Fraction,
}

impl SelectorConfig {
    pub fn with_threshold(less_hops_threshold: Fraction) -> Self {
        Self {
            less_hops_threshold,
            ..Self::default()
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            one_bips: Fraction::from_bips(1),
            less_hops_threshold: Fraction::from_bips(50),
            one_hundred_percent: Fraction::new(1, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionResult {
    pub state: SelectionState,
    pub trade: Option<Trade>,
}

impl SelectionResult {
    fn without_trade(state: SelectionState) -> Self {
        Self { state, trade: None }
    }
}

/// Best exact-input trade: maximize output for a fixed `amount_in`.
pub fn best_trade_exact_in(
    config: &SelectorConfig,
    amount_in: Option<&CurrencyAmount>,
    currency_out: Option<&Token>,
    route_set: &RouteSet,
    quotes: &[QuoteRecord],
) -> SelectionResult {
    select(
        config,
        TradeType::ExactInput,
        amount_in,
        currency_out,
        route_set,
        quotes,
    )
}

/// Best exact-output trade: minimize input for a fixed `amount_out`.
pub fn best_trade_exact_out(
    config: &SelectorConfig,
    currency_in: Option<&Token>,
    amount_out: Option<&CurrencyAmount>,
    route_set: &RouteSet,
    quotes: &[QuoteRecord],
) -> SelectionResult {
    select(
        config,
        TradeType::ExactOutput,
        amount_out,
        currency_in,
        route_set,
        quotes,
    )
}

fn select(
    config: &SelectorConfig,
    trade_type: TradeType,
    amount_specified: Option<&CurrencyAmount>,
    other_currency: Option<&Token>,
    route_set: &RouteSet,
    quotes: &[QuoteRecord],
) -> SelectionResult {
    let fixed = match state::gate(
        trade_type,
        amount_specified,
        other_currency,
        route_set.loading,
        quotes,
    ) {
        Ok(fixed) => fixed,
        Err(state) => {
            debug!(?trade_type, ?state, "selection not ready");
            return SelectionResult::without_trade(state);
        }
    };
    // gate only passes when both sides are present
    let other_currency = match other_currency {
        Some(c) => c,
        None => return SelectionResult::without_trade(SelectionState::Invalid),
    };

    if route_set.len() != quotes.len() {
        warn!(
            routes = route_set.len(),
            quotes = quotes.len(),
            "route and quote lists are misaligned"
        );
    }

    let best = match trade_type {
        TradeType::ExactInput => best_route_exact_in(config, &route_set.routes, quotes),
        TradeType::ExactOutput => best_route_exact_out(config, &route_set.routes, quotes),
    };
    let best = match best {
        Some(best) => best,
        None => {
            debug!(?trade_type, routes = route_set.len(), "no route found");
            return SelectionResult::without_trade(SelectionState::NoRouteFound);
        }
    };

    let state = state::settled_state(quotes);
    debug!(
        ?trade_type,
        ?state,
        route = %best.route.describe(),
        amount = %best.amount,
        "selected route"
    );
    SelectionResult {
        state,
        trade: Some(Trade::from_route(
            best.route.clone(),
            trade_type,
            fixed.clone(),
            other_currency,
            best.amount.clone(),
        )),
    }
}

/// A selector bound to one set of ratio constants.
#[derive(Debug, Clone, Default)]
pub struct BestTradeSelector {
    config: SelectorConfig,
}

impl BestTradeSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn exact_in(
        &self,
        amount_in: Option<&CurrencyAmount>,
        currency_out: Option<&Token>,
        route_set: &RouteSet,
        quotes: &[QuoteRecord],
    ) -> SelectionResult {
        best_trade_exact_in(&self.config, amount_in, currency_out, route_set, quotes)
    }

    pub fn exact_out(
        &self,
        currency_in: Option<&Token>,
        amount_out: Option<&CurrencyAmount>,
        route_set: &RouteSet,
        quotes: &[QuoteRecord],
    ) -> SelectionResult {
        best_trade_exact_out(&self.config, currency_in, amount_out, route_set, quotes)
    }

    /// Dispatch on `trade_type`; `amount` is the fixed side, `other` the
    /// unfixed currency.
    pub fn select(
        &self,
        trade_type: TradeType,
        amount: Option<&CurrencyAmount>,
        other: Option<&Token>,
        route_set: &RouteSet,
        quotes: &[QuoteRecord],
    ) -> SelectionResult {
        select(&self.config, trade_type, amount, other, route_set, quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, Route};
    use num_bigint::BigUint;
    use proptest::prelude::*;

    fn out_token() -> Token {
        Token::Issued(Asset::new(&"ff".repeat(28), "", 6))
    }

    fn route_with_hops(hops: usize) -> Route {
        let mut path = vec![Token::Native];
        for i in 1..hops {
            path.push(Token::Issued(Asset::new(&format!("{:02x}", i).repeat(28), "", 0)));
        }
        path.push(out_token());
        Route::new(path).unwrap()
    }

    fn quote(amount: u64) -> QuoteRecord {
        QuoteRecord::settled(Some(BigUint::from(amount)))
    }

    fn amount(raw: u64) -> CurrencyAmount {
        CurrencyAmount::native(BigUint::from(raw))
    }

    fn selector() -> BestTradeSelector {
        BestTradeSelector::default()
    }

    #[test]
    fn test_missing_amount_is_invalid() {
        let routes = RouteSet::ready(vec![route_with_hops(1)]);
        let result = selector().exact_in(None, Some(&out_token()), &routes, &[quote(5)]);
        assert_eq!(result, SelectionResult { state: SelectionState::Invalid, trade: None });
    }

    #[test]
    fn test_missing_currency_is_invalid_even_while_loading() {
        let result = selector().exact_in(Some(&amount(10)), None, &RouteSet::loading(), &[]);
        assert_eq!(result.state, SelectionState::Invalid);
    }

    #[test]
    fn test_loading_takes_precedence_over_a_winner() {
        let routes = RouteSet::ready(vec![route_with_hops(1), route_with_hops(2)]);
        let quotes = vec![quote(1000), QuoteRecord::loading()];
        let result = selector().exact_in(Some(&amount(10)), Some(&out_token()), &routes, &quotes);
        assert_eq!(result.state, SelectionState::Loading);
        assert!(result.trade.is_none());
    }

    #[test]
    fn test_routes_loading() {
        let result = selector().exact_out(Some(&Token::Native), Some(&amount(10)), &RouteSet::loading(), &[]);
        assert_eq!(result.state, SelectionState::Loading);
    }

    #[test]
    fn test_empty_route_set_has_no_route() {
        let routes = RouteSet::ready(Vec::new());
        let r = selector().exact_in(Some(&amount(10)), Some(&out_token()), &routes, &[]);
        assert_eq!(r.state, SelectionState::NoRouteFound);
        let r = selector().exact_out(Some(&Token::Native), Some(&amount(10)), &routes, &[]);
        assert_eq!(r.state, SelectionState::NoRouteFound);
    }

    #[test]
    fn test_all_absent_amounts_has_no_route() {
        let routes = RouteSet::ready(vec![route_with_hops(1), route_with_hops(2)]);
        let quotes = vec![QuoteRecord::settled(None), QuoteRecord::settled(None)];
        let r = selector().exact_in(Some(&amount(10)), Some(&out_token()), &routes, &quotes);
        assert_eq!(r.state, SelectionState::NoRouteFound);
        assert!(r.trade.is_none());
    }

    #[test]
    fn test_exact_out_invalid_quote_beats_loading() {
        let routes = RouteSet::ready(vec![route_with_hops(1), route_with_hops(2)]);
        let quotes = vec![QuoteRecord::invalid(), QuoteRecord::loading()];
        let r = selector().exact_out(Some(&Token::Native), Some(&amount(10)), &routes, &quotes);
        assert_eq!(r.state, SelectionState::Invalid);
    }

    #[test]
    fn test_valid_exact_in_trade() {
        let routes = RouteSet::ready(vec![route_with_hops(1), route_with_hops(3)]);
        let quotes = vec![quote(990), quote(1000)];
        let r = selector().exact_in(Some(&amount(500)), Some(&out_token()), &routes, &quotes);
        assert_eq!(r.state, SelectionState::Valid);
        let trade = r.trade.unwrap();
        assert_eq!(trade.route(), &routes.routes[1]);
        assert_eq!(trade.trade_type(), TradeType::ExactInput);
        assert_eq!(trade.input_amount(), &amount(500));
        assert_eq!(trade.output_amount(), &CurrencyAmount::new(out_token(), BigUint::from(1000u32)));
    }

    #[test]
    fn test_swapped_order_keeps_more_hops_under_default_threshold() {
        let routes = RouteSet::ready(vec![route_with_hops(3), route_with_hops(1)]);
        let quotes = vec![quote(1000), quote(990)];
        let r = selector().exact_in(Some(&amount(500)), Some(&out_token()), &routes, &quotes);
        assert_eq!(r.trade.unwrap().route().hop_count(), 3);
    }

    #[test]
    fn test_syncing_when_any_quote_is_stale() {
        let routes = RouteSet::ready(vec![route_with_hops(1), route_with_hops(2)]);
        let quotes = vec![quote(10), QuoteRecord::syncing(Some(BigUint::from(8u8)))];
        let r = selector().exact_out(Some(&Token::Native), Some(&amount(10)), &routes, &quotes);
        assert_eq!(r.state, SelectionState::Syncing);
        let trade = r.trade.unwrap();
        assert_eq!(trade.input_amount(), &amount(8));
        assert_eq!(trade.output_amount(), &amount(10));
    }

    #[test]
    fn test_config_json_defaults() {
        let config: SelectorConfig =
            serde_json::from_str(r#"{"less_hops_threshold":{"numerator":"25","denominator":"10000"}}"#).unwrap();
        assert_eq!(config.less_hops_threshold, Fraction::from_bips(25));
        assert_eq!(config.one_bips, Fraction::from_bips(1));
        assert_eq!(config.one_hundred_percent, Fraction::new(1, 1));
    }

    fn arb_quotes() -> impl Strategy<Value = Vec<(usize, Option<u64>)>> {
        prop::collection::vec((1usize..4, prop::option::of(0u64..1_000_000)), 0..8)
    }

    proptest! {
        #[test]
        fn prop_selection_is_deterministic(entries in arb_quotes(), exact_out in any::<bool>()) {
            let routes = RouteSet::ready(entries.iter().map(|(h, _)| route_with_hops(*h)).collect());
            let quotes: Vec<QuoteRecord> = entries
                .iter()
                .map(|(_, a)| QuoteRecord::settled(a.map(BigUint::from)))
                .collect();
            let trade_type = if exact_out { TradeType::ExactOutput } else { TradeType::ExactInput };
            let s = selector();
            let first = s.select(trade_type, Some(&amount(100)), Some(&out_token()), &routes, &quotes);
            let second = s.select(trade_type, Some(&amount(100)), Some(&out_token()), &routes, &quotes);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_equal_hops_prefers_larger_output(a in 1u64..1_000_000, b in 1u64..1_000_000, hops in 1usize..4) {
            prop_assume!(a != b);
            let routes = RouteSet::ready(vec![route_with_hops(hops), route_with_hops(hops)]);
            let quotes = vec![quote(a), quote(b)];
            let r = selector().exact_in(Some(&amount(100)), Some(&out_token()), &routes, &quotes);
            let trade = r.trade.unwrap();
            prop_assert_eq!(trade.output_amount().raw.clone(), BigUint::from(a.max(b)));
        }

        #[test]
        fn prop_equal_hops_prefers_smaller_input(a in 1u64..1_000_000, b in 1u64..1_000_000, hops in 1usize..4) {
            prop_assume!(a != b);
            let routes = RouteSet::ready(vec![route_with_hops(hops), route_with_hops(hops)]);
            let quotes = vec![quote(a), quote(b)];
            let r = selector().exact_out(Some(&Token::Native), Some(&amount(100)), &routes, &quotes);
            let trade = r.trade.unwrap();
            prop_assert_eq!(trade.input_amount().raw.clone(), BigUint::from(a.min(b)));
        }
    }
}
