use num_bigint::BigUint;
use tracing::debug;

use super::SelectorConfig;
use crate::models::{Percent, QuoteRecord, Route};

/// The route a reduction settled on, borrowed from the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestRoute<'a> {
    pub route: &'a Route,
    pub amount: &'a BigUint,
}

/// Pick the route with the largest quoted output.
///
/// A route that is not better still wins when it has fewer hops and
/// `best / candidate`, less one bip, is under the hop threshold.
pub fn best_route_exact_in<'a>(
    config: &SelectorConfig,
    routes: &'a [Route],
    quotes: &'a [QuoteRecord],
) -> Option<BestRoute<'a>> {
    reduce(routes, quotes, |best, route, amount| {
        let ratio = Percent::percent(best.amount, amount);
        let within_threshold = ratio
            .subtract(&config.one_bips)
            .less_than(&config.less_hops_threshold);
        let result_better = best.amount < amount;
        result_better || (within_threshold && route.hop_count() < best.route.hop_count())
    })
}

/// Pick the route with the smallest quoted input.
///
/// A route that is not better still wins when it has fewer hops and
/// `100% - candidate / best` exceeds the hop threshold. Unlike the exact
/// input rule no bip is subtracted.
pub fn best_route_exact_out<'a>(
    config: &SelectorConfig,
    routes: &'a [Route],
    quotes: &'a [QuoteRecord],
) -> Option<BestRoute<'a>> {
    reduce(routes, quotes, |best, route, amount| {
        let ratio = Percent::percent(amount, best.amount);
        let within_threshold = config
            .one_hundred_percent
            .subtract(&ratio)
            .greater_than(&config.less_hops_threshold);
        let result_better = best.amount > amount;
        result_better || (within_threshold && route.hop_count() < best.route.hop_count())
    })
}

/// Left fold over aligned pairs, skipping quotes without an amount. The first
/// usable pair is adopted unconditionally; later ones replace it when `adopt`
/// says so.
fn reduce<'a, F>(routes: &'a [Route], quotes: &'a [QuoteRecord], adopt: F) -> Option<BestRoute<'a>>
where
    F: Fn(&BestRoute<'a>, &'a Route, &'a BigUint) -> bool,
{
    routes
        .iter()
        .zip(quotes)
        .fold(None, |best: Option<BestRoute<'a>>, (route, quote)| {
            let amount = match &quote.amount {
                Some(amount) => amount,
                None => return best,
            };
            match best {
                None => Some(BestRoute { route, amount }),
                Some(current) if adopt(&current, route, amount) => {
                    debug!(
                        route = %route.describe(),
                        amount = %amount,
                        replaced = %current.route.describe(),
                        "adopted better route"
                    );
                    Some(BestRoute { route, amount })
                }
                Some(current) => Some(current),
            }
        })
}
