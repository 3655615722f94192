use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

use super::RouteProvider;
use crate::models::{token_identifier, LiquidityPool, Route, Token};

const IDENTIFIER: &str = "POOL_GRAPH";

/// Enumerates simple paths through an in-memory pool snapshot.
pub struct PoolRouter {
    pools: Vec<LiquidityPool>,
    max_hops: usize,
}

impl PoolRouter {
    pub fn new(pools: Vec<LiquidityPool>, max_hops: usize) -> Self {
        Self { pools, max_hops }
    }

    pub fn pools(&self) -> &[LiquidityPool] {
        &self.pools
    }

    /// Every route from `input` to `output` using at most `max_hops` pools.
    ///
    /// Routes never revisit a token or reuse a pool; pools with an empty side
    /// are ignored. Order follows a depth-first walk of the pool list.
    pub fn compute_all_routes(&self, input: &Token, output: &Token) -> Vec<Route> {
        let mut routes = Vec::new();
        if input.same_currency(output) || self.max_hops == 0 {
            return routes;
        }
        let mut path = vec![input.clone()];
        let mut pool_ids = Vec::new();
        let mut used = vec![false; self.pools.len()];
        self.walk(output, &mut path, &mut pool_ids, &mut used, &mut routes);
        routes
    }

    fn walk(
        &self,
        output: &Token,
        path: &mut Vec<Token>,
        pool_ids: &mut Vec<String>,
        used: &mut [bool],
        routes: &mut Vec<Route>,
    ) {
        let current = path[path.len() - 1].clone();
        for (i, pool) in self.pools.iter().enumerate() {
            if used[i] || !pool.has_liquidity() {
                continue;
            }
            let next = match pool.other_token(&current) {
                Some(t) => t.clone(),
                None => continue,
            };
            if path.iter().any(|t| t.same_currency(&next)) {
                continue;
            }

            used[i] = true;
            path.push(next.clone());
            pool_ids.push(pool.pool_id.clone());

            if next.same_currency(output) {
                match Route::with_pools(path.clone(), pool_ids.clone()) {
                    Ok(route) => routes.push(route),
                    Err(e) => warn!(error = %e, "skipping unencodable route"),
                }
            } else if pool_ids.len() < self.max_hops {
                self.walk(output, path, pool_ids, used, routes);
            }

            pool_ids.pop();
            path.pop();
            used[i] = false;
        }
    }
}

#[async_trait]
impl RouteProvider for PoolRouter {
    fn identifier(&self) -> &str {
        IDENTIFIER
    }

    async fn routes(&self, input: &Token, output: &Token) -> Result<Vec<Route>> {
        let routes = self.compute_all_routes(input, output);
        debug!(
            input = %token_identifier(input),
            output = %token_identifier(output),
            count = routes.len(),
            "computed routes"
        );
        Ok(routes)
    }
}
