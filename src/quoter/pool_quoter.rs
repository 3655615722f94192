use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use num_bigint::BigUint;

use super::QuoteProvider;
use crate::models::{token_identifier, LiquidityPool, Token};
use crate::routing::decode_path;

const IDENTIFIER: &str = "POOL_QUOTER";

/// Off-chain quoter pricing paths with constant-product math over a pool
/// snapshot.
pub struct PoolQuoter {
    pools: HashMap<String, LiquidityPool>,
}

impl PoolQuoter {
    pub fn new(pools: Vec<LiquidityPool>) -> Self {
        Self {
            pools: pools.into_iter().map(|p| (p.pool_id.clone(), p)).collect(),
        }
    }

    /// Split an encoded path into `(token, pool, token, ...)` hops.
    ///
    /// Each hop's token is taken from the pool itself, matched on identifier.
    fn hops(&self, path: &str) -> Result<Vec<(&Token, &LiquidityPool)>> {
        let parts = decode_path(path)?;
        if parts.len() < 3 || parts.len() % 2 == 0 {
            return Err(anyhow!("path must alternate tokens and pools, got {} parts", parts.len()));
        }
        parts
            .chunks(2)
            .filter(|chunk| chunk.len() == 2)
            .map(|chunk| {
                let pool = self
                    .pools
                    .get(&chunk[1])
                    .ok_or_else(|| anyhow!("unknown pool {}", chunk[1]))?;
                let token = [&pool.asset_a, &pool.asset_b]
                    .into_iter()
                    .find(|t| token_identifier(t) == chunk[0])
                    .ok_or_else(|| anyhow!("token {} is not traded by pool {}", chunk[0], chunk[1]))?;
                Ok((token, pool))
            })
            .collect()
    }
}

#[async_trait]
impl QuoteProvider for PoolQuoter {
    fn identifier(&self) -> &str {
        IDENTIFIER
    }

    async fn quote_exact_input(&self, path: &str, amount_in: &BigUint) -> Result<Option<BigUint>> {
        let mut amount = amount_in.clone();
        for (token_in, pool) in self.hops(path)? {
            amount = match pool.amount_out(token_in, &amount)? {
                Some(out) => out,
                None => return Ok(None),
            };
        }
        Ok(Some(amount))
    }

    /// The path arrives output first, so hops walk from the output back to
    /// the input.
    async fn quote_exact_output(&self, path: &str, amount_out: &BigUint) -> Result<Option<BigUint>> {
        let mut amount = amount_out.clone();
        for (token_out, pool) in self.hops(path)? {
            amount = match pool.amount_in(token_out, &amount)? {
                Some(needed) => needed,
                None => return Ok(None),
            };
        }
        Ok(Some(amount))
    }
}
