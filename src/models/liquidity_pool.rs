use crate::error::RouteError;
use crate::models::{token_identifier, Token};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

pub const BIPS_BASE: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiquidityPool {
    pub dex_identifier: String,
    pub asset_a: Token,
    pub asset_b: Token,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub pool_id: String,
    pub pool_fee_percent: f64,
}

impl LiquidityPool {
    pub fn new(
        dex_identifier: &str,
        asset_a: Token,
        asset_b: Token,
        reserve_a: u64,
        reserve_b: u64,
        pool_fee_percent: f64,
        pool_id: &str,
    ) -> Self {
        Self {
            dex_identifier: dex_identifier.to_string(),
            asset_a,
            asset_b,
            reserve_a,
            reserve_b,
            pool_id: pool_id.to_string(),
            pool_fee_percent,
        }
    }

    /// The token on the opposite side of `token`, if the pool trades it.
    pub fn other_token(&self, token: &Token) -> Option<&Token> {
        if self.asset_a.same_currency(token) {
            Some(&self.asset_b)
        } else if self.asset_b.same_currency(token) {
            Some(&self.asset_a)
        } else {
            None
        }
    }

    pub fn has_liquidity(&self) -> bool {
        self.reserve_a > 0 && self.reserve_b > 0
    }

    /// Pool fee in basis points, rounded and capped at 100%.
    pub fn fee_bips(&self) -> u64 {
        let bips = (self.pool_fee_percent * 100.0).round();
        if bips <= 0.0 {
            0
        } else {
            (bips as u64).min(BIPS_BASE)
        }
    }

    /// Reserves ordered as (reserve of `token_in`, reserve of the other side).
    fn reserves_from(&self, token_in: &Token) -> Result<(BigUint, BigUint), RouteError> {
        if self.asset_a.same_currency(token_in) {
            Ok((self.reserve_a.into(), self.reserve_b.into()))
        } else if self.asset_b.same_currency(token_in) {
            Ok((self.reserve_b.into(), self.reserve_a.into()))
        } else {
            Err(RouteError::TokenNotInPool {
                token: token_identifier(token_in),
                pool_id: self.pool_id.clone(),
            })
        }
    }

    /// Constant-product output for selling `amount_in` of `token_in`.
    ///
    /// `None` when the swap would revert (zero input or an empty side).
    pub fn amount_out(
        &self,
        token_in: &Token,
        amount_in: &BigUint,
    ) -> Result<Option<BigUint>, RouteError> {
        let (reserve_in, reserve_out) = self.reserves_from(token_in)?;
        let zero = BigUint::from(0u8);
        if *amount_in == zero || reserve_in == zero || reserve_out == zero {
            return Ok(None);
        }
        let with_fee = amount_in * (BIPS_BASE - self.fee_bips());
        let numerator = &with_fee * &reserve_out;
        let denominator = reserve_in * BIPS_BASE + with_fee;
        if denominator == zero {
            return Ok(None);
        }
        Ok(Some(numerator / denominator))
    }

    /// Constant-product input required to buy `amount_out` of `token_out`.
    ///
    /// `None` when the pool cannot supply `amount_out`.
    pub fn amount_in(
        &self,
        token_out: &Token,
        amount_out: &BigUint,
    ) -> Result<Option<BigUint>, RouteError> {
        let (reserve_out, reserve_in) = self.reserves_from(token_out)?;
        let zero = BigUint::from(0u8);
        let fee_factor = BIPS_BASE - self.fee_bips();
        if *amount_out == zero || reserve_in == zero || *amount_out >= reserve_out || fee_factor == 0 {
            return Ok(None);
        }
        let numerator = reserve_in * amount_out * BIPS_BASE;
        let denominator = (reserve_out - amount_out) * fee_factor;
        Ok(Some(numerator / denominator + 1u8))
    }
}
