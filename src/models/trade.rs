use crate::models::{Route, Token};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

/// A raw amount tagged with the currency it is denominated in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    pub currency: Token,
    #[serde(with = "crate::utils::biguint_string")]
    pub raw: BigUint,
}

impl CurrencyAmount {
    pub fn new(currency: Token, raw: BigUint) -> Self {
        Self { currency, raw }
    }

    pub fn native(raw: BigUint) -> Self {
        Self::new(Token::Native, raw)
    }

    /// Amount scaled down by the currency's decimals, for display only.
    pub fn to_exact(&self) -> String {
        let decimals = self.currency.decimals() as usize;
        let digits = self.raw.to_string();
        if decimals == 0 {
            return digits;
        }
        let padded = format!("{:0>width$}", digits, width = decimals + 1);
        let (whole, frac) = padded.split_at(padded.len() - decimals);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, frac)
        }
    }
}

/// The winning route priced for one direction. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trade {
    route: Route,
    trade_type: TradeType,
    input_amount: CurrencyAmount,
    output_amount: CurrencyAmount,
}

impl Trade {
    /// Build a trade from the fixed-side amount supplied by the caller and the
    /// quoted amount for the other side.
    ///
    /// The quoted amount is wrapped in `other_currency`: the output currency
    /// for exact input, the input currency for exact output.
    pub fn from_route(
        route: Route,
        trade_type: TradeType,
        fixed: CurrencyAmount,
        other_currency: &Token,
        quoted: BigUint,
    ) -> Self {
        let quoted = wrap_amount(other_currency, quoted);
        let (input_amount, output_amount) = match trade_type {
            TradeType::ExactInput => (fixed, quoted),
            TradeType::ExactOutput => (quoted, fixed),
        };
        Self {
            route,
            trade_type,
            input_amount,
            output_amount,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    pub fn input_amount(&self) -> &CurrencyAmount {
        &self.input_amount
    }

    pub fn output_amount(&self) -> &CurrencyAmount {
        &self.output_amount
    }
}

fn wrap_amount(currency: &Token, raw: BigUint) -> CurrencyAmount {
    match currency {
        Token::Native => CurrencyAmount::native(raw),
        Token::Issued(asset) => CurrencyAmount::new(Token::Issued(asset.clone()), raw),
    }
}
