use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Key of one quote lookup: an encoded route path and a hex amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub path: String,
    pub amount: String,
}

/// The state of one route's quote lookup at the moment of selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Output amount for exact input, input amount for exact output.
    #[serde(with = "crate::utils::biguint_string::option")]
    pub amount: Option<BigUint>,
    pub loading: bool,
    pub valid: bool,
    pub syncing: bool,
}

impl QuoteRecord {
    pub fn settled(amount: Option<BigUint>) -> Self {
        Self {
            amount,
            loading: false,
            valid: true,
            syncing: false,
        }
    }

    pub fn loading() -> Self {
        Self {
            amount: None,
            loading: true,
            valid: true,
            syncing: false,
        }
    }

    /// A previous result kept on display while a fresh lookup runs.
    pub fn syncing(stale: Option<BigUint>) -> Self {
        Self {
            amount: stale,
            loading: false,
            valid: true,
            syncing: true,
        }
    }

    /// Placeholder for a slot whose request could not be formed.
    pub fn invalid() -> Self {
        Self::default()
    }
}
