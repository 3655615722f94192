use thiserror::Error;

/// Failures constructing routing values from untrusted input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route path must hold at least two tokens, got {0}")]
    PathTooShort(usize),

    #[error("route with {tokens} tokens needs {expected} pools, got {pools}")]
    PoolCountMismatch {
        tokens: usize,
        expected: usize,
        pools: usize,
    },

    #[error("'{0}' is not a native or hex asset identifier")]
    InvalidIdentifier(String),

    #[error("identifier '{0}' cannot appear in an encoded path")]
    ReservedSeparator(String),

    #[error("token {token} is not traded by pool {pool_id}")]
    TokenNotInPool { token: String, pool_id: String },

    #[error("fraction {0} has a zero denominator")]
    ZeroDenominator(String),

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
}
