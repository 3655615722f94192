use crate::error::RouteError;
use num_bigint::BigUint;
use tracing::warn;

/// Serialize an amount as a `0x`-prefixed lowercase hex string, the form quote
/// providers expect on the wire.
pub fn to_hex_amount(amount: &BigUint) -> String {
    format!("0x{}", amount.to_str_radix(16))
}

pub fn from_hex_amount(hex_amount: &str) -> Result<BigUint, RouteError> {
    let digits = hex_amount
        .strip_prefix("0x")
        .or_else(|| hex_amount.strip_prefix("0X"))
        .unwrap_or(hex_amount);
    if digits.is_empty() {
        return Err(RouteError::InvalidAmount(hex_amount.to_string()));
    }
    BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| RouteError::InvalidAmount(hex_amount.to_string()))
}

pub fn parse_decimal_amount(amount: &str) -> Result<BigUint, RouteError> {
    amount
        .trim()
        .parse::<BigUint>()
        .map_err(|_| RouteError::InvalidAmount(amount.to_string()))
}

/// Serde adapter writing big amounts as decimal strings.
pub mod biguint_string {
    use num_bigint::BigUint;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }

    pub mod option {
        use num_bigint::BigUint;
        use serde::{de::Error, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<BigUint>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => serializer.serialize_some(&v.to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<BigUint>, D::Error> {
            let s = Option::<String>::deserialize(deserializer)?;
            s.map(|s| s.parse().map_err(D::Error::custom)).transpose()
        }
    }
}

pub async fn retry<T, E, F, Fut>(mut retries: u32, base_delay_ms: u64, mut f: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Debug,
{
    let mut attempt = 0u32;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if retries == 0 => return Err(e),
            Err(e) => {
                // Exponential backoff: base_delay * 2^attempt, capped at 30s
                let delay = (base_delay_ms * (1u64 << attempt.min(5))).min(30_000);
                warn!(attempt = attempt + 1, error = ?e, delay_ms = delay, "lookup failed, retrying");
                tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
                retries -= 1;
                attempt += 1;
            }
        }
    }
}
