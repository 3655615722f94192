use crate::models::{token_identifier, Route, TradeType};

/// Joins path parts; routes refuse token and pool ids containing it.
pub const SEPARATOR: &str = ":";

/// Encode a route into the opaque path token consumed by quote providers.
///
/// The path reads tokens and pool ids in swap order. Exact output paths are
/// encoded back to front, output token first.
pub fn encode_route_to_path(route: &Route, trade_type: TradeType) -> String {
    let tokens = route.path();
    let pools = route.pool_ids();
    let mut parts = Vec::with_capacity(tokens.len() + pools.len());
    for (i, token) in tokens.iter().enumerate() {
        parts.push(token_identifier(token));
        if let Some(pool_id) = pools.get(i) {
            parts.push(pool_id.clone());
        }
    }
    if trade_type == TradeType::ExactOutput {
        parts.reverse();
    }
    hex::encode(parts.join(SEPARATOR))
}

/// Inverse of [`encode_route_to_path`], for logs and providers.
pub fn decode_path(encoded: &str) -> anyhow::Result<Vec<String>> {
    let bytes = hex::decode(encoded)?;
    let text = String::from_utf8(bytes)?;
    Ok(text.split(SEPARATOR).map(String::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, Token};

    fn route() -> Route {
        Route::with_pools(
            vec![
                Token::Native,
                Token::Issued(Asset::new(&"aa".repeat(28), "01", 0)),
            ],
            vec!["pool-1".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_exact_input_path_in_swap_order() {
        let encoded = encode_route_to_path(&route(), TradeType::ExactInput);
        let parts = decode_path(&encoded).unwrap();
        assert_eq!(parts, vec!["native".to_string(), "pool-1".to_string(), format!("{}01", "aa".repeat(28))]);
    }

    #[test]
    fn test_exact_output_path_is_reversed() {
        let exact_in = decode_path(&encode_route_to_path(&route(), TradeType::ExactInput)).unwrap();
        let mut exact_out = decode_path(&encode_route_to_path(&route(), TradeType::ExactOutput)).unwrap();
        exact_out.reverse();
        assert_eq!(exact_in, exact_out);
    }
}
