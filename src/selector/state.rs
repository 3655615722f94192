use serde::{Deserialize, Serialize};

use crate::models::{CurrencyAmount, QuoteRecord, Token, TradeType};

/// Overall classification of one selection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionState {
    Loading,
    Invalid,
    NoRouteFound,
    Valid,
    Syncing,
}

/// Decide whether quotes are ready to be reduced.
///
/// Returns the fixed-side amount when reduction should proceed, or the state
/// to report immediately. Missing arguments are checked before any quote is
/// inspected, and loading before any amount is trusted.
pub fn gate<'a>(
    trade_type: TradeType,
    amount_specified: Option<&'a CurrencyAmount>,
    other_currency: Option<&Token>,
    routes_loading: bool,
    quotes: &[QuoteRecord],
) -> Result<&'a CurrencyAmount, SelectionState> {
    let amount = match (amount_specified, other_currency) {
        (Some(amount), Some(_)) => amount,
        _ => return Err(SelectionState::Invalid),
    };
    if trade_type == TradeType::ExactOutput && quotes.iter().any(|q| !q.valid) {
        return Err(SelectionState::Invalid);
    }
    if routes_loading || quotes.iter().any(|q| q.loading) {
        return Err(SelectionState::Loading);
    }
    Ok(amount)
}

/// State for a pass that found a winner.
pub fn settled_state(quotes: &[QuoteRecord]) -> SelectionState {
    if quotes.iter().any(|q| q.syncing) {
        SelectionState::Syncing
    } else {
        SelectionState::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn amount() -> CurrencyAmount {
        CurrencyAmount::native(BigUint::from(1_000u32))
    }

    #[test]
    fn test_missing_arguments_are_invalid_before_loading() {
        let quotes = vec![QuoteRecord::loading()];
        assert_eq!(
            gate(TradeType::ExactInput, None, Some(&Token::Native), true, &quotes),
            Err(SelectionState::Invalid)
        );
        let a = amount();
        assert_eq!(
            gate(TradeType::ExactInput, Some(&a), None, true, &quotes),
            Err(SelectionState::Invalid)
        );
    }

    #[test]
    fn test_invalid_quote_only_matters_for_exact_output() {
        let a = amount();
        let quotes = vec![QuoteRecord::invalid()];
        assert_eq!(
            gate(TradeType::ExactOutput, Some(&a), Some(&Token::Native), false, &quotes),
            Err(SelectionState::Invalid)
        );
        assert_eq!(
            gate(TradeType::ExactInput, Some(&a), Some(&Token::Native), false, &quotes),
            Ok(&a)
        );
    }

    #[test]
    fn test_loading_routes_or_quotes() {
        let a = amount();
        assert_eq!(
            gate(TradeType::ExactInput, Some(&a), Some(&Token::Native), true, &[]),
            Err(SelectionState::Loading)
        );
        let quotes = vec![QuoteRecord::settled(Some(BigUint::from(5u8))), QuoteRecord::loading()];
        assert_eq!(
            gate(TradeType::ExactOutput, Some(&a), Some(&Token::Native), false, &quotes),
            Err(SelectionState::Loading)
        );
    }

    #[test]
    fn test_settled_state() {
        let fresh = vec![QuoteRecord::settled(None)];
        assert_eq!(settled_state(&fresh), SelectionState::Valid);
        let stale = vec![QuoteRecord::settled(None), QuoteRecord::syncing(None)];
        assert_eq!(settled_state(&stale), SelectionState::Syncing);
    }
}
