use crate::error::RouteError;
use crate::models::{token_identifier, token_name, Token};
use crate::routing::path::SEPARATOR;
use serde::Serialize;

/// An ordered token path through one or more pools.
///
/// Fields are private so a route always holds at least two tokens and, when
/// pool ids are known, exactly one pool per hop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Route {
    path: Vec<Token>,
    pool_ids: Vec<String>,
}

impl Route {
    pub fn new(path: Vec<Token>) -> Result<Self, RouteError> {
        Self::with_pools(path, Vec::new())
    }

    pub fn with_pools(path: Vec<Token>, pool_ids: Vec<String>) -> Result<Self, RouteError> {
        if path.len() < 2 {
            return Err(RouteError::PathTooShort(path.len()));
        }
        let expected = path.len() - 1;
        if !pool_ids.is_empty() && pool_ids.len() != expected {
            return Err(RouteError::PoolCountMismatch {
                tokens: path.len(),
                expected,
                pools: pool_ids.len(),
            });
        }
        let mut ids = path.iter().map(token_identifier).chain(pool_ids.iter().cloned());
        if let Some(id) = ids.find(|id| id.contains(SEPARATOR)) {
            return Err(RouteError::ReservedSeparator(id));
        }
        Ok(Self { path, pool_ids })
    }

    pub fn path(&self) -> &[Token] {
        &self.path
    }

    pub fn pool_ids(&self) -> &[String] {
        &self.pool_ids
    }

    pub fn hop_count(&self) -> usize {
        self.path.len() - 1
    }

    pub fn input(&self) -> &Token {
        &self.path[0]
    }

    pub fn output(&self) -> &Token {
        &self.path[self.path.len() - 1]
    }

    /// Human readable `ADA > SNEK > MIN` form for logs.
    pub fn describe(&self) -> String {
        self.path
            .iter()
            .map(token_name)
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Asset;

    fn issued(byte: &str) -> Token {
        Token::Issued(Asset::new(&byte.repeat(28), "", 0))
    }

    #[test]
    fn test_hop_count_and_ends() {
        let route = Route::new(vec![Token::Native, issued("aa"), issued("bb")]).unwrap();
        assert_eq!(route.hop_count(), 2);
        assert_eq!(route.input(), &Token::Native);
        assert_eq!(route.output(), &issued("bb"));
    }

    #[test]
    fn test_rejects_short_path() {
        assert_eq!(
            Route::new(vec![Token::Native]).unwrap_err(),
            RouteError::PathTooShort(1)
        );
    }

    #[test]
    fn test_rejects_pool_count_mismatch() {
        let err = Route::with_pools(
            vec![Token::Native, issued("aa"), issued("bb")],
            vec!["p1".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, RouteError::PoolCountMismatch { expected: 2, .. }));
    }

    #[test]
    fn test_rejects_ids_containing_path_separator() {
        let err = Route::with_pools(vec![Token::Native, issued("aa")], vec!["dex:pool".to_string()]).unwrap_err();
        assert_eq!(err, RouteError::ReservedSeparator("dex:pool".to_string()));

        let odd = Token::Issued(Asset::new("ab:cd", "", 0));
        assert_eq!(
            Route::new(vec![Token::Native, odd]).unwrap_err(),
            RouteError::ReservedSeparator("ab:cd".to_string())
        );
    }
}
