use async_trait::async_trait;
use serde::Serialize;

use crate::models::{Route, Token};

pub mod path;
pub mod pool_router;

pub use path::{decode_path, encode_route_to_path};
pub use pool_router::PoolRouter;

/// Source of candidate routes between two currencies.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    fn identifier(&self) -> &str;

    async fn routes(&self, input: &Token, output: &Token) -> Result<Vec<Route>, anyhow::Error>;

    /// Fetch routes and wrap them as a ready [`RouteSet`].
    async fn route_set(&self, input: &Token, output: &Token) -> Result<RouteSet, anyhow::Error> {
        let routes = self.routes(input, output).await?;
        Ok(RouteSet::ready(routes))
    }
}

/// Candidate routes plus whether discovery is still running.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteSet {
    pub routes: Vec<Route>,
    pub loading: bool,
}

impl RouteSet {
    pub fn ready(routes: Vec<Route>) -> Self {
        Self {
            routes,
            loading: false,
        }
    }

    pub fn loading() -> Self {
        Self {
            routes: Vec::new(),
            loading: true,
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
