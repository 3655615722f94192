use anyhow::{anyhow, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};

use crate::models::LiquidityPool;

/// Save a serializable object to a JSON file.
pub fn save_to_file<T: Serialize>(data: &T, path: &str) -> Result<()> {
    let file = File::create(path).map_err(|e| anyhow!("Failed to create file {}: {}", path, e))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, data)
        .map_err(|e| anyhow!("Failed to write JSON to {}: {}", path, e))?;
    Ok(())
}

/// Load a deserializable object from a JSON file.
pub fn load_from_file<T: DeserializeOwned>(path: &str) -> Result<T> {
    let file = File::open(path).map_err(|e| anyhow!("Failed to open file {}: {}", path, e))?;
    let reader = BufReader::new(file);
    let data = serde_json::from_reader(reader)
        .map_err(|e| anyhow!("Failed to parse JSON file {}: {}", path, e))?;
    Ok(data)
}

/// A pool snapshot on disk: either a bare array or `{ "pools": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PoolSnapshot {
    Bare(Vec<LiquidityPool>),
    Wrapped { pools: Vec<LiquidityPool> },
}

impl PoolSnapshot {
    pub fn into_pools(self) -> Vec<LiquidityPool> {
        match self {
            PoolSnapshot::Bare(pools) => pools,
            PoolSnapshot::Wrapped { pools } => pools,
        }
    }
}

pub fn load_pools(path: &str) -> Result<Vec<LiquidityPool>> {
    let snapshot: PoolSnapshot = load_from_file(path)?;
    Ok(snapshot.into_pools())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Token;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("swap-route-selector-{}-{}.json", name, std::process::id()))
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_pools_round_trip_in_both_layouts() {
        let pools = vec![LiquidityPool::new("TEST", Token::Native, Token::Native, 1, 2, 0.3, "p")];

        let bare = temp_path("bare");
        save_to_file(&pools, &bare).unwrap();
        assert_eq!(load_pools(&bare).unwrap(), pools);

        let wrapped = temp_path("wrapped");
        save_to_file(&PoolSnapshot::Wrapped { pools: pools.clone() }, &wrapped).unwrap();
        assert_eq!(load_pools(&wrapped).unwrap(), pools);

        let _ = std::fs::remove_file(bare);
        let _ = std::fs::remove_file(wrapped);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_pools("/nonexistent/pools.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/pools.json"));
    }
}
