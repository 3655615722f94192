use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::cache::load_from_file;
use crate::selector::SelectorConfig;

pub const DEFAULT_MAX_HOPS: usize = 3;
pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 200;

/// Settings for a full discovery → quote → select run. Missing JSON fields
/// fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub selector: SelectorConfig,
    pub max_hops: usize,
    pub concurrency: usize,
    pub retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            selector: SelectorConfig::default(),
            max_hops: DEFAULT_MAX_HOPS,
            concurrency: DEFAULT_CONCURRENCY,
            retries: DEFAULT_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let config: AppConfig = load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_hops == 0 {
            return Err(anyhow!("max_hops must be at least 1"));
        }
        if self.concurrency == 0 {
            return Err(anyhow!("concurrency must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Fraction;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"max_hops": 2}"#).unwrap();
        assert_eq!(config.max_hops, 2);
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.selector, SelectorConfig::default());
    }

    #[test]
    fn test_nested_selector_threshold() {
        let json = r#"{"selector": {"less_hops_threshold": {"numerator": "-20", "denominator": "10000"}}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.selector.less_hops_threshold, Fraction::from_bips(-20));
    }

    #[test]
    fn test_validate_rejects_zero_hops() {
        let config = AppConfig { max_hops: 0, ..AppConfig::default() };
        assert!(config.validate().is_err());
        assert!(AppConfig::default().validate().is_ok());
    }
}
