//! Runtime configuration for the wizard.
//!
//! Read from the environment, with CLI flags layered on top:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `SUI_RPC_URL` | mainnet fullnode | JSON-RPC endpoint |
//! | `WIZARD_RETRIES` | 3 | retries for transient RPC failures |
//! | `WIZARD_RETRY_INITIAL_MS` | 250 | first retry backoff |
//! | `WIZARD_RETRY_MAX_MS` | 2000 | backoff cap |
//! | `WIZARD_CACHE_TTL_SECS` | 30 | query freshness window (0 disables) |
//!
//! HTTP timeouts (`SUI_RPC_TIMEOUT_SECS`, `SUI_RPC_CONNECT_TIMEOUT_SECS`) are
//! read by the transport client itself.

use anyhow::{anyhow, Result};
use std::time::Duration;
use sui_transport::network::{default_rpc_endpoint, resolve_rpc_endpoint, NETWORKS};
use sui_wizard_types::env_utils::env_var_or;
use sui_wizard_types::{RetryConfig, DEFAULT_RETRIES};

const DEFAULT_RETRY_INITIAL_MS: u64 = 250;
const DEFAULT_RETRY_MAX_MS: u64 = 2000;
const DEFAULT_CACHE_TTL_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    pub rpc_url: String,
    pub retry: RetryConfig,
    pub cache_ttl: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_endpoint("mainnet"),
            retry: RetryConfig::default(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl WizardConfig {
    pub fn from_env() -> Self {
        Self {
            rpc_url: resolve_rpc_endpoint(None),
            retry: RetryConfig::new(
                env_var_or("WIZARD_RETRIES", DEFAULT_RETRIES),
                env_var_or("WIZARD_RETRY_INITIAL_MS", DEFAULT_RETRY_INITIAL_MS),
                env_var_or("WIZARD_RETRY_MAX_MS", DEFAULT_RETRY_MAX_MS),
            ),
            cache_ttl: Duration::from_secs(env_var_or(
                "WIZARD_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )),
        }
    }

    /// Point at a named network's public fullnode, overriding `SUI_RPC_URL`.
    pub fn with_network(mut self, network: &str) -> Result<Self> {
        let network = network.to_ascii_lowercase();
        if !NETWORKS.contains(&network.as_str()) {
            return Err(anyhow!(
                "unknown network '{}' (expected one of: {})",
                network,
                NETWORKS.join(", ")
            ));
        }
        self.rpc_url = default_rpc_endpoint(&network);
        Ok(self)
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_reads_overrides() {
        std::env::set_var("SUI_RPC_URL", "http://rpc.test:9000");
        std::env::set_var("WIZARD_RETRIES", "5");
        std::env::set_var("WIZARD_CACHE_TTL_SECS", "0");

        let cfg = WizardConfig::from_env();
        assert_eq!(cfg.rpc_url, "http://rpc.test:9000");
        assert_eq!(cfg.retry.retries, 5);
        assert_eq!(cfg.retry.initial_backoff, Duration::from_millis(250));
        assert_eq!(cfg.cache_ttl, Duration::ZERO);

        // an explicit network wins over the environment
        let testnet = cfg.with_network("Testnet").unwrap();
        assert!(testnet.rpc_url.contains("testnet"));

        std::env::remove_var("SUI_RPC_URL");
        std::env::remove_var("WIZARD_RETRIES");
        std::env::remove_var("WIZARD_CACHE_TTL_SECS");
    }

    #[test]
    fn test_unknown_network_is_rejected() {
        let err = WizardConfig::default().with_network("moonnet").unwrap_err();
        assert!(err.to_string().contains("mainnet, testnet, devnet, localnet"));
    }

    #[test]
    fn test_defaults() {
        let cfg = WizardConfig::default();
        assert!(cfg.rpc_url.contains("mainnet"));
        assert_eq!(cfg.retry, RetryConfig::default());
        assert_eq!(cfg.cache_ttl, Duration::from_secs(30));
    }
}
