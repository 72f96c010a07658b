//! Sui token wizard: create a Sui coin without writing Move.
//!
//! [`TokenWizard`] ties the pieces together:
//!
//! - [`TokenWizard::create_coin`] patches the embedded coin template with the
//!   user's name, symbol, description and decimals (offline),
//! - [`TokenWizard::coin_balances`] and [`TokenWizard::treasury_caps`] list
//!   an owner's coins and the coins they can mint,
//! - [`TokenWizard::denied_addresses`] reads the deny list of a regulated coin.
//!
//! ```no_run
//! use sui_token_wizard::{TokenParameters, TokenWizard, WizardConfig};
//!
//! let wizard = TokenWizard::new(WizardConfig::from_env());
//! let params = TokenParameters::new("Demo Token", "DMT", "A demo", 9)?;
//! let patched = wizard.create_coin(&params)?;
//! println!("{} bytes", patched.bytes().len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod logging;

pub use config::WizardConfig;
pub use sui_coin_query::{CoinBalance, CoinObject, ObjectSource, TreasuryCapInfo};
pub use sui_coin_template::{
    inspect, ModuleSummary, PatchError, PatchedModule, PublishPayload, TokenParameters,
};

use anyhow::Result;
use std::sync::Arc;
use sui_coin_query::{CoinAggregator, DenyListReader};
use sui_coin_template::TemplatePatcher;
use sui_transport::network::infer_network_from_url;
use sui_transport::JsonRpcClient;
use tracing::info;

/// Entry point for coin creation and coin queries.
pub struct TokenWizard {
    config: WizardConfig,
    coins: CoinAggregator,
    deny_list: DenyListReader,
}

impl TokenWizard {
    /// Wizard backed by a JSON-RPC client for `config.rpc_url`.
    pub fn new(config: WizardConfig) -> Self {
        info!(
            endpoint = %config.rpc_url,
            network = infer_network_from_url(&config.rpc_url).unwrap_or("custom"),
            "using Sui fullnode"
        );
        let client = Arc::new(JsonRpcClient::new(&config.rpc_url));
        Self::with_source(config, client)
    }

    /// Wizard backed by any object source.
    pub fn with_source(config: WizardConfig, source: Arc<dyn ObjectSource>) -> Self {
        Self {
            coins: CoinAggregator::new(source.clone(), config.retry, config.cache_ttl),
            deny_list: DenyListReader::new(source, config.retry, config.cache_ttl),
            config,
        }
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// Patch the embedded coin template for `params`.
    pub fn create_coin(&self, params: &TokenParameters) -> Result<PatchedModule, PatchError> {
        TemplatePatcher::embedded()?.patch(params)
    }

    pub fn coin_balances(&self, owner: &str) -> Result<Vec<CoinBalance>> {
        self.coins.coin_balances(owner)
    }

    pub fn treasury_caps(&self, owner: &str) -> Result<Vec<TreasuryCapInfo>> {
        self.coins.treasury_caps(owner)
    }

    pub fn denied_addresses(&self, coin_type: &str) -> Result<Vec<String>> {
        self.deny_list.denied_addresses(coin_type)
    }

    pub fn is_denied(&self, coin_type: &str, address: &str) -> Result<bool> {
        self.deny_list.is_denied(coin_type, address)
    }
}
