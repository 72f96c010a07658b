//! Coin aggregation over an owner's objects.
//!
//! Both queries list the owner's objects from the `0x2::coin` module, page by
//! page, and then pick out `Coin<T>` or `TreasuryCap<T>` objects.

use crate::cache::QueryCache;
use crate::retry::with_retries;
use crate::source::ObjectSource;
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use sui_transport::types::{field_at, value_as_u128};
use sui_transport::{ObjectData, Page, Paginator};
use sui_wizard_types::address::normalize_address_checked;
use sui_wizard_types::{same_type, wrapped_type_argument, RetryConfig};
use tracing::{debug, warn};

/// Owned-object filter matching everything defined in `0x2::coin`.
pub fn coin_module_filter() -> Value {
    json!({ "MoveModule": { "package": "0x2", "module": "coin" } })
}

/// A single coin object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinObject {
    pub object_id: String,
    pub balance: u128,
}

/// All of an owner's coins of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinBalance {
    pub coin_type: String,
    pub total_balance: u128,
    pub coins: Vec<CoinObject>,
}

impl CoinBalance {
    pub fn coin_count(&self) -> usize {
        self.coins.len()
    }
}

/// A `TreasuryCap<T>` held by the owner, i.e. a coin they can mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreasuryCapInfo {
    pub coin_type: String,
    pub object_id: String,
    pub total_supply: u128,
}

/// Groups an owner's coins by type.
pub struct CoinAggregator {
    source: Arc<dyn ObjectSource>,
    retry: RetryConfig,
    balances: QueryCache<Vec<CoinBalance>>,
    caps: QueryCache<Vec<TreasuryCapInfo>>,
}

impl CoinAggregator {
    pub fn new(source: Arc<dyn ObjectSource>, retry: RetryConfig, cache_ttl: Duration) -> Self {
        Self {
            source,
            retry,
            balances: QueryCache::new(cache_ttl),
            caps: QueryCache::new(cache_ttl),
        }
    }

    /// Balances of every coin type `owner` holds, sorted by coin type.
    pub fn coin_balances(&self, owner: &str) -> Result<Vec<CoinBalance>> {
        let owner = checked_owner(owner)?;
        self.balances
            .get_or_try_insert_with(&owner, || self.fetch_balances(&owner))
    }

    /// Balance of one coin type, if the owner holds any. The coin type may
    /// use short or full-width addresses.
    pub fn coin_balance(&self, owner: &str, coin_type: &str) -> Result<Option<CoinBalance>> {
        Ok(self
            .coin_balances(owner)?
            .into_iter()
            .find(|b| same_type(&b.coin_type, coin_type)))
    }

    /// Treasury caps held by `owner`, sorted by coin type.
    pub fn treasury_caps(&self, owner: &str) -> Result<Vec<TreasuryCapInfo>> {
        let owner = checked_owner(owner)?;
        self.caps
            .get_or_try_insert_with(&owner, || self.fetch_treasury_caps(&owner))
    }

    fn coin_module_objects(&self, owner: &str) -> Result<Vec<ObjectData>> {
        let responses = Paginator::new(usize::MAX, |cursor, limit| {
            with_retries(self.retry, || {
                self.source
                    .owned_objects_page(owner, Some(coin_module_filter()), cursor, limit)
            })
            .with_context(|| format!("listing coin objects owned by {}", owner))
            .map(Page::into_parts)
        })
        .collect_all()?;

        debug!(owner, objects = responses.len(), "listed coin module objects");
        Ok(responses.into_iter().filter_map(|r| r.data).collect())
    }

    fn fetch_balances(&self, owner: &str) -> Result<Vec<CoinBalance>> {
        let mut grouped: BTreeMap<String, CoinBalance> = BTreeMap::new();

        for object in self.coin_module_objects(owner)? {
            let Some(coin_type) = object
                .object_type()
                .and_then(|t| wrapped_type_argument(t, "0x2", "coin", "Coin"))
            else {
                continue;
            };
            let Some(balance) = object
                .fields()
                .and_then(|f| field_at(f, &["balance"]))
                .and_then(value_as_u128)
            else {
                warn!(object_id = %object.object_id, "coin object without a readable balance");
                continue;
            };

            let entry = grouped
                .entry(coin_type.clone())
                .or_insert_with(|| CoinBalance {
                    coin_type,
                    total_balance: 0,
                    coins: Vec::new(),
                });
            entry.total_balance = entry.total_balance.saturating_add(balance);
            entry.coins.push(CoinObject {
                object_id: object.object_id,
                balance,
            });
        }

        Ok(grouped.into_values().collect())
    }

    fn fetch_treasury_caps(&self, owner: &str) -> Result<Vec<TreasuryCapInfo>> {
        let mut caps: Vec<TreasuryCapInfo> = self
            .coin_module_objects(owner)?
            .into_iter()
            .filter_map(|object| {
                let coin_type = object
                    .object_type()
                    .and_then(|t| wrapped_type_argument(t, "0x2", "coin", "TreasuryCap"))?;
                let total_supply = object
                    .fields()
                    .and_then(|f| field_at(f, &["total_supply", "value"]))
                    .and_then(value_as_u128)
                    .unwrap_or(0);
                Some(TreasuryCapInfo {
                    coin_type,
                    object_id: object.object_id,
                    total_supply,
                })
            })
            .collect();

        caps.sort_by(|a, b| {
            a.coin_type
                .cmp(&b.coin_type)
                .then_with(|| a.object_id.cmp(&b.object_id))
        });
        Ok(caps)
    }
}

fn checked_owner(owner: &str) -> Result<String> {
    normalize_address_checked(owner).ok_or_else(|| anyhow!("invalid owner address: {}", owner))
}
