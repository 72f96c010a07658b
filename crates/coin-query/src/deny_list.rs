//! Deny-list lookups for regulated coins.
//!
//! The system deny list lives at `0x403`. Its `lists` bag holds one
//! `PerTypeList` per list kind; kind `0` is the coin deny list. That list's
//! `denied_addresses` table maps a coin type's canonical name (as
//! `vector<u8>`) to the set of addresses barred from using the coin.

use crate::cache::QueryCache;
use crate::retry::with_retries;
use crate::source::{require_object, ObjectSource};
use anyhow::{anyhow, Context, Result};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use sui_transport::types::field_at;
use sui_transport::{DynamicFieldInfo, DynamicFieldName, Page, Paginator};
use sui_wizard_types::address::{normalize_address, normalize_address_checked};
use sui_wizard_types::{canonical_type_name, RetryConfig};
use tracing::debug;

/// Object id of the system deny list.
pub const DENY_LIST_OBJECT_ID: &str = "0x403";

/// Bag key of the coin deny list.
pub const COIN_LIST_KEY: u64 = 0;

/// Resolves denied addresses for coin types.
pub struct DenyListReader {
    source: Arc<dyn ObjectSource>,
    retry: RetryConfig,
    cache: QueryCache<Vec<String>>,
}

impl DenyListReader {
    pub fn new(source: Arc<dyn ObjectSource>, retry: RetryConfig, cache_ttl: Duration) -> Self {
        Self {
            source,
            retry,
            cache: QueryCache::new(cache_ttl),
        }
    }

    /// Addresses denied for `coin_type`, normalized and sorted.
    ///
    /// A coin type without a deny-list entry yields an empty list.
    pub fn denied_addresses(&self, coin_type: &str) -> Result<Vec<String>> {
        let canonical = canonical_type_name(coin_type)
            .ok_or_else(|| anyhow!("invalid coin type: {}", coin_type))?;
        self.cache
            .get_or_try_insert_with(&canonical, || self.fetch_denied(&canonical))
            .with_context(|| format!("reading deny list for {}", coin_type))
    }

    /// Whether `address` is denied for `coin_type`.
    pub fn is_denied(&self, coin_type: &str, address: &str) -> Result<bool> {
        let address = normalize_address_checked(address)
            .ok_or_else(|| anyhow!("invalid address: {}", address))?;
        Ok(self.denied_addresses(coin_type)?.contains(&address))
    }

    fn fetch_denied(&self, canonical: &str) -> Result<Vec<String>> {
        let table_id = self.denied_addresses_table()?;
        let Some(entry) = self.find_entry(&table_id, canonical.as_bytes())? else {
            debug!(coin_type = canonical, "no deny list entry");
            return Ok(Vec::new());
        };

        let field = require_object(
            with_retries(self.retry, || {
                self.source.dynamic_field_object(&table_id, &entry.name)
            })?,
            "deny list entry",
        )?;
        let contents = field
            .fields()
            .and_then(|f| field_at(f, &["value", "contents"]))
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("deny list entry {} has no address set", entry.object_id))?;

        let mut addresses: Vec<String> = contents
            .iter()
            .filter_map(Value::as_str)
            .map(normalize_address)
            .collect();
        addresses.sort();
        addresses.dedup();
        debug!(coin_type = canonical, denied = addresses.len(), "resolved deny list");
        Ok(addresses)
    }

    /// Id of the coin list's `denied_addresses` table.
    fn denied_addresses_table(&self) -> Result<String> {
        let deny_list = require_object(
            with_retries(self.retry, || self.source.object(DENY_LIST_OBJECT_ID))?,
            "deny list object",
        )?;
        let bag_id = deny_list
            .fields()
            .and_then(|f| field_at(f, &["lists", "id", "id"]))
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("deny list object has no lists bag"))?
            .to_string();

        let key = DynamicFieldName::new("u64", json!(COIN_LIST_KEY.to_string()));
        let per_type = require_object(
            with_retries(self.retry, || {
                self.source.dynamic_field_object(&bag_id, &key)
            })?,
            "coin deny list",
        )?;
        let table_id = per_type
            .fields()
            .and_then(|f| field_at(f, &["value", "denied_addresses", "id", "id"]))
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("coin deny list has no denied_addresses table"))?;
        debug!(bag_id = %bag_id, table_id, "located denied_addresses table");
        Ok(table_id.to_string())
    }

    /// Scan the table page by page for the entry keyed by `key`.
    fn find_entry(&self, table_id: &str, key: &[u8]) -> Result<Option<DynamicFieldInfo>> {
        let mut paginator = Paginator::new(usize::MAX, |cursor, limit| {
            with_retries(self.retry, || {
                self.source.dynamic_fields_page(table_id, cursor, limit)
            })
            .map(Page::into_parts)
        });

        while let Some(page) = paginator.next_page()? {
            if let Some(found) = page
                .into_iter()
                .find(|info| info.name.as_bytes().as_deref() == Some(key))
            {
                debug!(table_id, pages = paginator.pages_fetched(), "deny list entry found");
                return Ok(Some(found));
            }
        }
        debug!(table_id, pages = paginator.pages_fetched(), "no deny list entry");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{name_key, object, page, MockSource};

    const COIN_TYPE: &str = "0xabc::dmt::DMT";
    const BAG: &str = "0xba9";
    const TABLE: &str = "0x7ab1e";

    fn canonical() -> String {
        canonical_type_name(COIN_TYPE).unwrap()
    }

    fn field_info(key: &str, object_id: &str) -> DynamicFieldInfo {
        serde_json::from_value(json!({
            "name": { "type": "vector<u8>", "value": key.as_bytes() },
            "type": "DynamicField",
            "objectType": "0x2::vec_set::VecSet<address>",
            "objectId": object_id,
        }))
        .unwrap()
    }

    fn deny_list_source() -> MockSource {
        let mut source = MockSource::default();
        source.objects.insert(
            DENY_LIST_OBJECT_ID.to_string(),
            object(
                "0x403",
                "0x2::deny_list::DenyList",
                json!({
                    "id": { "id": "0x403" },
                    "lists": { "type": "0x2::bag::Bag", "fields": { "id": { "id": BAG }, "size": "1" } }
                }),
            ),
        );
        source.field_objects.insert(
            (
                BAG.to_string(),
                name_key(&DynamicFieldName::new("u64", json!("0"))),
            ),
            object(
                "0xf0",
                "0x2::dynamic_field::Field<u64, 0x2::deny_list::PerTypeList>",
                json!({
                    "id": { "id": "0xf0" },
                    "name": "0",
                    "value": {
                        "type": "0x2::deny_list::PerTypeList",
                        "fields": {
                            "id": { "id": "0xf1" },
                            "denied_count": { "type": "0x2::table::Table<address, u64>", "fields": { "id": { "id": "0xc0" }, "size": "2" } },
                            "denied_addresses": { "type": "0x2::table::Table<vector<u8>, 0x2::vec_set::VecSet<address>>", "fields": { "id": { "id": TABLE }, "size": "2" } }
                        }
                    }
                }),
            ),
        );
        // target entry sits on the second page
        source.field_pages.insert(
            (TABLE.to_string(), None),
            page(vec![field_info("0000::other::OTHER", "0xe1")], Some("0xe1")),
        );
        source.field_pages.insert(
            (TABLE.to_string(), Some("0xe1".to_string())),
            page(vec![field_info(&canonical(), "0xe2")], None),
        );
        let entry_name = field_info(&canonical(), "0xe2").name;
        source.field_objects.insert(
            (TABLE.to_string(), name_key(&entry_name)),
            object(
                "0xe2",
                "0x2::dynamic_field::Field<vector<u8>, 0x2::vec_set::VecSet<address>>",
                json!({
                    "id": { "id": "0xe2" },
                    "name": canonical().as_bytes(),
                    "value": {
                        "type": "0x2::vec_set::VecSet<address>",
                        "fields": { "contents": ["0xb0b", "0xbad"] }
                    }
                }),
            ),
        );
        source
    }

    fn reader(source: MockSource) -> DenyListReader {
        DenyListReader::new(Arc::new(source), RetryConfig::none(), Duration::ZERO)
    }

    #[test]
    fn test_resolves_denied_addresses() {
        let denied = reader(deny_list_source())
            .denied_addresses(COIN_TYPE)
            .unwrap();
        assert_eq!(
            denied,
            vec![normalize_address("0xb0b"), normalize_address("0xbad")]
        );
    }

    #[test]
    fn test_coin_without_entry_is_empty() {
        let denied = reader(deny_list_source())
            .denied_addresses("0xdef::free::FREE")
            .unwrap();
        assert!(denied.is_empty());
    }

    #[test]
    fn test_is_denied() {
        let reader = reader(deny_list_source());
        assert!(reader.is_denied(COIN_TYPE, "0x0b0b").unwrap());
        assert!(!reader.is_denied(COIN_TYPE, "0xa11ce").unwrap());
        assert!(reader.is_denied(COIN_TYPE, "zz").is_err());
    }

    #[test]
    fn test_full_width_coin_type_matches() {
        let full = "0x0000000000000000000000000000000000000000000000000000000000000abc::dmt::DMT";
        let denied = reader(deny_list_source()).denied_addresses(full).unwrap();
        assert_eq!(denied.len(), 2);
    }

    #[test]
    fn test_missing_deny_list_object_errors() {
        let err = reader(MockSource::default())
            .denied_addresses(COIN_TYPE)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("deny list object not found"));
    }

    #[test]
    fn test_invalid_coin_type() {
        assert!(reader(deny_list_source())
            .denied_addresses("not a type")
            .is_err());
    }
}
