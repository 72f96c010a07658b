//! JSON-RPC client for a Sui fullnode.
//!
//! Blocking, built on a shared `ureq` agent. Only the read methods the
//! wizard needs are wrapped:
//!
//! - `suix_getOwnedObjects`
//! - `sui_getObject`
//! - `suix_getDynamicFields`
//! - `suix_getDynamicFieldObject`
//!
//! ```ignore
//! let client = JsonRpcClient::mainnet();
//! let deny_list = client.get_object("0x403")?;
//! ```

use crate::network::default_rpc_endpoint;
use crate::types::{DynamicFieldInfo, DynamicFieldName, ObjectResponse, Page};
use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use sui_wizard_types::env_utils::env_var_or;
use tracing::debug;

/// JSON-RPC client for Sui fullnode queries.
#[derive(Clone)]
pub struct JsonRpcClient {
    endpoint: String,
    agent: ureq::Agent,
    next_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for JsonRpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonRpcClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Options requesting the object type and parsed Move content.
pub fn object_options() -> Value {
    json!({ "showType": true, "showContent": true, "showOwner": true })
}

impl JsonRpcClient {
    /// Default request timeout in seconds (can be overridden by env).
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Default connect timeout in seconds (can be overridden by env).
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    fn default_timeouts() -> (Duration, Duration) {
        let timeout_secs = env_var_or("SUI_RPC_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS);
        let connect_secs = env_var_or(
            "SUI_RPC_CONNECT_TIMEOUT_SECS",
            Self::DEFAULT_CONNECT_TIMEOUT_SECS,
        );
        (
            Duration::from_secs(timeout_secs),
            Duration::from_secs(connect_secs),
        )
    }

    fn build_agent(timeout: Duration, connect_timeout: Duration) -> ureq::Agent {
        ureq::AgentBuilder::new()
            .timeout(timeout)
            .timeout_connect(connect_timeout)
            .build()
    }

    /// Create a client for mainnet.
    pub fn mainnet() -> Self {
        Self::new(&default_rpc_endpoint("mainnet"))
    }

    /// Create a client for testnet.
    pub fn testnet() -> Self {
        Self::new(&default_rpc_endpoint("testnet"))
    }

    /// Create a client with a custom endpoint.
    pub fn new(endpoint: &str) -> Self {
        let (timeout, connect_timeout) = Self::default_timeouts();
        Self::with_timeouts(endpoint, timeout, connect_timeout)
    }

    /// Create a client with explicit timeouts.
    pub fn with_timeouts(endpoint: &str, timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            agent: Self::build_agent(timeout, connect_timeout),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a JSON-RPC call and return its `result`.
    pub fn call(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(method, id, endpoint = %self.endpoint, "json-rpc call");

        let response: Value = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|e| anyhow!("JSON-RPC request {} failed: {}", method, e))?
            .into_json()
            .map_err(|e| anyhow!("Failed to parse JSON-RPC response for {}: {}", method, e))?;

        parse_response(method, response)
    }

    /// Execute a call and decode its result into `T`.
    pub fn call_typed<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let result = self.call(method, params)?;
        serde_json::from_value(result).with_context(|| format!("decoding {} result", method))
    }

    /// One page of objects owned by `owner`, optionally filtered.
    ///
    /// `filter` is a `SuiObjectDataFilter`, e.g.
    /// `{"MoveModule": {"package": "0x2", "module": "coin"}}`.
    pub fn get_owned_objects(
        &self,
        owner: &str,
        filter: Option<Value>,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Page<ObjectResponse>> {
        let query = json!({
            "filter": filter,
            "options": object_options(),
        });
        self.call_typed(
            "suix_getOwnedObjects",
            json!([owner, query, cursor, limit]),
        )
    }

    /// Fetch one object with type and content.
    pub fn get_object(&self, object_id: &str) -> Result<ObjectResponse> {
        self.call_typed("sui_getObject", json!([object_id, object_options()]))
    }

    /// One page of dynamic fields of `parent`.
    pub fn get_dynamic_fields(
        &self,
        parent: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Page<DynamicFieldInfo>> {
        self.call_typed("suix_getDynamicFields", json!([parent, cursor, limit]))
    }

    /// Fetch the dynamic field of `parent` stored under `name`.
    pub fn get_dynamic_field_object(
        &self,
        parent: &str,
        name: &DynamicFieldName,
    ) -> Result<ObjectResponse> {
        self.call_typed("suix_getDynamicFieldObject", json!([parent, name]))
    }
}

/// Extract `result` from a JSON-RPC envelope, turning `error` into an `Err`.
pub fn parse_response(method: &str, response: Value) -> Result<Value> {
    if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(anyhow!("JSON-RPC error {} from {}: {}", code, method, message));
    }

    response
        .get("result")
        .cloned()
        .ok_or_else(|| anyhow!("No result in JSON-RPC response for {}", method))
}
