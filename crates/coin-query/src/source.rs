//! The data-source seam for query services.

use anyhow::{anyhow, Result};
use serde_json::Value;
use sui_transport::{
    DynamicFieldInfo, DynamicFieldName, JsonRpcClient, ObjectData, ObjectResponse, Page,
};

/// Read access to fullnode object state.
///
/// Implemented by [`JsonRpcClient`]; tests substitute in-memory fixtures.
pub trait ObjectSource: Send + Sync {
    /// One page of objects owned by `owner`, optionally filtered.
    fn owned_objects_page(
        &self,
        owner: &str,
        filter: Option<Value>,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Page<ObjectResponse>>;

    /// One object with type and content.
    fn object(&self, object_id: &str) -> Result<ObjectResponse>;

    /// One page of dynamic fields of `parent`.
    fn dynamic_fields_page(
        &self,
        parent: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Page<DynamicFieldInfo>>;

    /// The dynamic field of `parent` stored under `name`.
    fn dynamic_field_object(&self, parent: &str, name: &DynamicFieldName)
        -> Result<ObjectResponse>;
}

impl ObjectSource for JsonRpcClient {
    fn owned_objects_page(
        &self,
        owner: &str,
        filter: Option<Value>,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Page<ObjectResponse>> {
        self.get_owned_objects(owner, filter, cursor, limit)
    }

    fn object(&self, object_id: &str) -> Result<ObjectResponse> {
        self.get_object(object_id)
    }

    fn dynamic_fields_page(
        &self,
        parent: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Page<DynamicFieldInfo>> {
        self.get_dynamic_fields(parent, cursor, limit)
    }

    fn dynamic_field_object(
        &self,
        parent: &str,
        name: &DynamicFieldName,
    ) -> Result<ObjectResponse> {
        self.get_dynamic_field_object(parent, name)
    }
}

/// Unwrap the object data of a response, failing if the node reported an
/// error or returned nothing.
pub fn require_object(response: ObjectResponse, what: &str) -> Result<ObjectData> {
    match (response.data, response.error) {
        (Some(data), _) => Ok(data),
        (None, Some(error)) => Err(anyhow!("{} not available: {}", what, error)),
        (None, None) => Err(anyhow!("{} not found", what)),
    }
}
