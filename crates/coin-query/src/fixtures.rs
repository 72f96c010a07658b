//! In-memory [`ObjectSource`] for tests.

use crate::source::ObjectSource;
use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use sui_transport::{DynamicFieldInfo, DynamicFieldName, ObjectResponse, Page};

#[derive(Default)]
pub struct MockSource {
    /// Owned-object pages keyed by the cursor that requests them.
    pub owned_pages: HashMap<Option<String>, Page<ObjectResponse>>,
    pub objects: HashMap<String, ObjectResponse>,
    pub field_pages: HashMap<(String, Option<String>), Page<DynamicFieldInfo>>,
    /// Dynamic field objects keyed by parent and the JSON of the name.
    pub field_objects: HashMap<(String, String), ObjectResponse>,
    /// Number of leading calls that fail with a transient error.
    pub transient_failures: AtomicUsize,
    pub calls: AtomicUsize,
}

impl MockSource {
    fn tick(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.transient_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.transient_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(anyhow!("transport error: connection reset"));
        }
        Ok(())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ObjectSource for MockSource {
    fn owned_objects_page(
        &self,
        _owner: &str,
        _filter: Option<Value>,
        cursor: Option<&str>,
        _limit: usize,
    ) -> Result<Page<ObjectResponse>> {
        self.tick()?;
        self.owned_pages
            .get(&cursor.map(String::from))
            .cloned()
            .ok_or_else(|| anyhow!("unexpected cursor {:?}", cursor))
    }

    fn object(&self, object_id: &str) -> Result<ObjectResponse> {
        self.tick()?;
        Ok(self.objects.get(object_id).cloned().unwrap_or_default())
    }

    fn dynamic_fields_page(
        &self,
        parent: &str,
        cursor: Option<&str>,
        _limit: usize,
    ) -> Result<Page<DynamicFieldInfo>> {
        self.tick()?;
        self.field_pages
            .get(&(parent.to_string(), cursor.map(String::from)))
            .cloned()
            .ok_or_else(|| anyhow!("unexpected dynamic field page {} {:?}", parent, cursor))
    }

    fn dynamic_field_object(
        &self,
        parent: &str,
        name: &DynamicFieldName,
    ) -> Result<ObjectResponse> {
        self.tick()?;
        let key = (parent.to_string(), name_key(name));
        Ok(self.field_objects.get(&key).cloned().unwrap_or_default())
    }
}

pub fn name_key(name: &DynamicFieldName) -> String {
    json!({ "type": name.type_, "value": name.value }).to_string()
}

pub fn object(id: &str, type_: &str, fields: Value) -> ObjectResponse {
    serde_json::from_value(json!({
        "data": {
            "objectId": id,
            "version": "1",
            "digest": "digest",
            "type": type_,
            "content": { "dataType": "moveObject", "type": type_, "fields": fields }
        }
    }))
    .expect("fixture object")
}

pub fn page<T>(data: Vec<T>, next_cursor: Option<&str>) -> Page<T> {
    Page {
        data,
        has_next_page: next_cursor.is_some(),
        next_cursor: next_cursor.map(String::from),
    }
}
