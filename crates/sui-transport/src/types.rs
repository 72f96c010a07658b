//! Typed JSON-RPC responses.
//!
//! Only the fields the wizard reads are modelled; Move struct contents stay
//! as [`serde_json::Value`] and are navigated with [`field_at`].

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a cursor-paginated JSON-RPC result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

/// `SuiObjectResponse`: either object data or an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectResponse {
    #[serde(default)]
    pub data: Option<ObjectData>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: String,
    #[serde(default)]
    pub version: Option<Value>,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    #[serde(default)]
    pub owner: Option<Value>,
    #[serde(default)]
    pub content: Option<ObjectContent>,
}

/// Parsed Move content (`showContent: true`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    pub data_type: String,
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    #[serde(default)]
    pub fields: Option<Value>,
}

impl ObjectData {
    /// Object type, from the top-level `type` or the content type.
    pub fn object_type(&self) -> Option<&str> {
        self.type_
            .as_deref()
            .or_else(|| self.content.as_ref().and_then(|c| c.type_.as_deref()))
    }

    /// Move fields of the object, if content was requested.
    pub fn fields(&self) -> Option<&Value> {
        self.content.as_ref().and_then(|c| c.fields.as_ref())
    }

    pub fn version_number(&self) -> Option<u64> {
        self.version
            .as_ref()
            .and_then(value_as_u128)
            .and_then(|v| u64::try_from(v).ok())
    }
}

/// Key of a dynamic field: a Move type plus its JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicFieldName {
    #[serde(rename = "type")]
    pub type_: String,
    pub value: Value,
}

impl DynamicFieldName {
    pub fn new(type_: impl Into<String>, value: Value) -> Self {
        Self {
            type_: type_.into(),
            value,
        }
    }

    /// Key bytes when the key is a `vector<u8>`, which RPC renders as an
    /// array of numbers (or occasionally a base64 string).
    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match &self.value {
            Value::Array(items) => items
                .iter()
                .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
                .collect(),
            Value::String(s) => base64::engine::general_purpose::STANDARD.decode(s).ok(),
            _ => None,
        }
    }
}

/// An entry of `suix_getDynamicFields`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFieldInfo {
    pub name: DynamicFieldName,
    #[serde(default)]
    pub bcs_name: Option<String>,
    /// `DynamicField` or `DynamicObject`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub object_type: Option<String>,
    pub object_id: String,
    #[serde(default)]
    pub version: Option<Value>,
    #[serde(default)]
    pub digest: Option<String>,
}

/// Walk a path of field names through JSON-RPC Move content.
///
/// Nested structs are rendered as `{"type": ..., "fields": {...}}`; the walk
/// steps through those wrappers transparently, so `["lists", "id", "id"]`
/// reaches the bag id inside the deny list object.
pub fn field_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |cur, key| {
        cur.get(*key)
            .or_else(|| cur.get("fields").and_then(|f| f.get(*key)))
    })
}

/// Read an integer rendered either as a JSON number or a decimal string.
///
/// RPC renders `u64` and wider values as strings.
pub fn value_as_u128(value: &Value) -> Option<u128> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64().map(u128::from),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_owned_objects_page() {
        let raw = json!({
            "data": [{
                "data": {
                    "objectId": "0xc0",
                    "version": "17",
                    "digest": "abc",
                    "type": "0x2::coin::Coin<0x2::sui::SUI>",
                    "content": {
                        "dataType": "moveObject",
                        "type": "0x2::coin::Coin<0x2::sui::SUI>",
                        "hasPublicTransfer": true,
                        "fields": { "balance": "1000", "id": { "id": "0xc0" } }
                    }
                }
            }],
            "nextCursor": "0xc0",
            "hasNextPage": true
        });
        let page: Page<ObjectResponse> = serde_json::from_value(raw).unwrap();
        assert!(page.has_next_page);
        assert_eq!(page.next_cursor.as_deref(), Some("0xc0"));
        let obj = page.data[0].data.as_ref().unwrap();
        assert_eq!(obj.object_type(), Some("0x2::coin::Coin<0x2::sui::SUI>"));
        assert_eq!(obj.version_number(), Some(17));
        let balance = field_at(obj.fields().unwrap(), &["balance"]).unwrap();
        assert_eq!(value_as_u128(balance), Some(1000));
    }

    #[test]
    fn test_parse_last_page_without_cursor() {
        let page: Page<ObjectResponse> =
            serde_json::from_value(json!({ "data": [], "nextCursor": null, "hasNextPage": false }))
                .unwrap();
        assert!(page.data.is_empty());
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_field_at_steps_through_struct_wrappers() {
        let fields = json!({
            "id": { "id": "0x403" },
            "lists": {
                "type": "0x2::bag::Bag",
                "fields": { "id": { "id": "0xbag" }, "size": "1" }
            }
        });
        assert_eq!(
            field_at(&fields, &["lists", "id", "id"]).and_then(Value::as_str),
            Some("0xbag")
        );
        assert!(field_at(&fields, &["lists", "missing"]).is_none());
    }

    #[test]
    fn test_dynamic_field_name_bytes() {
        let name = DynamicFieldName::new("vector<u8>", json!([65, 66]));
        assert_eq!(name.as_bytes(), Some(vec![65, 66]));
        let b64 = DynamicFieldName::new("vector<u8>", json!("QUI="));
        assert_eq!(b64.as_bytes(), Some(vec![65, 66]));
        let bad = DynamicFieldName::new("vector<u8>", json!([300]));
        assert_eq!(bad.as_bytes(), None);
    }

    #[test]
    fn test_parse_dynamic_field_info() {
        let info: DynamicFieldInfo = serde_json::from_value(json!({
            "name": { "type": "u64", "value": "0" },
            "bcsName": "11111111",
            "type": "DynamicField",
            "objectType": "0x2::deny_list::PerTypeList",
            "objectId": "0xf1",
            "version": 4,
            "digest": "d"
        }))
        .unwrap();
        assert_eq!(info.name.type_, "u64");
        assert_eq!(info.kind.as_deref(), Some("DynamicField"));
        assert_eq!(info.object_id, "0xf1");
    }
}
