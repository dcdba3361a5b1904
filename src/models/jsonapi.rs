// src/models/jsonapi.rs

use serde::Deserialize;
use serde_json::{Map, Value, json};

/// Incoming JSON:API document: `{"data": {...}}`.
#[derive(Debug, Deserialize)]
pub struct Document<A> {
    pub data: ResourceObject<A>,
}

/// Incoming resource object. Client-sent `type` and `id` are ignored.
#[derive(Debug, Deserialize)]
pub struct ResourceObject<A> {
    pub attributes: A,
    #[serde(default)]
    pub relationships: Map<String, Value>,
}

impl<A> ResourceObject<A> {
    /// Id of a to-one relationship, e.g. `relationships.challenge.data.id`.
    pub fn relationship_id(&self, name: &str) -> Option<String> {
        match self.relationships.get(name)?.get("data")?.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

/// Wraps primary data in a top-level document.
pub fn document(data: Value) -> Value {
    json!({ "data": data })
}

/// Builds a resource object. `attributes` must already use dasherized keys.
pub fn resource(
    resource_type: &str,
    id: impl ToString,
    attributes: Value,
    relationships: Option<Value>,
) -> Value {
    let mut object = json!({
        "type": resource_type,
        "id": id.to_string(),
        "attributes": attributes,
    });
    if let Some(relationships) = relationships {
        object["relationships"] = relationships;
    }
    object
}

/// `{"data": {"type": .., "id": ..}}` linkage for a to-one relationship.
pub fn to_one(resource_type: &str, id: &str) -> Value {
    json!({ "data": { "type": resource_type, "id": id } })
}
