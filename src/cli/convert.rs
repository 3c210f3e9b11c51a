//! Node -> JSON conversion utilities

use serde_json::{Map, Value};

use crate::xml::{Content, Node};

/// Convert a Node to serde_json::Value
///
/// Every element becomes `{"name", "attributes", "value"}` where `value` is
/// `null`, a string, or an array of child elements. Keys and attributes keep
/// document order.
pub fn node_to_json(node: &Node) -> Value {
    let attributes: Map<String, Value> = node
        .attributes()
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();

    let value = match node.content() {
        Content::Empty => Value::Null,
        Content::Text(text) => Value::String(text.clone()),
        Content::Children(children) => Value::Array(children.iter().map(node_to_json).collect()),
    };

    let mut object = Map::new();
    object.insert("name".to_string(), Value::String(node.name().to_string()));
    object.insert("attributes".to_string(), Value::Object(attributes));
    object.insert("value".to_string(), value);
    Value::Object(object)
}
