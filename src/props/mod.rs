//! Prop sanitization for resolved pages.
//!
//! Route configuration hands the router an arbitrary bag of values to
//! inject into whatever page a logical path resolves to. Before those
//! reach a component's `render`, they pass through [`sanitize_props`]:
//! primitives flow through unchanged, lists recurse, and anything that
//! cannot be turned into a string without failing is dropped with a
//! diagnostic instead of surfacing an error to the caller.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::errors::Result;

/// Property bag handed to a page component at render time.
pub type PropMap = BTreeMap<String, PropValue>;

/// A host value with no data representation of its own. Stringification
/// may fail; sanitization treats that as "drop the key".
pub trait CustomProp: Send + Sync {
    fn type_name(&self) -> &str;
    fn to_text(&self) -> Result<String>;
}

#[derive(Clone)]
pub enum PropValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<PropValue>),
    Map(BTreeMap<String, PropValue>),
    Custom(Arc<dyn CustomProp>),
}

impl PropValue {
    /// JSON-shaped text form of the value. Fails if any [`CustomProp`]
    /// in the subtree refuses to stringify.
    pub fn to_text(&self) -> Result<String> {
        match self {
            PropValue::Null => Ok("null".to_string()),
            PropValue::Bool(v) => Ok(v.to_string()),
            PropValue::Int(v) => Ok(v.to_string()),
            PropValue::Float(v) => Ok(v.to_string()),
            PropValue::Text(v) => Ok(serde_json::to_string(v)?),
            PropValue::List(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    parts.push(item.to_text()?);
                }
                Ok(format!("[{}]", parts.join(",")))
            }
            PropValue::Map(entries) => {
                let mut parts = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    parts.push(format!("{}:{}", serde_json::to_string(key)?, value.to_text()?));
                }
                Ok(format!("{{{}}}", parts.join(",")))
            }
            PropValue::Custom(custom) => custom.to_text(),
        }
    }

}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => f.write_str("Null"),
            PropValue::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            PropValue::Int(v) => f.debug_tuple("Int").field(v).finish(),
            PropValue::Float(v) => f.debug_tuple("Float").field(v).finish(),
            PropValue::Text(v) => f.debug_tuple("Text").field(v).finish(),
            PropValue::List(v) => f.debug_tuple("List").field(v).finish(),
            PropValue::Map(v) => f.debug_tuple("Map").field(v).finish(),
            PropValue::Custom(custom) => {
                f.debug_tuple("Custom").field(&custom.type_name()).finish()
            }
        }
    }
}

/// Sanitize a caller-supplied prop bag. `None` is treated as empty.
///
/// Per-key rules:
/// - primitives and null pass through unchanged;
/// - lists are sanitized element-wise;
/// - maps pass through only if their whole subtree stringifies, else the
///   key is dropped;
/// - opaque custom values are coerced to their text form, and dropped if
///   coercion fails.
///
/// The output never has more keys than the input and no failure reaches
/// the caller.
pub fn sanitize_props(props: Option<&PropMap>) -> PropMap {
    let mut sanitized = PropMap::new();
    let Some(props) = props else {
        return sanitized;
    };

    for (key, value) in props {
        match value {
            PropValue::Null
            | PropValue::Bool(_)
            | PropValue::Int(_)
            | PropValue::Float(_)
            | PropValue::Text(_) => {
                sanitized.insert(key.clone(), value.clone());
            }
            PropValue::List(items) => {
                sanitized.insert(key.clone(), PropValue::List(sanitize_list(items)));
            }
            PropValue::Map(_) => match value.to_text() {
                Ok(_) => {
                    sanitized.insert(key.clone(), value.clone());
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "dropping prop: map value is not stringifiable");
                }
            },
            PropValue::Custom(custom) => match custom.to_text() {
                Ok(text) => {
                    sanitized.insert(key.clone(), PropValue::Text(text));
                }
                Err(err) => {
                    warn!(
                        key = %key,
                        prop_type = custom.type_name(),
                        error = %err,
                        "dropping prop: value cannot be coerced to text"
                    );
                }
            },
        }
    }

    sanitized
}

/// List elements cannot be dropped without shifting indices, so a value
/// that fails to stringify degrades to empty text instead.
fn sanitize_list(items: &[PropValue]) -> Vec<PropValue> {
    items
        .iter()
        .map(|item| match item {
            PropValue::List(nested) => PropValue::List(sanitize_list(nested)),
            PropValue::Map(_) => match item.to_text() {
                Ok(_) => item.clone(),
                Err(_) => PropValue::Text(String::new()),
            },
            PropValue::Custom(custom) => {
                PropValue::Text(custom.to_text().unwrap_or_default())
            }
            other => other.clone(),
        })
        .collect()
}

impl From<serde_json::Value> for PropValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PropValue::Null,
            serde_json::Value::Bool(v) => PropValue::Bool(v),
            serde_json::Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    PropValue::Int(v)
                } else {
                    PropValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(v) => PropValue::Text(v),
            serde_json::Value::Array(items) => {
                PropValue::List(items.into_iter().map(PropValue::from).collect())
            }
            serde_json::Value::Object(entries) => PropValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, PropValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}
