//! Dynamic, unvalidated arguments.
//!
//! [`Value`] models input whose shape is only known at runtime, for example a
//! filter set assembled by a host from configuration or a scripting layer.
//! The validators turn a `Value` into the typed [`FilterSet`](crate::FilterSet)
//! or reject it with a [`FilterError`](crate::FilterError) naming the actual
//! type that was received.

use crate::filter::MetadataFilter;
use crate::types::FilterFn;

/// A loosely typed argument.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    /// Ordered key/value pairs.
    Object(Vec<(String, Value)>),
    Function(FilterFn),
    Filter(MetadataFilter),
}

impl Value {
    /// Runtime type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Function(_) => "function",
            Self::Filter(_) => "MetadataFilter",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    pub fn array<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Shorthand for `Value::Function(FilterFn::new(func))`.
    pub fn function<F>(func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Function(FilterFn::new(func))
    }

    /// Convert parsed JSON. JSON cannot carry functions, so the result never
    /// contains [`Value::Function`] or [`Value::Filter`].
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from_json(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<FilterFn> for Value {
    fn from(value: FilterFn) -> Self {
        Self::Function(value)
    }
}

impl From<MetadataFilter> for Value {
    fn from(value: MetadataFilter) -> Self {
        Self::Filter(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<Vec<FilterFn>> for Value {
    fn from(value: Vec<FilterFn>) -> Self {
        Self::Array(value.into_iter().map(Self::Function).collect())
    }
}
