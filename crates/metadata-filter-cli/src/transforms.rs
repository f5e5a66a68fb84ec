//! Built-in text transforms and the registry that resolves them by name.
//!
//! Configuration files refer to transforms by name. The registry maps each
//! name to one shared [`FilterFn`], so every field configured with `trim`
//! calls the same function.
//!
//! # Example
//!
//! ```ignore
//! use metadata_filter_cli::transforms::default_registry;
//!
//! let trim = default_registry().resolve("trim")?;
//! assert_eq!(trim.call("  abba "), "abba");
//! ```

use std::collections::BTreeMap;
use std::sync::OnceLock;

use metadata_filter::{FilterFn, Value};
use thiserror::Error;

const ZERO_WIDTH: [char; 5] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

/// Errors from transform lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("unknown transform '{name}' (available: {available})")]
    Unknown { name: String, available: String },
}

/// A named transform with a short description.
#[derive(Debug, Clone)]
pub struct Transform {
    pub name: &'static str,
    pub description: &'static str,
    func: FilterFn,
}

impl Transform {
    pub fn new(name: &'static str, description: &'static str, func: fn(&str) -> String) -> Self {
        Self {
            name,
            description,
            func: FilterFn::named(name, func),
        }
    }

    pub fn filter_fn(&self) -> &FilterFn {
        &self.func
    }
}

/// Transforms indexed by name.
#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
    transforms: BTreeMap<&'static str, Transform>,
}

impl TransformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transform, replacing any transform with the same name.
    pub fn register(&mut self, transform: Transform) {
        self.transforms.insert(transform.name, transform);
    }

    pub fn get(&self, name: &str) -> Option<&Transform> {
        self.transforms.get(name)
    }

    /// Transforms in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Transform> {
        self.transforms.values()
    }

    /// Looks up the shared function for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Unknown`] listing the registered names.
    pub fn resolve(&self, name: &str) -> Result<FilterFn, TransformError> {
        self.get(name)
            .map(|transform| transform.func.clone())
            .ok_or_else(|| TransformError::Unknown {
                name: name.to_string(),
                available: self
                    .transforms
                    .keys()
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Replaces transform names inside a dynamic filter set with functions.
    ///
    /// Only the values of a top-level object are resolved; anything else is
    /// passed through so the filter engine reports the shape problem.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Unknown`] for an unregistered name.
    pub fn resolve_filter_set(&self, value: Value) -> Result<Value, TransformError> {
        match value {
            Value::Object(entries) => entries
                .into_iter()
                .map(|(field, entry)| Ok((field, self.resolve_entry(entry)?)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Object),
            other => Ok(other),
        }
    }

    /// Replaces a transform name, or a list of names, with functions.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Unknown`] for an unregistered name.
    pub fn resolve_entry(&self, value: Value) -> Result<Value, TransformError> {
        match value {
            Value::String(name) => self.resolve(&name).map(Value::Function),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(name) => self.resolve(&name).map(Value::Function),
                    other => Ok(other),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Ok(other),
        }
    }
}

/// Cached registry with all built-in transforms.
static DEFAULT_REGISTRY: OnceLock<TransformRegistry> = OnceLock::new();

/// Returns the registry of built-in transforms.
pub fn default_registry() -> &'static TransformRegistry {
    DEFAULT_REGISTRY.get_or_init(build_default_registry)
}

fn build_default_registry() -> TransformRegistry {
    let mut registry = TransformRegistry::new();
    registry.register(Transform::new(
        "trim",
        "Remove leading and trailing whitespace",
        trim,
    ));
    registry.register(Transform::new(
        "collapse-whitespace",
        "Replace runs of whitespace with a single space",
        collapse_whitespace,
    ));
    registry.register(Transform::new(
        "remove-zero-width",
        "Drop zero-width spaces, joiners and byte order marks",
        remove_zero_width,
    ));
    registry.register(Transform::new(
        "replace-smart-quotes",
        "Replace typographic quotes with ASCII quotes",
        replace_smart_quotes,
    ));
    registry.register(Transform::new(
        "lowercase",
        "Convert to lowercase",
        str::to_lowercase,
    ));
    registry.register(Transform::new(
        "uppercase",
        "Convert to uppercase",
        str::to_uppercase,
    ));
    registry.register(Transform::new(
        "strip-brackets",
        "Remove trailing (...) and [...] groups such as (Remastered)",
        strip_brackets,
    ));
    registry
}

pub fn trim(text: &str) -> String {
    text.trim().to_string()
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn remove_zero_width(text: &str) -> String {
    text.chars().filter(|ch| !ZERO_WIDTH.contains(ch)).collect()
}

pub fn replace_smart_quotes(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => '"',
            other => other,
        })
        .collect()
}

/// Removes trailing bracketed groups. A value made only of a group is kept.
pub fn strip_brackets(text: &str) -> String {
    let mut rest = text.trim_end();
    while let Some(start) = trailing_group_start(rest) {
        let head = rest[..start].trim_end();
        if head.is_empty() {
            break;
        }
        rest = head;
    }
    rest.to_string()
}

fn trailing_group_start(text: &str) -> Option<usize> {
    let (open, close) = match text.chars().last()? {
        ')' => ('(', ')'),
        ']' => ('[', ']'),
        _ => return None,
    };
    let mut depth = 0usize;
    for (index, ch) in text.char_indices().rev() {
        if ch == close {
            depth += 1;
        } else if ch == open {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        }
    }
    None
}
