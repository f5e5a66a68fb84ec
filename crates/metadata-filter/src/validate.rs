//! Filter set validation and normalization.
//!
//! Validation is all-or-nothing: either the whole argument is accepted and a
//! [`FilterSet`] is returned, or the first problem found is reported and
//! nothing is built.

use crate::error::{FilterError, Result};
use crate::types::{FilterChain, FilterEntry, FilterSet};
use crate::value::Value;

/// Validate a dynamic filter set argument.
///
/// The argument must be an object whose values are a function or an array of
/// functions.
///
/// # Errors
///
/// - [`FilterError::MissingArgument`] if `raw` is absent or null.
/// - [`FilterError::TypeMismatch`] if `raw` is not an object, or an entry is
///   not a function or an array of functions.
/// - [`FilterError::EmptyString`] for an empty field name.
/// - [`FilterError::EmptyCollection`] for an empty function array.
pub fn validate_filter_set(raw: Option<&Value>) -> Result<FilterSet> {
    let entries = match raw {
        None | Some(Value::Null) => {
            return Err(FilterError::MissingArgument { what: "filter set" });
        }
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            return Err(FilterError::type_mismatch(
                "filter set",
                "object",
                other.type_name(),
            ));
        }
    };

    let mut set = FilterSet::new();
    for (field, value) in entries {
        check_field_name(field)?;
        let entry = validate_filter_entry(value)?;
        normalize_entry(field, &entry)?;
        set.insert(field.clone(), entry);
    }
    Ok(set)
}

/// Validate the filters given for one field.
///
/// # Errors
///
/// Returns [`FilterError::TypeMismatch`] naming the type of `value`, or of the
/// first array element that is not a function.
pub fn validate_filter_entry(value: &Value) -> Result<FilterEntry> {
    match value {
        Value::Function(func) => Ok(FilterEntry::Single(func.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Function(func) => Ok(func.clone()),
                other => Err(not_a_function(other)),
            })
            .collect::<Result<Vec<_>>>()
            .map(FilterEntry::Chain),
        other => Err(not_a_function(other)),
    }
}

/// Check a filter set built directly from typed values.
///
/// # Errors
///
/// Returns [`FilterError::EmptyString`] for an empty field name and
/// [`FilterError::EmptyCollection`] for a field with no functions.
pub fn check_filter_set(set: &FilterSet) -> Result<()> {
    for (field, entry) in set.iter() {
        check_field_name(field)?;
        normalize_entry(field, entry)?;
    }
    Ok(())
}

/// Turn one field's filters into a chain.
///
/// A single function becomes a one-element chain; a list keeps its order. The
/// functions are shared with `entry`.
///
/// # Errors
///
/// Returns [`FilterError::EmptyCollection`] if `entry` holds no functions.
pub fn normalize_entry(field: &str, entry: &FilterEntry) -> Result<FilterChain> {
    match entry {
        FilterEntry::Single(func) => Ok(FilterChain::single(func.clone())),
        FilterEntry::Chain(functions) => FilterChain::from_functions(functions.clone())
            .ok_or_else(|| FilterError::EmptyCollection {
                subject: format!("filter chain for '{field}'"),
            }),
    }
}

/// Validate and normalize every entry of `set`, keeping field order.
pub(crate) fn normalize_filter_set(set: &FilterSet) -> Result<Vec<(String, FilterChain)>> {
    set.iter()
        .map(|(field, entry)| {
            check_field_name(field)?;
            Ok((field.to_string(), normalize_entry(field, entry)?))
        })
        .collect()
}

pub(crate) fn check_field_name(field: &str) -> Result<()> {
    if field.is_empty() {
        return Err(FilterError::EmptyString { subject: "field" });
    }
    Ok(())
}

fn not_a_function(value: &Value) -> FilterError {
    FilterError::type_mismatch("filter function", "function", value.type_name())
}
