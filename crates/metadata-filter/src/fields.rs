//! Filter sets that give many fields the same filters.

use crate::error::{FilterError, Result};
use crate::types::{FilterEntry, FilterSet};
use crate::validate::{check_field_name, normalize_entry, validate_filter_entry};
use crate::value::Value;

const FIELDS_ARGUMENT: &str = "'fields' argument";

/// Build a filter set mapping every name in `fields` to `fn_or_chain`.
///
/// `fields` must be a non-empty array of non-empty strings and `fn_or_chain` a
/// function or an array of functions. Every field shares the same functions.
///
/// # Errors
///
/// - [`FilterError::TypeMismatch`] if `fields` is not an array, an element is
///   not a string, or `fn_or_chain` is not a function or array of functions.
/// - [`FilterError::EmptyCollection`] if `fields` is empty.
/// - [`FilterError::EmptyString`] if an element of `fields` is empty.
pub fn create_filter_set_for_fields(fields: &Value, fn_or_chain: &Value) -> Result<FilterSet> {
    let Value::Array(items) = fields else {
        return Err(FilterError::type_mismatch(
            FIELDS_ARGUMENT,
            "string[]",
            fields.type_name(),
        ));
    };
    if items.is_empty() {
        return Err(empty_fields());
    }

    let mut names = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(name) => {
                check_field_name(name)?;
                names.push(name.as_str());
            }
            other => {
                return Err(FilterError::type_mismatch(
                    "field",
                    "string",
                    other.type_name(),
                ));
            }
        }
    }

    let entry = validate_filter_entry(fn_or_chain)?;
    filter_set_for_fields(&names, entry)
}

/// Typed form of [`create_filter_set_for_fields`].
///
/// # Errors
///
/// - [`FilterError::EmptyCollection`] if `fields` is empty or `entry` holds no
///   functions.
/// - [`FilterError::EmptyString`] if a field name is empty.
pub fn filter_set_for_fields<S>(fields: &[S], entry: impl Into<FilterEntry>) -> Result<FilterSet>
where
    S: AsRef<str>,
{
    let Some(first) = fields.first() else {
        return Err(empty_fields());
    };
    for field in fields {
        check_field_name(field.as_ref())?;
    }
    let entry = entry.into();
    normalize_entry(first.as_ref(), &entry)?;

    Ok(fields
        .iter()
        .map(|field| (field.as_ref(), entry.clone()))
        .collect())
}

fn empty_fields() -> FilterError {
    FilterError::EmptyCollection {
        subject: FIELDS_ARGUMENT.to_string(),
    }
}
