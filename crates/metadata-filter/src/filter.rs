//! The metadata filter engine.
//!
//! A [`MetadataFilter`] holds one normalized chain per field and never
//! changes after construction. [`append`](MetadataFilter::append) and
//! [`extend`](MetadataFilter::extend) build new filters; both operands stay
//! valid and unchanged.

use std::sync::Arc;

use crate::error::{FilterError, Result};
use crate::types::{FilterChain, FilterSet};
use crate::validate::{normalize_filter_set, validate_filter_set};
use crate::value::Value;

/// Immutable per-field filter chains.
///
/// Cloning is cheap; clones share the same chains.
#[derive(Clone, Debug, Default)]
pub struct MetadataFilter {
    fields: Arc<Vec<(String, FilterChain)>>,
}

impl MetadataFilter {
    /// Build a filter from a typed filter set.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyString`] for an empty field name and
    /// [`FilterError::EmptyCollection`] for a field with no functions.
    pub fn new(filter_set: &FilterSet) -> Result<Self> {
        let fields = normalize_filter_set(filter_set)?;
        let filter = Self::from_chains(fields);
        tracing::debug!(
            fields = filter.len(),
            functions = filter.function_count(),
            "Created metadata filter"
        );
        Ok(filter)
    }

    fn from_chains(fields: Vec<(String, FilterChain)>) -> Self {
        Self {
            fields: Arc::new(fields),
        }
    }

    /// True if `field` has a registered chain.
    pub fn can_filter_field(&self, field: &str) -> bool {
        self.chain(field).is_some()
    }

    /// Registered field names, in registration order.
    pub fn fields(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn chain(&self, field: &str) -> Option<&FilterChain> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, chain)| chain)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterChain)> {
        self.fields
            .iter()
            .map(|(name, chain)| (name.as_str(), chain))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of functions across all chains.
    pub fn function_count(&self) -> usize {
        self.fields.iter().map(|(_, chain)| chain.len()).sum()
    }

    /// Add the filters of a dynamic filter set after the existing ones.
    ///
    /// # Errors
    ///
    /// Fails like [`validate_filter_set`]; `self` is never modified.
    pub fn append(&self, raw: Option<&Value>) -> Result<Self> {
        let filter_set = validate_filter_set(raw)?;
        self.append_set(&filter_set)
    }

    /// Add the filters of a typed filter set after the existing ones.
    ///
    /// For a field already present, the new functions run after the existing
    /// ones. New fields are added after the existing fields.
    ///
    /// # Errors
    ///
    /// Fails like [`check_filter_set`](crate::check_filter_set).
    pub fn append_set(&self, filter_set: &FilterSet) -> Result<Self> {
        let incoming = normalize_filter_set(filter_set)?;
        Ok(self.merge(incoming))
    }

    /// Add the chains of `other` after the existing ones.
    #[must_use]
    pub fn extend(&self, other: &MetadataFilter) -> Self {
        self.merge(other.fields.iter().cloned())
    }

    /// Dynamic form of [`extend`](Self::extend).
    ///
    /// # Errors
    ///
    /// - [`FilterError::MissingArgument`] if `other` is absent or null.
    /// - [`FilterError::TypeMismatch`] if `other` is not a filter.
    pub fn extend_value(&self, other: Option<&Value>) -> Result<Self> {
        match other {
            None | Some(Value::Null) => Err(FilterError::MissingArgument { what: "filter" }),
            Some(Value::Filter(filter)) => Ok(self.extend(filter)),
            Some(other) => Err(FilterError::type_mismatch(
                "filter",
                "MetadataFilter",
                other.type_name(),
            )),
        }
    }

    fn merge<I>(&self, incoming: I) -> Self
    where
        I: IntoIterator<Item = (String, FilterChain)>,
    {
        let mut merged = self.fields.as_ref().clone();
        for (field, chain) in incoming {
            match merged.iter_mut().find(|(name, _)| *name == field) {
                Some((_, existing)) => *existing = existing.concat(&chain),
                None => merged.push((field, chain)),
            }
        }
        let filter = Self::from_chains(merged);
        tracing::debug!(
            before = self.len(),
            after = filter.len(),
            functions = filter.function_count(),
            "Merged metadata filter"
        );
        filter
    }

    /// Run `text` through the chain registered for `field`.
    ///
    /// Empty text is returned as is without calling any function.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownField`] if `field` is not registered.
    pub fn filter_field(&self, field: &str, text: &str) -> Result<String> {
        let chain = self.require(field)?;
        if text.is_empty() {
            return Ok(String::new());
        }
        let filtered = chain.apply(text);
        tracing::trace!(
            field = field,
            functions = chain.len(),
            input_len = text.len(),
            output_len = filtered.len(),
            "Filtered field"
        );
        Ok(filtered)
    }

    /// Like [`filter_field`](Self::filter_field), passing `None` through.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownField`] if `field` is not registered, even
    /// when `text` is `None`.
    pub fn filter_field_opt(&self, field: &str, text: Option<&str>) -> Result<Option<String>> {
        match text {
            Some(text) => self.filter_field(field, text).map(Some),
            None => self.require(field).map(|_| None),
        }
    }

    /// Filter several `(field, text)` pairs, returning results in input order.
    ///
    /// # Errors
    ///
    /// Stops at the first unregistered field.
    pub fn filter_fields<'a, I>(&self, items: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        items
            .into_iter()
            .map(|(field, text)| self.filter_field(field, text))
            .collect()
    }

    fn require(&self, field: &str) -> Result<&FilterChain> {
        self.chain(field)
            .ok_or_else(|| FilterError::UnknownField(field.to_string()))
    }
}

/// Validate a dynamic filter set and build a filter from it.
///
/// # Errors
///
/// Fails like [`validate_filter_set`].
pub fn create_filter(raw: Option<&Value>) -> Result<MetadataFilter> {
    let filter_set = validate_filter_set(raw)?;
    MetadataFilter::new(&filter_set)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::ErrorKind;
    use crate::types::FilterFn;

    fn suffix(tag: &'static str) -> FilterFn {
        FilterFn::named(tag, move |text| format!("{text}{tag}"))
    }

    #[test]
    fn applies_chain_in_order() {
        let raw = Value::object([(
            "artist",
            Value::array([Value::function(|t| format!("{t}1")), Value::function(|t| format!("{t}2"))]),
        )]);
        let filter = create_filter(Some(&raw)).unwrap();
        assert_eq!(filter.filter_field("artist", "Text").unwrap(), "Text12");
    }

    #[test]
    fn empty_filter_has_no_fields() {
        let filter = create_filter(Some(&Value::object::<&str, _>([]))).unwrap();
        assert!(filter.fields().is_empty());
        assert!(filter.is_empty());
    }

    #[test]
    fn append_without_argument_fails() {
        let filter = MetadataFilter::new(&FilterSet::new().with("foo", suffix("x"))).unwrap();
        let err = filter.append(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingArgument);
        assert_eq!(err.to_string(), "No filter set is specified!");
    }

    #[test]
    fn append_runs_new_functions_last() {
        let base = MetadataFilter::new(
            &FilterSet::new()
                .with("artist", suffix("a"))
                .with("track", suffix("t")),
        )
        .unwrap();
        let appended = base
            .append_set(
                &FilterSet::new()
                    .with("album", suffix("l"))
                    .with("artist", vec![suffix("b"), suffix("c")]),
            )
            .unwrap();

        assert_eq!(appended.fields(), vec!["artist", "track", "album"]);
        assert_eq!(appended.filter_field("artist", "x").unwrap(), "xabc");
        assert_eq!(base.filter_field("artist", "x").unwrap(), "xa");
        assert!(!base.can_filter_field("album"));
    }

    #[test]
    fn extend_value_validates_argument() {
        let filter = MetadataFilter::default();

        let err = filter.extend_value(None).unwrap_err();
        assert_eq!(err.to_string(), "No filter is specified!");

        let err = filter.extend_value(Some(&Value::from("filter"))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid filter: expected 'MetadataFilter', got 'string'"
        );

        let other = MetadataFilter::new(&FilterSet::new().with("track", suffix("t"))).unwrap();
        let extended = filter.extend_value(Some(&Value::from(other))).unwrap();
        assert_eq!(extended.fields(), vec!["track"]);
    }

    #[test]
    fn empty_text_skips_every_function() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counting = FilterFn::new(move |text| {
            counter.fetch_add(1, Ordering::SeqCst);
            text.to_uppercase()
        });
        let filter = MetadataFilter::new(&FilterSet::new().with("artist", counting)).unwrap();

        assert_eq!(filter.filter_field("artist", "").unwrap(), "");
        assert_eq!(filter.filter_field_opt("artist", None).unwrap(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(filter.filter_field("artist", "abc").unwrap(), "ABC");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_field_fails_even_for_empty_text() {
        let filter = MetadataFilter::default();
        for text in [Some(""), None, Some("value")] {
            let err = filter.filter_field_opt("genre", text).unwrap_err();
            assert_eq!(err, FilterError::UnknownField("genre".to_string()));
        }
    }

    #[test]
    fn filter_fields_keeps_input_order() {
        let filter = MetadataFilter::new(
            &FilterSet::new()
                .with("artist", suffix("a"))
                .with("track", suffix("t")),
        )
        .unwrap();
        let results = filter
            .filter_fields([("track", "1"), ("artist", "2"), ("track", "")])
            .unwrap();
        assert_eq!(results, vec!["1t", "2a", ""]);
    }
}
