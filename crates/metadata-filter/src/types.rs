//! Filter function, chain, and filter set types.
//!
//! A [`FilterFn`] is the only capability the engine knows about: a function
//! from text to text. Functions are reference counted, so cloning a
//! [`FilterFn`], a [`FilterEntry`], or a [`FilterSet`] shares the functions
//! rather than copying them.

use std::fmt;
use std::sync::Arc;

type TransformFn = dyn Fn(&str) -> String + Send + Sync;

/// A text transformation function.
///
/// The engine assumes, but does not enforce, that the function is pure and
/// deterministic.
#[derive(Clone)]
pub struct FilterFn {
    func: Arc<TransformFn>,
    name: Option<Arc<str>>,
}

impl FilterFn {
    /// Wrap an anonymous function.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            name: None,
        }
    }

    /// Wrap a function with a display name used by `Debug` output and logs.
    pub fn named<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            name: Some(Arc::from(name.into())),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Apply the function to `text`.
    pub fn call(&self, text: &str) -> String {
        (self.func)(text)
    }

    /// True if both handles refer to the same underlying function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for FilterFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FilterFn")
            .field(&self.name().unwrap_or("<anonymous>"))
            .finish()
    }
}

/// An ordered, non-empty sequence of filter functions.
///
/// Application is left-to-right: the output of each function is the input of
/// the next one.
#[derive(Clone, Debug)]
pub struct FilterChain {
    functions: Vec<FilterFn>,
}

impl FilterChain {
    /// One-element chain.
    pub fn single(func: FilterFn) -> Self {
        Self {
            functions: vec![func],
        }
    }

    /// Build a chain from `functions`, or `None` if the list is empty.
    pub fn from_functions(functions: Vec<FilterFn>) -> Option<Self> {
        if functions.is_empty() {
            None
        } else {
            Some(Self { functions })
        }
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Always `false`; a chain holds at least one function.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn functions(&self) -> &[FilterFn] {
        &self.functions
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterFn> {
        self.functions.iter()
    }

    /// Names of the functions in order, `None` for anonymous ones.
    pub fn names(&self) -> Vec<Option<&str>> {
        self.functions.iter().map(FilterFn::name).collect()
    }

    /// Run `text` through every function in order.
    pub fn apply(&self, text: &str) -> String {
        let mut functions = self.functions.iter();
        let Some(first) = functions.next() else {
            return text.to_string();
        };
        functions.fold(first.call(text), |acc, func| func.call(&acc))
    }

    /// New chain running `self` first and then `other`.
    #[must_use]
    pub fn concat(&self, other: &FilterChain) -> FilterChain {
        let mut functions = Vec::with_capacity(self.len() + other.len());
        functions.extend(self.functions.iter().cloned());
        functions.extend(other.functions.iter().cloned());
        FilterChain { functions }
    }
}

/// The filters supplied for one field: a single function or a list of them.
///
/// Both shapes are accepted everywhere a field's filters are given; the engine
/// normalizes them into a [`FilterChain`].
#[derive(Clone, Debug)]
pub enum FilterEntry {
    Single(FilterFn),
    Chain(Vec<FilterFn>),
}

impl FilterEntry {
    pub fn functions(&self) -> &[FilterFn] {
        match self {
            Self::Single(func) => std::slice::from_ref(func),
            Self::Chain(functions) => functions,
        }
    }

    pub fn len(&self) -> usize {
        self.functions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions().is_empty()
    }

    /// True if both entries have the same shape and share every function.
    pub fn shares_functions_with(&self, other: &FilterEntry) -> bool {
        let same_shape = matches!(
            (self, other),
            (Self::Single(_), Self::Single(_)) | (Self::Chain(_), Self::Chain(_))
        );
        same_shape
            && self.len() == other.len()
            && self
                .functions()
                .iter()
                .zip(other.functions())
                .all(|(a, b)| a.ptr_eq(b))
    }
}

impl From<FilterFn> for FilterEntry {
    fn from(func: FilterFn) -> Self {
        Self::Single(func)
    }
}

impl From<Vec<FilterFn>> for FilterEntry {
    fn from(functions: Vec<FilterFn>) -> Self {
        Self::Chain(functions)
    }
}

impl From<FilterChain> for FilterEntry {
    fn from(chain: FilterChain) -> Self {
        Self::Chain(chain.functions)
    }
}

/// An ordered mapping from field name to the filters for that field.
///
/// Field names are unique: inserting an existing field replaces its entry in
/// place. A set built directly is not yet validated; see
/// [`check_filter_set`](crate::check_filter_set).
#[derive(Clone, Debug, Default)]
pub struct FilterSet {
    entries: Vec<(String, FilterEntry)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `field`, returning the previous entry.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        entry: impl Into<FilterEntry>,
    ) -> Option<FilterEntry> {
        let field = field.into();
        let entry = entry.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => Some(std::mem::replace(existing, entry)),
            None => {
                self.entries.push((field, entry));
                None
            }
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, entry: impl Into<FilterEntry>) -> Self {
        self.insert(field, entry);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FilterEntry> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, entry)| entry)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FilterEntry)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, FilterEntry)>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for (field, entry) in iter {
            set.insert(field, entry);
        }
        set
    }
}

impl IntoIterator for FilterSet {
    type Item = (String, FilterEntry);
    type IntoIter = std::vec::IntoIter<(String, FilterEntry)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffix(tag: &'static str) -> FilterFn {
        FilterFn::named(tag, move |text| format!("{text}{tag}"))
    }

    #[test]
    fn chain_applies_left_to_right() {
        let chain = FilterChain::from_functions(vec![suffix("a"), suffix("b"), suffix("c")])
            .expect("non-empty chain");
        assert_eq!(chain.apply("x"), "xabc");
    }

    #[test]
    fn empty_function_list_is_not_a_chain() {
        assert!(FilterChain::from_functions(Vec::new()).is_none());
    }

    #[test]
    fn concat_keeps_both_orders_and_shares_functions() {
        let first = FilterChain::single(suffix("1"));
        let second = FilterChain::single(suffix("2"));
        let merged = first.concat(&second);

        assert_eq!(merged.apply("t"), "t12");
        assert!(merged.functions()[0].ptr_eq(&first.functions()[0]));
        assert!(merged.functions()[1].ptr_eq(&second.functions()[0]));
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut set = FilterSet::new().with("artist", suffix("a")).with("track", suffix("t"));
        let previous = set.insert("artist", vec![suffix("x"), suffix("y")]);

        assert!(matches!(previous, Some(FilterEntry::Single(_))));
        assert_eq!(set.fields().collect::<Vec<_>>(), vec!["artist", "track"]);
        assert_eq!(set.get("artist").map(FilterEntry::len), Some(2));
    }

    #[test]
    fn debug_shows_function_name() {
        assert_eq!(format!("{:?}", suffix("tag")), "FilterFn(\"tag\")");
        let anonymous = FilterFn::new(str::to_uppercase);
        assert_eq!(format!("{anonymous:?}"), "FilterFn(\"<anonymous>\")");
    }
}
