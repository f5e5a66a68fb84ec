//! JSON filter configuration.
//!
//! A configuration names built-in transforms per field:
//!
//! ```json
//! {
//!   "filters": { "artist": ["trim", "collapse-whitespace"], "track": "trim" },
//!   "groups": [
//!     { "fields": ["artist", "track", "album"], "transforms": ["remove-zero-width"] }
//!   ]
//! }
//! ```
//!
//! `filters` builds the initial filter; each group is then appended in order.
//! Several configuration files are combined with [`MetadataFilter::extend`]
//! in the order they are given.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use metadata_filter::{
    MetadataFilter, Value, create_filter, create_filter_set_for_fields,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::transforms::TransformRegistry;

/// Fields covered by the default configuration.
pub const DEFAULT_FIELDS: [&str; 4] = ["artist", "track", "album", "album_artist"];

/// Transforms applied by the default configuration.
pub const DEFAULT_TRANSFORMS: [&str; 4] = [
    "remove-zero-width",
    "replace-smart-quotes",
    "trim",
    "collapse-whitespace",
];

/// Filter configuration as read from a JSON file.
///
/// Values are kept as JSON so that shape errors are reported by the filter
/// engine with the same messages as any other caller gets.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    /// Field name to a transform name or list of names.
    #[serde(default)]
    pub filters: Option<serde_json::Value>,
    /// Transforms shared by several fields, appended after `filters`.
    #[serde(default)]
    pub groups: Vec<FieldGroup>,
}

/// One set of transforms applied to several fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldGroup {
    pub fields: serde_json::Value,
    pub transforms: serde_json::Value,
}

impl FilterConfig {
    /// The configuration used when no file is given.
    pub fn default_config() -> Self {
        Self {
            filters: None,
            groups: vec![FieldGroup {
                fields: serde_json::json!(DEFAULT_FIELDS),
                transforms: serde_json::json!(DEFAULT_TRANSFORMS),
            }],
        }
    }

    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse filter configuration")
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("load config {}", path.display()))
    }

    /// Build a filter, resolving transform names with `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown transform names or malformed sections.
    pub fn build(&self, registry: &TransformRegistry) -> Result<MetadataFilter> {
        let filters = self
            .filters
            .clone()
            .map_or_else(|| Value::Object(Vec::new()), Value::from_json);
        let filters = registry.resolve_filter_set(filters)?;
        let mut filter = create_filter(Some(&filters)).context("invalid 'filters' section")?;

        for (index, group) in self.groups.iter().enumerate() {
            let group_number = index + 1;
            let fields = Value::from_json(group.fields.clone());
            let transforms = registry
                .resolve_entry(Value::from_json(group.transforms.clone()))
                .with_context(|| format!("invalid group #{group_number}"))?;
            let filter_set = create_filter_set_for_fields(&fields, &transforms)
                .with_context(|| format!("invalid group #{group_number}"))?;
            filter = filter
                .append_set(&filter_set)
                .with_context(|| format!("invalid group #{group_number}"))?;
            debug!(
                group = group_number,
                fields = filter_set.len(),
                "Appended field group"
            );
        }

        Ok(filter)
    }
}

/// Build the filter for a list of configuration files.
///
/// With no files, the default configuration is used.
///
/// # Errors
///
/// Returns an error if any file cannot be loaded or built.
pub fn load_filter(paths: &[PathBuf], registry: &TransformRegistry) -> Result<MetadataFilter> {
    if paths.is_empty() {
        let filter = FilterConfig::default_config().build(registry)?;
        info!(fields = filter.len(), "Using default filter configuration");
        return Ok(filter);
    }

    let mut combined = MetadataFilter::default();
    for path in paths {
        let filter = FilterConfig::load(path)?
            .build(registry)
            .with_context(|| format!("build filter from {}", path.display()))?;
        info!(
            config = %path.display(),
            fields = filter.len(),
            functions = filter.function_count(),
            "Loaded filter configuration"
        );
        combined = combined.extend(&filter);
    }
    Ok(combined)
}
