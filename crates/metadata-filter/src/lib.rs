//! Per-field text filter chains for metadata normalization.
//!
//! A caller registers, for each metadata field (artist, track, album, ...), an
//! ordered chain of text transformation functions and then runs raw values
//! through the chain of their field.
//!
//! # Overview
//!
//! - **Validation**: dynamic filter sets ([`Value`]) are checked eagerly and
//!   turned into typed [`FilterSet`]s, or rejected with a [`FilterError`]
//! - **Normalization**: a single function or a list of functions becomes a
//!   [`FilterChain`]
//! - **Engine**: [`MetadataFilter`] is an immutable value that answers field
//!   queries, merges with other filters, and applies chains
//! - **Field expansion**: [`create_filter_set_for_fields`] gives many fields
//!   the same filters
//!
//! # Example
//!
//! ```
//! use metadata_filter::{FilterFn, FilterSet, MetadataFilter, filter_set_for_fields};
//!
//! let trim = FilterFn::named("trim", |text| text.trim().to_string());
//! let shout = FilterFn::named("shout", |text| text.to_uppercase());
//!
//! let filter = MetadataFilter::new(&filter_set_for_fields(&["artist", "track"], trim)?)?
//!     .append_set(&FilterSet::new().with("artist", shout))?;
//!
//! assert_eq!(filter.filter_field("artist", "  abba ")?, "ABBA");
//! assert_eq!(filter.filter_field("track", " waterloo ")?, "waterloo");
//! # Ok::<(), metadata_filter::FilterError>(())
//! ```
//!
//! # Design Principles
//!
//! - **Immutable values**: merging returns a new filter and leaves both operands untouched
//! - **Fail fast**: every public operation validates its arguments before building anything
//! - **Opaque functions**: the engine only calls functions, it never inspects them

#![deny(unsafe_code)]

mod error;
mod fields;
mod filter;
mod types;
mod validate;
mod value;

// Core types
pub use filter::MetadataFilter;
pub use types::{FilterChain, FilterEntry, FilterFn, FilterSet};
pub use value::Value;

// Errors
pub use error::{ErrorKind, FilterError, Result};

// Construction
pub use fields::{create_filter_set_for_fields, filter_set_for_fields};
pub use filter::create_filter;
pub use validate::{check_filter_set, normalize_entry, validate_filter_entry, validate_filter_set};
