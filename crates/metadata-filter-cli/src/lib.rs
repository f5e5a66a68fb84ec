//! Command-line host for metadata filters.
//!
//! Builds a [`metadata_filter::MetadataFilter`] from JSON configuration files
//! that name built-in transforms, then filters values given on the command
//! line or on stdin.

pub mod config;
pub mod logging;
pub mod render;
pub mod transforms;
