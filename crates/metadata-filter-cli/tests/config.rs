//! Integration tests for loading filters from configuration files.

use std::fs;
use std::path::{Path, PathBuf};

use metadata_filter_cli::config::{DEFAULT_FIELDS, load_filter};
use metadata_filter_cli::render::{fields_table, render_fields_plain};
use metadata_filter_cli::transforms::default_registry;
use tempfile::TempDir;

fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn no_config_uses_defaults() {
    let filter = load_filter(&[], default_registry()).unwrap();
    assert_eq!(filter.fields(), DEFAULT_FIELDS.to_vec());
    assert_eq!(
        filter.filter_field("album", "  Abbey\u{200D}   Road ").unwrap(),
        "Abbey Road"
    );
}

#[test]
fn configs_are_combined_in_order() {
    let dir = TempDir::new().unwrap();
    let first = write_config(
        dir.path(),
        "first.json",
        r#"{ "filters": { "artist": ["trim", "lowercase"], "track": "trim" } }"#,
    );
    let second = write_config(
        dir.path(),
        "second.json",
        r#"{
            "filters": { "artist": "uppercase" },
            "groups": [ { "fields": ["track", "album"], "transforms": ["strip-brackets"] } ]
        }"#,
    );

    let filter = load_filter(&[first.clone(), second.clone()], default_registry()).unwrap();
    assert_eq!(filter.fields(), vec!["artist", "track", "album"]);
    assert_eq!(filter.filter_field("artist", " Abba ").unwrap(), "ABBA");
    assert_eq!(
        filter.filter_field("track", " Waterloo (Remastered) ").unwrap(),
        "Waterloo"
    );

    let reversed = load_filter(&[second, first], default_registry()).unwrap();
    assert_eq!(reversed.fields(), vec!["artist", "track", "album"]);
    assert_eq!(reversed.filter_field("artist", " Abba ").unwrap(), "abba");
}

#[test]
fn plain_listing_shows_chains() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        "filters.json",
        r#"{
            "filters": { "artist": ["trim", "collapse-whitespace"], "track": "trim" },
            "groups": [ { "fields": ["artist", "track"], "transforms": "replace-smart-quotes" } ]
        }"#,
    );
    let filter = load_filter(&[config], default_registry()).unwrap();

    insta::assert_snapshot!(render_fields_plain(&filter), @r"
    artist: trim -> collapse-whitespace -> replace-smart-quotes
    track: trim -> replace-smart-quotes
    ");
}

#[test]
fn table_lists_every_field() {
    let filter = load_filter(&[], default_registry()).unwrap();
    let rendered = fields_table(&filter).to_string();
    for field in DEFAULT_FIELDS {
        assert!(rendered.contains(field), "missing {field} in\n{rendered}");
    }
}

#[test]
fn missing_file_is_reported_with_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");
    let err = load_filter(&[missing], default_registry()).unwrap_err();
    assert!(format!("{err:#}").contains("absent.json"));
}

#[test]
fn invalid_section_shape_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "bad.json", r#"{ "filters": "trim" }"#);
    let err = load_filter(&[config], default_registry()).unwrap_err();
    assert!(
        format!("{err:#}").ends_with("Invalid filter set: expected 'object', got 'string'"),
        "{err:#}"
    );
}

#[test]
fn unknown_group_transform_names_the_group() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        "groups.json",
        r#"{
            "filters": { "artist": "trim" },
            "groups": [
                { "fields": ["artist"], "transforms": "lowercase" },
                { "fields": ["track"], "transforms": ["trim", "shout"] }
            ]
        }"#,
    );
    let err = load_filter(&[config], default_registry()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("invalid group #2: unknown transform 'shout'"), "{message}");
}
