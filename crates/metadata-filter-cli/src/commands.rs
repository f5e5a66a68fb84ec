use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use metadata_filter::{FilterError, MetadataFilter};
use tracing::{debug, info_span, trace};

use metadata_filter_cli::config::load_filter;
use metadata_filter_cli::logging::redact_value;
use metadata_filter_cli::render::{fields_table, render_fields_plain, transforms_table};
use metadata_filter_cli::transforms::default_registry;

use crate::cli::{ApplyArgs, FieldsArgs};

pub fn run_apply(configs: &[PathBuf], args: &ApplyArgs) -> Result<()> {
    let span = info_span!("apply", field = %args.field);
    let _guard = span.enter();

    let filter = load_filter(configs, default_registry())?;
    // Reject an unknown field before waiting on stdin.
    ensure_field(&filter, &args.field)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.texts.is_empty() {
        let stdin = io::stdin();
        let mut count = 0usize;
        for line in stdin.lock().lines() {
            let line = line.context("read stdin")?;
            writeln!(out, "{}", filter_value(&filter, &args.field, &line)?)?;
            count += 1;
        }
        debug!(count = count, "Filtered stdin values");
    } else {
        for text in &args.texts {
            writeln!(out, "{}", filter_value(&filter, &args.field, text)?)?;
        }
        debug!(count = args.texts.len(), "Filtered argument values");
    }
    out.flush()?;
    Ok(())
}

pub fn run_fields(configs: &[PathBuf], args: &FieldsArgs) -> Result<()> {
    let filter = load_filter(configs, default_registry())?;
    if args.plain {
        println!("{}", render_fields_plain(&filter));
    } else {
        println!("{}", fields_table(&filter));
    }
    Ok(())
}

pub fn run_transforms() -> Result<()> {
    println!("{}", transforms_table(default_registry()));
    Ok(())
}

fn ensure_field(filter: &MetadataFilter, field: &str) -> Result<()> {
    if filter.can_filter_field(field) {
        return Ok(());
    }
    Err(FilterError::UnknownField(field.to_string()))
        .with_context(|| format!("cannot filter field '{field}'"))
}

fn filter_value(filter: &MetadataFilter, field: &str, text: &str) -> Result<String> {
    let filtered = filter.filter_field(field, text)?;
    trace!(
        input = %redact_value(text),
        output = %redact_value(&filtered),
        "Filtered value"
    );
    Ok(filtered)
}
