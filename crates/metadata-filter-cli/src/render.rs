//! Text and table rendering for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use metadata_filter::{FilterChain, MetadataFilter};

use crate::transforms::TransformRegistry;

const ANONYMOUS: &str = "<anonymous>";

/// Transform names of a chain joined with arrows, e.g. `trim -> lowercase`.
pub fn chain_label(chain: &FilterChain) -> String {
    chain
        .names()
        .into_iter()
        .map(|name| name.unwrap_or(ANONYMOUS))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// One `field: chain` line per field, in registration order.
pub fn render_fields_plain(filter: &MetadataFilter) -> String {
    filter
        .iter()
        .map(|(field, chain)| format!("{field}: {}", chain_label(chain)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn fields_table(filter: &MetadataFilter) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Functions"),
        header_cell("Chain"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (field, chain) in filter.iter() {
        table.add_row(vec![
            Cell::new(field).fg(Color::Blue),
            Cell::new(chain.len()),
            Cell::new(chain_label(chain)),
        ]);
    }
    table
}

pub fn transforms_table(registry: &TransformRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Transform"), header_cell("Description")]);
    apply_table_style(&mut table);
    for transform in registry.iter() {
        table.add_row(vec![
            Cell::new(transform.name).fg(Color::Blue),
            Cell::new(transform.description),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
