//! Terminal rendering of row collections and facet lists.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use trip_model::Row;

/// Render matched rows as a table in header order.
pub fn print_rows(headers: &[String], rows: &[&Row]) {
    println!("{}", rows_table(headers, rows));
}

pub fn print_facet_lists(lists: &[(String, Vec<String>, Vec<String>)]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        header_cell("View"),
        header_cell("Dates"),
        header_cell("Zones"),
    ]);
    for (view, dates, zones) in lists {
        table.add_row(vec![
            Cell::new(view),
            Cell::new(dates.join(", ")),
            Cell::new(zones.join(", ")),
        ]);
    }
    println!("{table}");
}

fn rows_table(headers: &[String], rows: &[&Row]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.iter().map(|header| header_cell(header)));
    for row in rows {
        table.add_row(headers.iter().map(|header| Cell::new(row.value(header))));
    }
    table
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
