//! Table output formatter

use comfy_table::{presets::NOTHING, Table};

/// Print rows as a borderless table
pub fn print_table(headers: &[&str], rows: &[Vec<String>], no_header: bool) {
    println!("{}", build_table(headers, rows, no_header));
}

fn build_table(headers: &[&str], rows: &[Vec<String>], no_header: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(headers.to_vec());
    }
    for row in rows {
        table.add_row(row.clone());
    }
    table
}
