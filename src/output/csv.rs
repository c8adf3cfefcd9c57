//! CSV output formatter

use super::common::escape_csv;

/// Print rows as CSV
pub fn print_csv(headers: &[&str], rows: &[Vec<String>], no_header: bool) {
    for line in csv_lines(headers, rows, no_header) {
        println!("{}", line);
    }
}

fn csv_lines(headers: &[&str], rows: &[Vec<String>], no_header: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    if !no_header {
        lines.push(headers.join(","));
    }
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| escape_csv(c)).collect();
        lines.push(cells.join(","));
    }
    lines
}
