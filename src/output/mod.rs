//! Output formatting module
//!
//! Handles different output formats: table, CSV, JSON, YAML

mod common;
mod csv;
mod json;
mod plan;
mod records;
mod table;

use serde::Serialize;

use crate::cli::OutputFormat;

pub use self::common::{escape_csv, render_cell};
pub use self::csv::print_csv;
pub use self::json::{print_json, print_yaml};
pub use self::plan::{output_plan, output_warnings, plan_is_empty};
pub use self::records::{AuthStrategyView, ModuleView};
pub use self::table::print_table;

/// Records that can be listed as rows
pub trait Tabular {
    /// Column headers, in row order
    fn headers() -> Vec<&'static str>;

    /// Cell values for this record
    fn row(&self) -> Vec<String>;
}

/// Output a list of records in the specified format
pub fn output_records<T>(records: &[T], format: OutputFormat, no_header: bool)
where
    T: Tabular + Serialize,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = records.iter().map(Tabular::row).collect();
            print_table(&T::headers(), &rows, no_header);
        }
        OutputFormat::Csv => {
            let rows: Vec<Vec<String>> = records.iter().map(Tabular::row).collect();
            print_csv(&T::headers(), &rows, no_header);
        }
        OutputFormat::Json => print_json(records),
        OutputFormat::Yaml => print_yaml(records),
    }
}

/// Output a single settings-like record
///
/// Table and CSV show one KEY/VALUE row per top-level field.
pub fn output_record<T: Serialize>(record: &T, format: OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => print_table(&["KEY", "VALUE"], &field_rows(record), no_header),
        OutputFormat::Csv => print_csv(&["KEY", "VALUE"], &field_rows(record), no_header),
        OutputFormat::Json => print_json(record),
        OutputFormat::Yaml => print_yaml(record),
    }
}

/// Flatten a record's top-level fields into KEY/VALUE rows
fn field_rows<T: Serialize>(record: &T) -> Vec<Vec<String>> {
    match serde_json::to_value(record) {
        Ok(serde_json::Value::Object(map)) => map
            .iter()
            .map(|(key, value)| vec![key.clone(), render_cell(value)])
            .collect(),
        Ok(other) => vec![vec!["value".to_string(), render_cell(&other)]],
        Err(e) => {
            eprintln!("Error serializing record: {}", e);
            Vec::new()
        }
    }
}
