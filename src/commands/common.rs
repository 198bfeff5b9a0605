//! Common utilities and helper functions shared across commands.
//!
//! This module contains shared functionality that would otherwise be
//! duplicated across different command implementations: database resolution,
//! the text table renderer, and JSON row conversion.

use std::path::Path;

use crate::pipeline::normalize::round_to;
use crate::pipeline::table::StatTable;
use crate::storage::StatsDatabase;
use crate::Result;

/// Open the database from an optional CLI override.
pub fn resolve_db(path: Option<&Path>) -> Result<StatsDatabase> {
    Ok(StatsDatabase::open(path)?)
}

/// Explicit signal for an empty result set.
pub fn print_no_data() {
    println!("No data found for the current filters.");
}

/// One display value: labels verbatim, numbers rounded to 2 decimals with
/// whole numbers shown without a fraction.
fn display_value(table: &StatTable, column: &str, row: usize) -> String {
    if let Some(label) = table.label_at(column, row) {
        return label.to_string();
    }
    match table.number_at(column, row) {
        Some(v) => format_number(v),
        None => String::new(),
    }
}

/// Format a stat for display: 2 decimals, whole values without a fraction.
pub fn format_number(v: f64) -> String {
    let rounded = round_to(v, 2);
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.2}")
    }
}

/// Print the named columns of a table, aligned, skipping absent columns.
pub fn render_table(table: &StatTable, columns: &[&str]) {
    let columns: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|c| table.has_column(c))
        .collect();
    if columns.is_empty() || table.is_empty() {
        return;
    }

    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let rendered: Vec<String> = columns
            .iter()
            .map(|c| display_value(table, c, row))
            .collect();
        for (i, cell) in rendered.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
        cells.push(rendered);
    }

    let header: Vec<String> = columns
        .iter()
        .zip(widths.iter())
        .map(|(c, &w)| format!("{c:>w$}"))
        .collect();
    println!("{}", header.join("  "));
    for row in cells {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, &w)| format!("{cell:>w$}"))
            .collect();
        println!("{}", line.join("  "));
    }
}

/// Convert the named columns of a table into JSON row objects.
pub fn table_to_json(table: &StatTable, columns: &[&str]) -> serde_json::Value {
    let columns: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|c| table.has_column(c))
        .collect();
    let mut rows = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let mut obj = serde_json::Map::new();
        for c in &columns {
            let value = match table.label_at(c, row) {
                Some(label) => serde_json::Value::String(label.to_string()),
                None => {
                    let v = table.number_at(c, row).unwrap_or(0.0);
                    serde_json::json!(round_to(v, 2))
                }
            };
            obj.insert((*c).to_string(), value);
        }
        rows.push(serde_json::Value::Object(obj));
    }
    serde_json::Value::Array(rows)
}

/// Pretty-print a JSON payload to stdout.
pub fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Mean of a numeric column, `None` for empty or absent columns.
pub fn column_mean(table: &StatTable, column: &str) -> Option<f64> {
    let values = table.numbers(column)?;
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
