//! Numeric normalization: coercing raw values into numbers with zero-fill.
//!
//! Two surfaces share the same rule: a blank, missing, or unparseable value
//! is `0`/`0.0`, never an error.
//!
//! - [`ensure_numeric`] coerces whole table columns after a fetch.
//! - [`parse_count`] / [`parse_rate`] coerce individual CSV cells at ingest,
//!   where counts round half-to-even and rates keep 3 decimals.

use super::table::{Cell, Column, StatTable};

/// Coerce the named columns of a table to numeric storage.
///
/// Each listed column that is present is parsed cell-by-cell with the
/// zero-fill rule. Columns not present in the input are left absent, not
/// created. Already-numeric columns pass through untouched.
pub fn ensure_numeric(table: &StatTable, columns: &[&str]) -> StatTable {
    let mut out = table.clone();
    for name in columns {
        let converted = match table.column(name) {
            None | Some(Column::Numbers(_)) => continue,
            Some(Column::Cells(cells)) => cells.iter().map(Cell::as_f64).collect(),
            Some(Column::Labels(labels)) => labels
                .iter()
                .map(|s| s.trim().parse().unwrap_or(0.0))
                .collect(),
        };
        out.set_numbers(name, converted);
    }
    out
}

/// Round to a fixed number of decimals, ties to even.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Parse a counting stat from a CSV cell.
///
/// Blank or unparseable input is 0. Fractional input rounds half-to-even,
/// so `"2.5"` parses to 2.
pub fn parse_count(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) => v.round_ties_even() as i64,
        Err(_) => 0,
    }
}

/// Parse a float stat from a CSV cell, kept to 3 decimals.
///
/// Blank or unparseable input is 0.0.
pub fn parse_rate(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) => round_to(v, 3),
        Err(_) => 0.0,
    }
}
