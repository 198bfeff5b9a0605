//! Paged browser over the enriched player table, with CSV export.

use std::path::{Path, PathBuf};

use crate::cli::types::StatFilters;
use crate::pipeline::enrich_players;
use crate::pipeline::normalize::round_to;
use crate::pipeline::table::StatTable;
use crate::{DashError, Result};

use super::common::{print_json, print_no_data, render_table, resolve_db, table_to_json};

/// Default browser columns, before any per-90 additions.
const BASE_COLS: &[&str] = &[
    "player_name",
    "team_name",
    "league_name",
    "position",
    "minutes",
    "goals",
    "assists",
    "np_goals",
    "xg",
    "xa",
    "shots",
    "key_passes",
    "dribbles",
    "tackles",
    "interceptions",
    "passes_completed",
    "passes_attempted",
    "pass_pct",
];

/// The standard column set: base columns plus, when asked, every per-90
/// column the table carries.
fn default_columns(table: &StatTable, per90: bool) -> Vec<String> {
    let mut cols: Vec<String> = BASE_COLS
        .iter()
        .filter(|c| table.has_column(c))
        .map(|c| (*c).to_string())
        .collect();
    if per90 {
        cols.extend(
            table
                .column_names()
                .filter(|c| c.ends_with("_per90"))
                .map(str::to_string),
        );
    }
    cols
}

/// Write one page to a CSV file, numbers rounded as displayed.
fn export_csv(path: &Path, table: &StatTable, columns: &[&str]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(columns)?;
    for row in 0..table.len() {
        let record: Vec<String> = columns
            .iter()
            .map(|c| match table.label_at(c, row) {
                Some(label) => label.to_string(),
                None => table
                    .number_at(c, row)
                    .map(|v| round_to(v, 2).to_string())
                    .unwrap_or_default(),
            })
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Run the `browse` command.
#[allow(clippy::too_many_arguments)]
pub fn handle_browse(
    db_path: Option<PathBuf>,
    filters: StatFilters,
    columns: Option<Vec<String>>,
    per90: bool,
    page: usize,
    page_size: usize,
    export: Option<PathBuf>,
    as_json: bool,
) -> Result<()> {
    let db = resolve_db(db_path.as_deref())?;
    let raw = db.fetch_player_stats(&filters)?;
    if raw.is_empty() {
        print_no_data();
        return Ok(());
    }
    let enriched = enrich_players(&raw);

    let selected: Vec<String> = match columns {
        Some(cols) if !cols.is_empty() => {
            for name in &cols {
                if !enriched.has_column(name) {
                    return Err(DashError::UnknownColumn { name: name.clone() });
                }
            }
            cols
        }
        _ => default_columns(&enriched, per90),
    };
    let selected_refs: Vec<&str> = selected.iter().map(String::as_str).collect();

    let total = enriched.len();
    let page_size = page_size.max(1);
    let total_pages = total.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total);
    let indices: Vec<usize> = (start..end).collect();
    let slice = enriched.select_rows(&indices);

    if let Some(path) = &export {
        export_csv(path, &slice, &selected_refs)?;
        println!("✓ Wrote {} rows to {}", slice.len(), path.display());
    }

    if as_json {
        let payload = serde_json::json!({
            "page": page,
            "pages": total_pages,
            "total_rows": total,
            "rows": table_to_json(&slice, &selected_refs),
        });
        return print_json(&payload);
    }

    render_table(&slice, &selected_refs);
    println!();
    println!(
        "Showing rows {}-{} of {} (page {} of {})",
        start + 1,
        end,
        total,
        page,
        total_pages
    );
    Ok(())
}
