//! League overview: KPI averages and the league summary table.

use std::path::PathBuf;

use crate::cli::types::StatFilters;
use crate::pipeline::{aggregate_by_league, enrich_players};
use crate::Result;

use super::common::{column_mean, print_json, print_no_data, render_table, resolve_db};

/// KPI tiles shown above the summary table: label and source column.
const KPI_COLS: &[(&str, &str)] = &[
    ("Goals/90", "goals_per90"),
    ("Assists/90", "assists_per90"),
    ("xG/90", "xg_per90"),
    ("xA/90", "xa_per90"),
    ("Shots/90", "shots_per90"),
    ("Def actions/90", "def_actions_per90"),
    ("Pass%", "pass_pct"),
];

const TOTAL_COLS: &[&str] = &[
    "league_name",
    "players",
    "minutes",
    "goals",
    "assists",
    "xg",
    "xa",
    "shots",
    "key_passes",
    "pass_pct",
    "goals_per90",
    "xg_per90",
    "shots_per90",
    "def_actions_per90",
];

const PER90_COLS: &[&str] = &[
    "league_name",
    "players",
    "minutes",
    "goals_per90",
    "assists_per90",
    "xg_per90",
    "xa_per90",
    "shots_per90",
    "key_passes_per90",
    "dribbles_per90",
    "def_actions_per90",
    "pass_pct",
];

/// Run the `overview` command.
pub fn handle_overview(
    db_path: Option<PathBuf>,
    filters: StatFilters,
    per90: bool,
    as_json: bool,
) -> Result<()> {
    let db = resolve_db(db_path.as_deref())?;
    let raw = db.fetch_player_stats(&filters)?;
    if raw.is_empty() {
        print_no_data();
        return Ok(());
    }

    let enriched = enrich_players(&raw);
    let leagues = aggregate_by_league(&enriched);
    let display = if per90 { PER90_COLS } else { TOTAL_COLS };

    if as_json {
        let mut kpis = serde_json::Map::new();
        for (label, col) in KPI_COLS {
            if let Some(mean) = column_mean(&leagues, col) {
                kpis.insert(
                    (*label).to_string(),
                    serde_json::json!(crate::pipeline::normalize::round_to(mean, 2)),
                );
            }
        }
        let payload = serde_json::json!({
            "season": filters.season.as_str(),
            "kpis": kpis,
            "leagues": super::common::table_to_json(&leagues, display),
        });
        return print_json(&payload);
    }

    println!("League Overview, {}", filters.season);
    println!();
    for (label, col) in KPI_COLS {
        if let Some(mean) = column_mean(&leagues, col) {
            println!("{label:>16}: {mean:.2}");
        }
    }
    println!();
    render_table(&leagues, display);
    Ok(())
}
