//! Top-N player boards per metric.

use std::path::PathBuf;

use crate::cli::types::StatFilters;
use crate::pipeline::enrich_players;
use crate::pipeline::table::StatTable;
use crate::{DashError, Result};

use super::common::{print_json, print_no_data, render_table, resolve_db, table_to_json};

/// The standard boards: label, column, and whether a per-90 variant applies.
const METRIC_GROUPS: &[(&str, &str, bool)] = &[
    ("Goals", "goals", true),
    ("xG", "xg", true),
    ("Assists", "assists", true),
    ("xA", "xa", true),
    ("Key Passes", "key_passes", true),
    ("Dribbles", "dribbles", true),
    ("Def Actions", "def_actions", true),
    ("Pass%", "pass_pct", false),
];

/// Pick the column a board ranks by: the per-90 variant when asked for and
/// available, the raw column otherwise.
fn ranked_column(table: &StatTable, column: &str, per90: bool, allow_per90: bool) -> String {
    let per90_col = format!("{column}_per90");
    if per90 && allow_per90 && table.has_column(&per90_col) {
        per90_col
    } else {
        column.to_string()
    }
}

/// Run the `leaderboard` command.
pub fn handle_leaderboard(
    db_path: Option<PathBuf>,
    filters: StatFilters,
    metric: Option<String>,
    top: usize,
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

    let boards: Vec<(String, String)> = match metric {
        Some(name) => {
            let ranked = ranked_column(&enriched, &name, per90, true);
            if !enriched.has_column(&ranked) {
                return Err(DashError::UnknownMetric { name });
            }
            vec![(name, ranked)]
        }
        None => METRIC_GROUPS
            .iter()
            .filter(|(_, col, _)| enriched.has_column(col))
            .map(|&(label, col, allow)| {
                (
                    label.to_string(),
                    ranked_column(&enriched, col, per90, allow),
                )
            })
            .collect(),
    };

    if as_json {
        let mut payload = serde_json::Map::new();
        for (label, ranked) in &boards {
            let board = enriched.sorted_desc(ranked).head(top);
            let cols = [
                "player_name",
                "team_name",
                "league_name",
                "minutes",
                ranked.as_str(),
            ];
            payload.insert(label.clone(), table_to_json(&board, &cols));
        }
        return print_json(&serde_json::Value::Object(payload));
    }

    println!("Leaderboards, {}", filters.season);
    for (label, ranked) in &boards {
        let board = enriched.sorted_desc(ranked).head(top);
        println!();
        println!("{label} (by {ranked})");
        render_table(
            &board,
            &[
                "player_name",
                "team_name",
                "league_name",
                "minutes",
                ranked.as_str(),
            ],
        );
    }
    Ok(())
}
