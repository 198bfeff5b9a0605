//! Side-by-side player comparison over the per-90 metric set.

use std::path::PathBuf;

use crate::cli::types::StatFilters;
use crate::pipeline::table::StatTable;
use crate::pipeline::{aggregate_by, enrich_players};
use crate::{DashError, Result};

use super::common::{format_number, print_json, print_no_data, resolve_db};

/// Metrics compared between the two players: label and column.
const COMPARE_METRICS: &[(&str, &str)] = &[
    ("Goals/90", "goals_per90"),
    ("xG/90", "xg_per90"),
    ("Assists/90", "assists_per90"),
    ("xA/90", "xa_per90"),
    ("Shots/90", "shots_per90"),
    ("Key passes/90", "key_passes_per90"),
    ("Dribbles/90", "dribbles_per90"),
    ("Def actions/90", "def_actions_per90"),
    ("Pass%", "pass_pct"),
];

/// Indices of a player's rows, matched exactly by name.
fn player_rows(table: &StatTable, name: &str) -> Result<Vec<usize>> {
    let names = table.labels("player_name").unwrap_or(&[]);
    let rows: Vec<usize> = names
        .iter()
        .enumerate()
        .filter_map(|(i, n)| (n == name).then_some(i))
        .collect();
    if rows.is_empty() {
        return Err(DashError::PlayerNotFound {
            name: name.to_string(),
        });
    }
    Ok(rows)
}

/// Run the `compare` command.
pub fn handle_compare(
    db_path: Option<PathBuf>,
    filters: StatFilters,
    player_a: String,
    player_b: String,
    exclude_penalties: bool,
    as_json: bool,
) -> Result<()> {
    let db = resolve_db(db_path.as_deref())?;
    let raw = db.fetch_player_stats(&filters)?;
    if raw.is_empty() {
        print_no_data();
        return Ok(());
    }

    let enriched = enrich_players(&raw);
    let mut rows = player_rows(&enriched, &player_a)?;
    rows.extend(player_rows(&enriched, &player_b)?);

    // A player with rows for two teams is rolled up the same way leagues
    // are: raw stats summed, rates derived from the sums.
    let pair = aggregate_by(&enriched.select_rows(&rows), &["player_name"], false);
    let row_a = player_rows(&pair, &player_a)?[0];
    let row_b = player_rows(&pair, &player_b)?[0];

    let metrics: Vec<(&str, &str)> = COMPARE_METRICS
        .iter()
        .map(|&(label, col)| {
            if exclude_penalties && col == "goals_per90" {
                ("NP goals/90", "np_goals_per90")
            } else {
                (label, col)
            }
        })
        .collect();

    if as_json {
        let mut out = Vec::new();
        for (label, col) in &metrics {
            if let (Some(a), Some(b)) = (pair.number_at(col, row_a), pair.number_at(col, row_b)) {
                let mut obj = serde_json::Map::new();
                obj.insert("metric".to_string(), serde_json::json!(label));
                obj.insert(
                    player_a.clone(),
                    serde_json::json!(crate::pipeline::normalize::round_to(a, 2)),
                );
                obj.insert(
                    player_b.clone(),
                    serde_json::json!(crate::pipeline::normalize::round_to(b, 2)),
                );
                out.push(serde_json::Value::Object(obj));
            }
        }
        return print_json(&serde_json::Value::Array(out));
    }

    let goals_note = if exclude_penalties {
        "non-penalty goals"
    } else {
        "all goals"
    };
    println!("Player Comparison ({goals_note}), {}", filters.season);
    println!();
    println!("{:>16}  {:>12}  {:>12}", "metric", player_a, player_b);
    for (label, col) in &metrics {
        if let (Some(a), Some(b)) = (pair.number_at(col, row_a), pair.number_at(col, row_b)) {
            println!(
                "{label:>16}  {:>12}  {:>12}",
                format_number(a),
                format_number(b)
            );
        }
    }
    Ok(())
}
