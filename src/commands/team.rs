//! One team: totals, top contributors, team-vs-league deltas, squad table.

use std::path::PathBuf;

use crate::cli::types::{Season, StatFilters};
use crate::pipeline::table::StatTable;
use crate::pipeline::{aggregate_by_league, aggregate_by_team, enrich_players};
use crate::Result;

use super::common::{format_number, print_json, render_table, resolve_db, table_to_json};

/// Summed team headline figures: label and aggregate-row column.
const TOTAL_COLS: &[(&str, &str)] = &[
    ("Minutes", "minutes"),
    ("Goals", "goals"),
    ("xG", "xg"),
    ("Assists", "assists"),
    ("xA", "xa"),
    ("Shots", "shots"),
    ("Pass%", "pass_pct"),
    ("Def actions/90", "def_actions_per90"),
];

/// Metrics compared against the league benchmark.
const DELTA_COLS: &[(&str, &str)] = &[
    ("Goals/90", "goals_per90"),
    ("xG/90", "xg_per90"),
    ("Assists/90", "assists_per90"),
    ("xA/90", "xa_per90"),
    ("Shots/90", "shots_per90"),
    ("Key passes/90", "key_passes_per90"),
    ("Def actions/90", "def_actions_per90"),
    ("Pass%", "pass_pct"),
];

const SQUAD_COLS: &[&str] = &[
    "player_name",
    "position",
    "apps",
    "minutes",
    "goals",
    "assists",
    "xg",
    "xa",
    "shots",
    "key_passes",
    "dribbles",
    "def_actions",
    "goals_per90",
    "xg_per90",
    "assists_per90",
    "shots_per90",
    "key_passes_per90",
    "def_actions_per90",
    "pass_pct",
];

const CONTRIBUTOR_COLS: &[&str] = &["player_name", "goals", "xg", "assists", "xa"];

fn single_row(table: &StatTable, column: &str) -> Option<f64> {
    table.number_at(column, 0)
}

/// Run the `team` command.
#[allow(clippy::too_many_arguments)]
pub fn handle_team(
    db_path: Option<PathBuf>,
    season: Season,
    league: String,
    team: String,
    min_minutes: u32,
    as_json: bool,
) -> Result<()> {
    let db = resolve_db(db_path.as_deref())?;

    let team_filters = StatFilters::new(season.clone(), min_minutes)
        .with_leagues(vec![league.clone()])
        .with_teams(vec![team.clone()]);
    let raw = db.fetch_player_stats(&team_filters)?;
    if raw.is_empty() {
        println!("Select another team or relax the minute filter.");
        return Ok(());
    }

    let squad = enrich_players(&raw);
    // Sum-then-derive gives the team row; its rates are totals over total
    // minutes, not averages of the squad's per-90 values.
    let team_row = aggregate_by_team(&squad);
    let top = squad.sorted_desc("goals").head(5);

    let league_filters =
        StatFilters::new(season.clone(), min_minutes).with_leagues(vec![league.clone()]);
    let league_row = aggregate_by_league(&enrich_players(&db.fetch_player_stats(&league_filters)?));

    if as_json {
        let mut deltas = Vec::new();
        for (label, col) in DELTA_COLS {
            if let (Some(tv), Some(lv)) = (single_row(&team_row, col), single_row(&league_row, col))
            {
                deltas.push(serde_json::json!({
                    "metric": label,
                    "team": crate::pipeline::normalize::round_to(tv, 2),
                    "league": crate::pipeline::normalize::round_to(lv, 2),
                }));
            }
        }
        let payload = serde_json::json!({
            "season": season.as_str(),
            "league": league,
            "team": team,
            "totals": table_to_json(&team_row, &TOTAL_COLS.iter().map(|(_, c)| *c).collect::<Vec<_>>()),
            "top_contributors": table_to_json(&top, CONTRIBUTOR_COLS),
            "vs_league": serde_json::Value::Array(deltas),
            "squad": table_to_json(&squad, SQUAD_COLS),
        });
        return print_json(&payload);
    }

    println!("Team Stats: {team} ({league}, {season})");
    println!();
    for (label, col) in TOTAL_COLS {
        if let Some(v) = single_row(&team_row, col) {
            println!("{label:>16}: {}", format_number(v));
        }
    }

    println!();
    println!("Top contributors (Goals/xG/xA)");
    render_table(&top, CONTRIBUTOR_COLS);

    println!();
    println!("Team vs league (per-90)");
    println!("{:>16}  {:>8}  {:>8}  {:>8}", "metric", "team", "league", "delta");
    for (label, col) in DELTA_COLS {
        if let (Some(tv), Some(lv)) = (single_row(&team_row, col), single_row(&league_row, col)) {
            println!(
                "{label:>16}  {:>8}  {:>8}  {:>8}",
                format_number(tv),
                format_number(lv),
                format_number(tv - lv)
            );
        }
    }

    println!();
    println!("Squad detail (per-90)");
    render_table(&squad, SQUAD_COLS);
    Ok(())
}
