//! League, team, and player rollups.
//!
//! Aggregation sums raw counting stats across the group and re-runs the rate
//! derivations on the summed row. Averaging per-row per-90 values would bias
//! aggregates toward low-minute players; total-count over total-minutes is
//! the invariant every view relies on.

use std::collections::{BTreeMap, BTreeSet};

use super::columns;
use super::normalize::ensure_numeric;
use super::table::StatTable;

/// Roll player rows up to one row per league, with a distinct-player count.
pub fn aggregate_by_league(table: &StatTable) -> StatTable {
    aggregate_by(table, &["league_name"], true)
}

/// Roll player rows up to one row per (league, team).
pub fn aggregate_by_team(table: &StatTable) -> StatTable {
    aggregate_by(table, &["league_name", "team_name"], false)
}

/// Group rows by the given label columns, sum every summable stat column
/// present, then re-derive rates and composites on the sums.
///
/// Returns an empty table when a grouping column is missing. `count_players`
/// adds a `players` column counting distinct `player_name` values per group.
pub fn aggregate_by(table: &StatTable, group_cols: &[&str], count_players: bool) -> StatTable {
    let table = ensure_numeric(table, &columns::numeric_columns());

    let mut key_columns: Vec<&[String]> = Vec::with_capacity(group_cols.len());
    for col in group_cols {
        match table.labels(col) {
            Some(labels) => key_columns.push(labels),
            None => return StatTable::new(),
        }
    }

    // BTreeMap keeps group output ordering deterministic.
    let mut groups: BTreeMap<Vec<String>, Vec<usize>> = BTreeMap::new();
    for row in 0..table.len() {
        let key: Vec<String> = key_columns.iter().map(|col| col[row].clone()).collect();
        groups.entry(key).or_default().push(row);
    }

    let summable: Vec<&str> = columns::summable_columns()
        .into_iter()
        .filter(|c| table.numbers(c).is_some())
        .collect();
    let players = count_players
        .then(|| table.labels("player_name"))
        .flatten();

    let mut label_out: Vec<Vec<String>> = vec![Vec::with_capacity(groups.len()); group_cols.len()];
    let mut sums_out: Vec<Vec<f64>> = vec![Vec::with_capacity(groups.len()); summable.len()];
    let mut players_out: Vec<f64> = Vec::with_capacity(groups.len());

    for (key, rows) in &groups {
        for (i, part) in key.iter().enumerate() {
            label_out[i].push(part.clone());
        }
        for (i, col) in summable.iter().enumerate() {
            let values = table.numbers(col).unwrap_or(&[]);
            sums_out[i].push(rows.iter().map(|&r| values[r]).sum());
        }
        if let Some(names) = players {
            let distinct: BTreeSet<&str> = rows.iter().map(|&r| names[r].as_str()).collect();
            players_out.push(distinct.len() as f64);
        }
    }

    let mut out = StatTable::new();
    for (i, col) in group_cols.iter().enumerate() {
        out = out.with_labels(col, std::mem::take(&mut label_out[i]));
    }
    for (i, col) in summable.iter().enumerate() {
        out = out.with_numbers(col, std::mem::take(&mut sums_out[i]));
    }
    if players.is_some() {
        out = out.with_numbers("players", players_out);
    }

    super::derive_metrics(&out)
}
