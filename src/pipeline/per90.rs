//! Per-90-minute rate derivation.
//!
//! `rate = (count / max(minutes, 1)) * 90`. The denominator floor of 1 is
//! applied uniformly rather than skipping zero-minute rows: a player with
//! 0 minutes and 1 goal reports `goals_per90 = 90.0`, never NaN. Every rate
//! column this module emits is therefore defined for every row.

use super::table::StatTable;

/// Counting stats that get a `_per90` companion column.
pub const PER90_BASE_COLS: &[&str] = &[
    "goals",
    "assists",
    "np_goals",
    "xg",
    "xa",
    "shots",
    "shots_on_target",
    "key_passes",
    "dribbles",
    "touches",
    "tackles",
    "tackles_won",
    "interceptions",
    "blocks",
    "clearances",
    "passes_into_pen_area",
    "progressive_passes",
    "progressive_carries",
    "progressive_receptions",
    "shot_creating_actions",
    "goal_creating_actions",
    "recoveries",
    "carries",
];

/// A single per-90 rate with the minutes floor of 1.
pub fn per90(count: f64, minutes: f64) -> f64 {
    (count / minutes.max(1.0)) * 90.0
}

/// Add a `<col>_per90` column for each listed column present in the table.
///
/// Absent source columns are skipped silently. A table without a `minutes`
/// column derives nothing and is returned unchanged.
pub fn add_per90(table: &StatTable, columns: &[&str]) -> StatTable {
    let Some(minutes) = table.numbers("minutes").map(<[f64]>::to_vec) else {
        return table.clone();
    };
    let mut out = table.clone();
    for col in columns {
        if let Some(values) = table.numbers(col) {
            let rates = values
                .iter()
                .zip(minutes.iter())
                .map(|(v, m)| per90(*v, *m))
                .collect();
            out.set_numbers(&format!("{col}_per90"), rates);
        }
    }
    out
}
