//! Composite metrics combining multiple counting stats.
//!
//! Each derivation checks once, at table level, that its source columns are
//! present; a table missing a source simply does not get that metric. Zero
//! denominators yield 0, matching the per-90 layer's rule that derived
//! columns are always defined.

use super::per90::{add_per90, per90};
use super::table::StatTable;

/// Percentage ratio with the zero-denominator-is-zero rule.
pub fn ratio_pct(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        (numerator / denominator) * 100.0
    }
}

fn column_sum(table: &StatTable, a: &str, b: &str) -> Option<Vec<f64>> {
    let left = table.numbers(a)?;
    let right = table.numbers(b)?;
    Some(left.iter().zip(right.iter()).map(|(x, y)| x + y).collect())
}

fn column_pct(table: &StatTable, numerator: &str, denominator: &str) -> Option<Vec<f64>> {
    let num = table.numbers(numerator)?;
    let den = table.numbers(denominator)?;
    Some(
        num.iter()
            .zip(den.iter())
            .map(|(n, d)| ratio_pct(*n, *d))
            .collect(),
    )
}

/// `pass_pct = passes_completed / passes_attempted * 100`.
pub fn add_pass_pct(table: &StatTable) -> StatTable {
    let Some(pct) = column_pct(table, "passes_completed", "passes_attempted") else {
        return table.clone();
    };
    let mut out = table.clone();
    out.set_numbers("pass_pct", pct);
    out
}

/// `def_actions = tackles + interceptions`, plus its per-90 rate.
pub fn add_defensive_actions(table: &StatTable) -> StatTable {
    let Some(actions) = column_sum(table, "tackles", "interceptions") else {
        return table.clone();
    };
    let mut out = table.clone();
    out.set_numbers("def_actions", actions);
    add_per90(&out, &["def_actions"])
}

/// `goal_contributions = goals + assists`, plus its per-90 rate.
pub fn add_goal_contributions(table: &StatTable) -> StatTable {
    let Some(contributions) = column_sum(table, "goals", "assists") else {
        return table.clone();
    };
    let mut out = table.clone();
    out.set_numbers("goal_contributions", contributions);
    add_per90(&out, &["goal_contributions"])
}

/// Goalkeeping rates: `ga_per90`, `save_pct_calc`, `clean_sheet_pct_calc`.
///
/// The three outputs are checked independently, so an outfield table with
/// `goals_against` but no save data still gets `ga_per90`.
pub fn add_goalkeeping(table: &StatTable) -> StatTable {
    let mut out = table.clone();
    if let (Some(against), Some(minutes)) =
        (table.numbers("goals_against"), table.numbers("minutes"))
    {
        let rates = against
            .iter()
            .zip(minutes.iter())
            .map(|(g, m)| per90(*g, *m))
            .collect();
        out.set_numbers("ga_per90", rates);
    }
    if let Some(pct) = column_pct(table, "saves", "shots_on_target_against") {
        out.set_numbers("save_pct_calc", pct);
    }
    if let Some(pct) = column_pct(table, "clean_sheets", "apps") {
        out.set_numbers("clean_sheet_pct_calc", pct);
    }
    out
}

/// `possession_losses = miscontrols + dispossessed`, plus its per-90 rate.
pub fn add_possession_losses(table: &StatTable) -> StatTable {
    let Some(losses) = column_sum(table, "miscontrols", "dispossessed") else {
        return table.clone();
    };
    let mut out = table.clone();
    out.set_numbers("possession_losses", losses);
    add_per90(&out, &["possession_losses"])
}
