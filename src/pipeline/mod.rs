//! The derivation and aggregation pipeline.
//!
//! A stateless, single-pass pipeline over [`table::StatTable`] values:
//! normalize → per-90 rates → composite metrics → (optionally) aggregate.
//! Every stage takes its input by reference and returns a new table, and
//! every derived column is a pure function of base columns, so running the
//! pipeline twice over an already-enriched table changes nothing.

pub mod aggregate;
pub mod columns;
pub mod composite;
pub mod normalize;
pub mod per90;
pub mod table;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate_by, aggregate_by_league, aggregate_by_team};
pub use table::StatTable;

/// Run the rate and composite derivations over an already-numeric table.
///
/// Later steps may read earlier-added columns (`def_actions_per90` depends on
/// `def_actions`); the order here is the only ordering the pipeline needs.
pub fn derive_metrics(table: &StatTable) -> StatTable {
    let t = per90::add_per90(table, per90::PER90_BASE_COLS);
    let t = composite::add_pass_pct(&t);
    let t = composite::add_defensive_actions(&t);
    let t = composite::add_goal_contributions(&t);
    let t = composite::add_goalkeeping(&t);
    composite::add_possession_losses(&t)
}

/// Full player-table enrichment: numeric coercion, then every derivation.
pub fn enrich_players(table: &StatTable) -> StatTable {
    let t = normalize::ensure_numeric(table, &columns::numeric_columns());
    derive_metrics(&t)
}

/// Keep rows with at least `min_minutes` played.
///
/// Pure and order-preserving; tables without a `minutes` column pass through
/// unchanged.
pub fn filter_min_minutes(table: &StatTable, min_minutes: u32) -> StatTable {
    match table.numeric("minutes") {
        Some(minutes) => {
            let keep: Vec<bool> = minutes.iter().map(|m| *m >= min_minutes as f64).collect();
            table.retain_rows(&keep)
        }
        None => table.clone(),
    }
}
