//! The stat column catalog.
//!
//! Single source of truth for every numeric column the schema stores, split
//! by storage type. The loader, the schema builder, and the normalization
//! step all iterate these lists so that a column added here flows through
//! ingest, storage, and enrichment without further wiring.

/// Counting stats stored as integers.
pub const COUNT_COLS: &[&str] = &[
    "apps",
    "starts",
    "minutes",
    "goals",
    "assists",
    "np_goals",
    "penalties",
    "penalty_att",
    "yellow_cards",
    "red_cards",
    "shots",
    "shots_on_target",
    "key_passes",
    "passes_into_pen_area",
    "dribbles",
    "tackles",
    "tackles_won",
    "interceptions",
    "blocks",
    "clearances",
    "errors",
    "touches",
    "passes_completed",
    "passes_attempted",
    "progressive_passes",
    "progressive_carries",
    "progressive_receptions",
    "shot_creating_actions",
    "goal_creating_actions",
    "fouls_committed",
    "fouls_drawn",
    "offsides",
    "penalties_won",
    "penalties_conceded",
    "own_goals",
    "recoveries",
    "miscontrols",
    "dispossessed",
    "carries",
    "goals_against",
    "shots_on_target_against",
    "saves",
    "wins",
    "draws",
    "losses",
    "clean_sheets",
    "penalty_kicks_faced",
    "penalty_kicks_saved",
    "penalty_kicks_missed_against",
];

/// Float stats stored as reals: expected-goals volumes plus the rates the
/// data provider computes upstream, carried as-is.
pub const FLOAT_COLS: &[&str] = &[
    "xg",
    "xa",
    "npxg",
    "goals_against_per90",
    "save_pct",
    "clean_sheet_pct",
];

/// Float stats that are volumes, meaningful to sum across players.
const SUMMABLE_FLOAT_COLS: &[&str] = &["xg", "xa", "npxg"];

/// Identity columns a fetched table carries alongside the stats.
pub const IDENTITY_COLS: &[&str] = &[
    "season",
    "league_name",
    "team_name",
    "player_name",
    "nationality",
    "position",
];

/// Every numeric column, in catalog order.
pub fn numeric_columns() -> Vec<&'static str> {
    COUNT_COLS.iter().chain(FLOAT_COLS.iter()).copied().collect()
}

/// Columns an aggregate row sums across its group. Provider-computed rates
/// are excluded; they are re-derived from the sums instead.
pub fn summable_columns() -> Vec<&'static str> {
    COUNT_COLS
        .iter()
        .chain(SUMMABLE_FLOAT_COLS.iter())
        .copied()
        .collect()
}

/// True when the column stores a float stat rather than a count.
pub fn is_float_col(name: &str) -> bool {
    FLOAT_COLS.contains(&name)
}
