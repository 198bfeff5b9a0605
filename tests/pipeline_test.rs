//! Integration tests for the enrichment and aggregation pipeline

use fbref_dash::pipeline::{
    aggregate_by_league, aggregate_by_team, enrich_players, filter_min_minutes,
};
use fbref_dash::StatTable;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// A small two-league season: four players with very different minutes.
fn season_table() -> StatTable {
    StatTable::new()
        .with_labels(
            "league_name",
            vec![
                "Premier League".to_string(),
                "Premier League".to_string(),
                "La Liga".to_string(),
                "La Liga".to_string(),
            ],
        )
        .with_labels(
            "team_name",
            vec![
                "Arsenal".to_string(),
                "Chelsea".to_string(),
                "Barcelona".to_string(),
                "Barcelona".to_string(),
            ],
        )
        .with_labels(
            "player_name",
            vec![
                "Short Cameo".to_string(),
                "Regular Starter".to_string(),
                "Rotation Piece".to_string(),
                "Ever Present".to_string(),
            ],
        )
        .with_numbers("minutes", vec![90.0, 900.0, 450.0, 3000.0])
        .with_numbers("goals", vec![1.0, 5.0, 5.0, 10.0])
        .with_numbers("assists", vec![0.0, 3.0, 3.0, 7.0])
        .with_numbers("tackles", vec![2.0, 10.0, 10.0, 40.0])
        .with_numbers("interceptions", vec![1.0, 5.0, 5.0, 20.0])
        .with_numbers("passes_completed", vec![30.0, 200.0, 200.0, 1500.0])
        .with_numbers("passes_attempted", vec![40.0, 250.0, 250.0, 1700.0])
}

#[test]
fn test_enrichment_pipeline_end_to_end() {
    let enriched = enrich_players(&season_table());

    // Rotation Piece is the 450-minute reference row.
    let row = 2;
    assert_close(enriched.numbers("goals_per90").unwrap()[row], 1.0);
    assert_close(enriched.numbers("pass_pct").unwrap()[row], 80.0);
    assert_close(enriched.numbers("def_actions").unwrap()[row], 15.0);
    assert_close(enriched.numbers("def_actions_per90").unwrap()[row], 3.0);
    assert_close(enriched.numbers("goal_contributions").unwrap()[row], 8.0);
    assert_close(enriched.numbers("goal_contributions_per90").unwrap()[row], 1.6);
}

#[test]
fn test_league_rollup_weights_by_minutes() {
    let enriched = enrich_players(&season_table());
    let leagues = aggregate_by_league(&enriched);
    assert_eq!(leagues.len(), 2);

    // Premier League: (1 + 5) goals over (90 + 900) minutes.
    let names = leagues.labels("league_name").unwrap();
    let premier = names.iter().position(|n| n == "Premier League").unwrap();
    assert_close(
        leagues.numbers("goals_per90").unwrap()[premier],
        6.0 / 990.0 * 90.0,
    );

    // The cameo's inflated 1.0-goals-per-90 must not drag the average up.
    let mean_of_rates = (1.0 / 90.0 * 90.0 + 5.0 / 900.0 * 90.0) / 2.0;
    assert!((leagues.numbers("goals_per90").unwrap()[premier] - mean_of_rates).abs() > 0.1);

    assert_close(leagues.numbers("players").unwrap()[premier], 2.0);
}

#[test]
fn test_team_rollup_pass_pct_from_sums() {
    let enriched = enrich_players(&season_table());
    let teams = aggregate_by_team(&enriched);
    assert_eq!(teams.len(), 3);

    let team_names = teams.labels("team_name").unwrap();
    let barcelona = team_names.iter().position(|n| n == "Barcelona").unwrap();
    // (200 + 1500) completed of (250 + 1700) attempted.
    assert_close(
        teams.numbers("pass_pct").unwrap()[barcelona],
        1700.0 / 1950.0 * 100.0,
    );
}

#[test]
fn test_views_share_derived_column_names() {
    let enriched = enrich_players(&season_table());
    let leagues = aggregate_by_league(&enriched);
    let teams = aggregate_by_team(&enriched);

    for col in [
        "goals_per90",
        "def_actions",
        "def_actions_per90",
        "goal_contributions_per90",
        "pass_pct",
    ] {
        assert!(enriched.has_column(col), "player table missing {col}");
        assert!(leagues.has_column(col), "league table missing {col}");
        assert!(teams.has_column(col), "team table missing {col}");
    }
}

#[test]
fn test_filter_then_enrich_equals_enrich_then_filter() {
    let table = season_table();
    let a = enrich_players(&filter_min_minutes(&table, 450));
    let b = filter_min_minutes(&enrich_players(&table), 450);
    assert_eq!(a, b);
    assert_eq!(a.len(), 3);
}

#[test]
fn test_filter_retains_boundary_rows() {
    let filtered = filter_min_minutes(&season_table(), 450);
    assert_eq!(
        filtered.numbers("minutes").unwrap(),
        &[900.0, 450.0, 3000.0]
    );
}

#[test]
fn test_zero_minute_rows_stay_defined_through_rollup() {
    let table = StatTable::new()
        .with_labels(
            "league_name",
            vec!["Ligue 1".to_string(), "Ligue 1".to_string()],
        )
        .with_labels("player_name", vec!["Unused Sub".to_string(), "Starter".to_string()])
        .with_numbers("minutes", vec![0.0, 900.0])
        .with_numbers("goals", vec![1.0, 0.0]);

    let enriched = enrich_players(&table);
    // Minutes floor of 1: the unused sub reports 90 goals per 90.
    assert_close(enriched.numbers("goals_per90").unwrap()[0], 90.0);

    let leagues = aggregate_by_league(&enriched);
    assert_close(leagues.numbers("goals_per90").unwrap()[0], 1.0 / 900.0 * 90.0);
}
