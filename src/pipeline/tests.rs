//! Unit tests for the derivation and aggregation pipeline

use super::composite::ratio_pct;
use super::normalize::{ensure_numeric, parse_count, parse_rate, round_to};
use super::per90::{add_per90, per90, PER90_BASE_COLS};
use super::table::{Cell, StatTable};
use super::*;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// One midfielder's season: the reference row used across derivation tests.
fn midfielder_row() -> StatTable {
    StatTable::new()
        .with_labels("player_name", vec!["Test Player".to_string()])
        .with_numbers("minutes", vec![450.0])
        .with_numbers("goals", vec![5.0])
        .with_numbers("assists", vec![3.0])
        .with_numbers("passes_completed", vec![200.0])
        .with_numbers("passes_attempted", vec![250.0])
        .with_numbers("tackles", vec![10.0])
        .with_numbers("interceptions", vec![5.0])
}

mod normalize_tests {
    use super::*;

    #[test]
    fn test_ensure_numeric_coerces_cells() {
        let table = StatTable::new().with_cells(
            "goals",
            vec![
                Cell::Num(3.0),
                Cell::Text("12".to_string()),
                Cell::Text("junk".to_string()),
                Cell::Null,
            ],
        );
        let out = ensure_numeric(&table, &["goals"]);
        assert_eq!(out.numbers("goals").unwrap(), &[3.0, 12.0, 0.0, 0.0]);
    }

    #[test]
    fn test_ensure_numeric_parses_label_columns() {
        let table = StatTable::new().with_labels(
            "minutes",
            vec!["90".to_string(), " 45 ".to_string(), "n/a".to_string()],
        );
        let out = ensure_numeric(&table, &["minutes"]);
        assert_eq!(out.numbers("minutes").unwrap(), &[90.0, 45.0, 0.0]);
    }

    #[test]
    fn test_ensure_numeric_leaves_missing_columns_absent() {
        let table = StatTable::new().with_numbers("goals", vec![1.0]);
        let out = ensure_numeric(&table, &["goals", "assists"]);
        assert!(out.numbers("goals").is_some());
        assert!(!out.has_column("assists"));
    }

    #[test]
    fn test_parse_count_zero_fill() {
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("   "), 0);
        assert_eq!(parse_count("junk"), 0);
        assert_eq!(parse_count("7"), 7);
    }

    #[test]
    fn test_parse_count_rounds_half_to_even() {
        assert_eq!(parse_count("2.5"), 2);
        assert_eq!(parse_count("3.5"), 4);
        assert_eq!(parse_count("2.6"), 3);
    }

    #[test]
    fn test_parse_rate_three_decimals() {
        assert_close(parse_rate("0.12345"), 0.123);
        assert_close(parse_rate("4.5"), 4.5);
        assert_close(parse_rate(""), 0.0);
        assert_close(parse_rate("bad"), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_close(round_to(1.005, 2), 1.0);
        assert_close(round_to(2.675, 1), 2.7);
    }
}

mod per90_tests {
    use super::*;

    #[test]
    fn test_per90_formula() {
        assert_close(per90(5.0, 450.0), 1.0);
        assert_close(per90(1.0, 900.0), 0.1);
    }

    #[test]
    fn test_per90_zero_minutes_uses_floor_of_one() {
        // A 0-minute player with 1 goal reports 90.0, not NaN.
        assert_close(per90(1.0, 0.0), 90.0);
    }

    #[test]
    fn test_add_per90_every_row_defined() {
        let table = StatTable::new()
            .with_numbers("minutes", vec![0.0, 90.0, 450.0])
            .with_numbers("goals", vec![1.0, 2.0, 5.0]);
        let out = add_per90(&table, PER90_BASE_COLS);
        let rates = out.numbers("goals_per90").unwrap();
        for (row, rate) in rates.iter().enumerate() {
            assert!(rate.is_finite(), "row {row} produced a non-finite rate");
        }
        assert_close(rates[0], 90.0);
        assert_close(rates[1], 2.0);
        assert_close(rates[2], 1.0);
    }

    #[test]
    fn test_add_per90_skips_absent_columns() {
        let table = StatTable::new()
            .with_numbers("minutes", vec![90.0])
            .with_numbers("goals", vec![1.0]);
        let out = add_per90(&table, PER90_BASE_COLS);
        assert!(out.numbers("goals_per90").is_some());
        assert!(!out.has_column("assists_per90"));
    }

    #[test]
    fn test_add_per90_without_minutes_is_identity() {
        let table = StatTable::new().with_numbers("goals", vec![1.0]);
        let out = add_per90(&table, PER90_BASE_COLS);
        assert_eq!(out, table);
    }
}

mod composite_tests {
    use super::*;

    #[test]
    fn test_ratio_pct_zero_denominator_is_zero() {
        assert_close(ratio_pct(5.0, 0.0), 0.0);
        assert_close(ratio_pct(200.0, 250.0), 80.0);
    }

    #[test]
    fn test_pass_pct_zero_attempts() {
        let table = StatTable::new()
            .with_numbers("passes_completed", vec![0.0, 200.0])
            .with_numbers("passes_attempted", vec![0.0, 250.0]);
        let out = composite::add_pass_pct(&table);
        let pct = out.numbers("pass_pct").unwrap();
        assert_close(pct[0], 0.0);
        assert_close(pct[1], 80.0);
    }

    #[test]
    fn test_goalkeeping_zero_denominators() {
        let table = StatTable::new()
            .with_numbers("minutes", vec![0.0])
            .with_numbers("goals_against", vec![2.0])
            .with_numbers("saves", vec![3.0])
            .with_numbers("shots_on_target_against", vec![0.0])
            .with_numbers("clean_sheets", vec![1.0])
            .with_numbers("apps", vec![0.0]);
        let out = composite::add_goalkeeping(&table);
        assert_close(out.numbers("save_pct_calc").unwrap()[0], 0.0);
        assert_close(out.numbers("clean_sheet_pct_calc").unwrap()[0], 0.0);
        assert_close(out.numbers("ga_per90").unwrap()[0], 180.0);
    }

    #[test]
    fn test_goalkeeping_partial_columns() {
        // An outfield table: goals_against present, save data absent.
        let table = StatTable::new()
            .with_numbers("minutes", vec![900.0])
            .with_numbers("goals_against", vec![10.0]);
        let out = composite::add_goalkeeping(&table);
        assert_close(out.numbers("ga_per90").unwrap()[0], 1.0);
        assert!(!out.has_column("save_pct_calc"));
        assert!(!out.has_column("clean_sheet_pct_calc"));
    }

    #[test]
    fn test_possession_losses() {
        let table = StatTable::new()
            .with_numbers("minutes", vec![450.0])
            .with_numbers("miscontrols", vec![12.0])
            .with_numbers("dispossessed", vec![8.0]);
        let out = composite::add_possession_losses(&table);
        assert_close(out.numbers("possession_losses").unwrap()[0], 20.0);
        assert_close(out.numbers("possession_losses_per90").unwrap()[0], 4.0);
    }
}

mod enrichment_tests {
    use super::*;

    #[test]
    fn test_midfielder_scenario() {
        let out = enrich_players(&midfielder_row());
        assert_close(out.numbers("goals_per90").unwrap()[0], 1.0);
        assert_close(out.numbers("pass_pct").unwrap()[0], 80.0);
        assert_close(out.numbers("def_actions").unwrap()[0], 15.0);
        assert_close(out.numbers("def_actions_per90").unwrap()[0], 3.0);
        assert_close(out.numbers("goal_contributions").unwrap()[0], 8.0);
        assert_close(out.numbers("goal_contributions_per90").unwrap()[0], 1.6);
    }

    #[test]
    fn test_enrichment_omits_unavailable_metrics() {
        let out = enrich_players(&midfielder_row());
        // No save data in the input, so no save percentage out.
        assert!(!out.has_column("save_pct_calc"));
        assert!(!out.has_column("possession_losses"));
    }

    #[test]
    fn test_enrichment_is_idempotent() {
        let once = enrich_players(&midfielder_row());
        let twice = enrich_players(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_enrichment_accepts_raw_cells() {
        let table = StatTable::new()
            .with_cells("minutes", vec![Cell::Text("450".to_string())])
            .with_cells("goals", vec![Cell::Text("junk".to_string())]);
        let out = enrich_players(&table);
        assert_close(out.numbers("goals_per90").unwrap()[0], 0.0);
    }
}

mod aggregate_tests {
    use super::*;

    fn two_player_league() -> StatTable {
        StatTable::new()
            .with_labels(
                "league_name",
                vec!["Premier League".to_string(), "Premier League".to_string()],
            )
            .with_labels(
                "team_name",
                vec!["Arsenal".to_string(), "Chelsea".to_string()],
            )
            .with_labels("player_name", vec!["A".to_string(), "B".to_string()])
            .with_numbers("minutes", vec![90.0, 900.0])
            .with_numbers("goals", vec![1.0, 5.0])
    }

    #[test]
    fn test_league_aggregate_sums_then_derives() {
        let agg = aggregate_by_league(&two_player_league());
        assert_eq!(agg.len(), 1);
        assert_close(agg.numbers("minutes").unwrap()[0], 990.0);
        assert_close(agg.numbers("goals").unwrap()[0], 6.0);
        // Total goals over total minutes, not the mean of the two rates.
        let expected = 6.0 / 990.0 * 90.0;
        assert_close(agg.numbers("goals_per90").unwrap()[0], expected);
        let mean_of_rates = (per90(1.0, 90.0) + per90(5.0, 900.0)) / 2.0;
        assert!((agg.numbers("goals_per90").unwrap()[0] - mean_of_rates).abs() > 0.01);
    }

    #[test]
    fn test_league_aggregate_counts_distinct_players() {
        let table = two_player_league();
        let agg = aggregate_by_league(&table);
        assert_close(agg.numbers("players").unwrap()[0], 2.0);

        // The same player on two teams counts once.
        let transfer = StatTable::new()
            .with_labels(
                "league_name",
                vec!["Serie A".to_string(), "Serie A".to_string()],
            )
            .with_labels("player_name", vec!["C".to_string(), "C".to_string()])
            .with_numbers("minutes", vec![400.0, 500.0])
            .with_numbers("goals", vec![2.0, 3.0]);
        let agg = aggregate_by_league(&transfer);
        assert_close(agg.numbers("players").unwrap()[0], 1.0);
    }

    #[test]
    fn test_team_aggregate_has_no_players_column() {
        let agg = aggregate_by_team(&two_player_league());
        assert_eq!(agg.len(), 2);
        assert!(!agg.has_column("players"));
    }

    #[test]
    fn test_aggregate_missing_group_column_is_empty() {
        let table = StatTable::new().with_numbers("goals", vec![1.0]);
        let agg = aggregate_by_league(&table);
        assert!(agg.is_empty());
    }

    #[test]
    fn test_player_rollup_combines_transfer_rows() {
        let table = StatTable::new()
            .with_labels("player_name", vec!["C".to_string(), "C".to_string()])
            .with_numbers("minutes", vec![450.0, 450.0])
            .with_numbers("goals", vec![3.0, 7.0]);
        let agg = aggregate_by(&table, &["player_name"], false);
        assert_eq!(agg.len(), 1);
        assert_close(agg.numbers("goals_per90").unwrap()[0], 1.0);
    }

    #[test]
    fn test_aggregate_exposes_same_derived_names_as_enrichment() {
        let enriched = enrich_players(&two_player_league());
        let agg = aggregate_by_league(&two_player_league());
        for name in ["goals_per90", "minutes", "goals"] {
            assert!(enriched.has_column(name));
            assert!(agg.has_column(name), "aggregate missing {name}");
        }
    }
}

mod filter_tests {
    use super::*;

    #[test]
    fn test_filter_min_minutes_boundary() {
        let table = StatTable::new()
            .with_labels(
                "player_name",
                vec!["a".into(), "b".into(), "c".into(), "d".into()],
            )
            .with_numbers("minutes", vec![0.0, 449.0, 450.0, 900.0]);
        let kept = filter_min_minutes(&table, 450);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.numbers("minutes").unwrap(), &[450.0, 900.0]);
        assert_eq!(
            kept.labels("player_name").unwrap(),
            &["c".to_string(), "d".to_string()]
        );
    }

    #[test]
    fn test_filter_without_minutes_passes_through() {
        let table = StatTable::new().with_numbers("goals", vec![1.0, 2.0]);
        assert_eq!(filter_min_minutes(&table, 450).len(), 2);
    }
}

mod table_tests {
    use super::*;

    #[test]
    fn test_sorted_desc_and_head() {
        let table = StatTable::new()
            .with_labels("player_name", vec!["a".into(), "b".into(), "c".into()])
            .with_numbers("goals", vec![2.0, 9.0, 5.0]);
        let top = table.sorted_desc("goals").head(2);
        assert_eq!(top.numbers("goals").unwrap(), &[9.0, 5.0]);
        assert_eq!(
            top.labels("player_name").unwrap(),
            &["b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_numeric_view_of_cells() {
        let table = StatTable::new().with_cells(
            "touches",
            vec![Cell::Num(10.0), Cell::Null, Cell::Text("5".to_string())],
        );
        assert_eq!(table.numeric("touches").unwrap(), vec![10.0, 0.0, 5.0]);
        assert!(table.numeric("missing").is_none());
    }
}
