//! Unit tests for storage functionality

use fbref_dash::{
    storage::{StatRecord, StatsDatabase},
    Season, StatFilters,
};

fn create_test_db() -> StatsDatabase {
    StatsDatabase::new_in_memory().unwrap()
}

fn test_season() -> Season {
    Season::new("2024-2025")
}

fn make_record(
    player: &str,
    nation: &str,
    team: &str,
    league: &str,
    minutes: i64,
    goals: i64,
) -> StatRecord {
    let mut record = StatRecord {
        player_name: player.to_string(),
        nationality: nation.to_string(),
        team_name: team.to_string(),
        league_name: league.to_string(),
        position: "FW".to_string(),
        ..StatRecord::default()
    };
    record.counts.insert("minutes", minutes);
    record.counts.insert("goals", goals);
    record.counts.insert("apps", minutes / 90);
    record.rates.insert("xg", goals as f64 * 0.8);
    record
}

fn insert_record(db: &StatsDatabase, season: &Season, record: &StatRecord) {
    let mut caches = db.load_id_caches().unwrap();
    let league_id = db.upsert_league(&mut caches, &record.league_name).unwrap();
    let team_id = db
        .upsert_team(&mut caches, &record.team_name, league_id)
        .unwrap();
    let player_id = db
        .upsert_player(&mut caches, &record.player_name, &record.nationality, "FW")
        .unwrap();
    db.upsert_player_stats(player_id, team_id, league_id, season, record)
        .unwrap();
}

#[test]
fn test_database_creation() {
    let _db = create_test_db();
    // Should not panic - database creation successful
}

#[test]
fn test_upsert_league_returns_stable_id() {
    let db = create_test_db();
    let mut caches = db.load_id_caches().unwrap();

    let first = db.upsert_league(&mut caches, "Premier League").unwrap();
    let second = db.upsert_league(&mut caches, "Premier League").unwrap();
    assert_eq!(first, second);

    // Leading/trailing whitespace resolves to the same league.
    let trimmed = db.upsert_league(&mut caches, " Premier League ").unwrap();
    assert_eq!(first, trimmed);

    let other = db.upsert_league(&mut caches, "La Liga").unwrap();
    assert_ne!(first, other);
}

#[test]
fn test_upsert_team_scoped_by_league() {
    let db = create_test_db();
    let mut caches = db.load_id_caches().unwrap();

    let premier = db.upsert_league(&mut caches, "Premier League").unwrap();
    let la_liga = db.upsert_league(&mut caches, "La Liga").unwrap();

    // The same club name in two leagues is two distinct teams.
    let first = db.upsert_team(&mut caches, "United", premier).unwrap();
    let second = db.upsert_team(&mut caches, "United", la_liga).unwrap();
    assert_ne!(first, second);

    let again = db.upsert_team(&mut caches, "United", premier).unwrap();
    assert_eq!(first, again);
}

#[test]
fn test_upsert_player_keyed_by_name_and_nationality() {
    let db = create_test_db();
    let mut caches = db.load_id_caches().unwrap();

    let a = db
        .upsert_player(&mut caches, "Mohamed Salah", "EGY", "FW")
        .unwrap();
    let same = db
        .upsert_player(&mut caches, "Mohamed Salah", "EGY", "FW,MF")
        .unwrap();
    assert_eq!(a, same);

    // A namesake from another country is a different player.
    let namesake = db
        .upsert_player(&mut caches, "Mohamed Salah", "MAR", "DF")
        .unwrap();
    assert_ne!(a, namesake);
}

#[test]
fn test_id_caches_survive_reload() {
    let db = create_test_db();
    let season = test_season();
    insert_record(&db, &season, &make_record("A", "ENG", "Arsenal", "Premier League", 900, 5));

    // A fresh cache load sees the ids written by the first pass.
    let caches = db.load_id_caches().unwrap();
    assert!(caches.leagues.contains_key("Premier League"));
    assert!(caches
        .players
        .contains_key(&("A".to_string(), "ENG".to_string())));
}

#[test]
fn test_stat_row_conflict_overwrites() {
    let db = create_test_db();
    let season = test_season();
    insert_record(&db, &season, &make_record("A", "ENG", "Arsenal", "Premier League", 900, 5));
    // Same (player, team, season): the new stats replace the old ones.
    insert_record(&db, &season, &make_record("A", "ENG", "Arsenal", "Premier League", 1800, 9));

    let table = db
        .fetch_player_stats(&StatFilters::new(season, 0))
        .unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.numeric("minutes").unwrap(), vec![1800.0]);
    assert_eq!(table.numeric("goals").unwrap(), vec![9.0]);
}

#[test]
fn test_fetch_applies_min_minutes() {
    let db = create_test_db();
    let season = test_season();
    insert_record(&db, &season, &make_record("A", "ENG", "Arsenal", "Premier League", 449, 1));
    insert_record(&db, &season, &make_record("B", "ENG", "Arsenal", "Premier League", 450, 2));
    insert_record(&db, &season, &make_record("C", "ENG", "Chelsea", "Premier League", 900, 3));

    let table = db
        .fetch_player_stats(&StatFilters::new(season, 450))
        .unwrap();
    assert_eq!(table.len(), 2);
    let names = table.labels("player_name").unwrap();
    assert_eq!(names, &["B".to_string(), "C".to_string()]);
}

#[test]
fn test_fetch_filters_by_league_team_position() {
    let db = create_test_db();
    let season = test_season();
    insert_record(&db, &season, &make_record("A", "ENG", "Arsenal", "Premier League", 900, 1));
    insert_record(&db, &season, &make_record("B", "ESP", "Barcelona", "La Liga", 900, 2));

    let by_league = db
        .fetch_player_stats(
            &StatFilters::new(season.clone(), 0).with_leagues(vec!["La Liga".to_string()]),
        )
        .unwrap();
    assert_eq!(by_league.len(), 1);
    assert_eq!(by_league.label_at("player_name", 0), Some("B"));

    let by_team = db
        .fetch_player_stats(
            &StatFilters::new(season.clone(), 0).with_teams(vec!["Arsenal".to_string()]),
        )
        .unwrap();
    assert_eq!(by_team.len(), 1);
    assert_eq!(by_team.label_at("player_name", 0), Some("A"));

    let by_position = db
        .fetch_player_stats(
            &StatFilters::new(season.clone(), 0).with_positions(vec!["GK".to_string()]),
        )
        .unwrap();
    assert!(by_position.is_empty());
}

#[test]
fn test_fetch_unknown_season_is_empty_not_error() {
    let db = create_test_db();
    let table = db
        .fetch_player_stats(&StatFilters::new(Season::new("1999-2000"), 0))
        .unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_reference_lists() {
    let db = create_test_db();
    let season = test_season();
    insert_record(&db, &season, &make_record("A", "ENG", "Arsenal", "Premier League", 900, 1));
    insert_record(&db, &season, &make_record("B", "ESP", "Barcelona", "La Liga", 900, 2));

    assert_eq!(db.get_seasons().unwrap(), vec!["2024-2025".to_string()]);
    assert_eq!(
        db.get_leagues(&season).unwrap(),
        vec!["La Liga".to_string(), "Premier League".to_string()]
    );
    assert_eq!(
        db.get_teams(&season, None).unwrap(),
        vec!["Arsenal".to_string(), "Barcelona".to_string()]
    );
    assert_eq!(
        db.get_teams(&season, Some(&["La Liga".to_string()])).unwrap(),
        vec!["Barcelona".to_string()]
    );
    assert_eq!(db.get_positions(&season).unwrap(), vec!["FW".to_string()]);
}

#[test]
fn test_float_stats_round_trip() {
    let db = create_test_db();
    let season = test_season();
    let mut record = make_record("A", "ENG", "Arsenal", "Premier League", 900, 5);
    record.rates.insert("xg", 4.123);
    insert_record(&db, &season, &record);

    let table = db
        .fetch_player_stats(&StatFilters::new(season, 0))
        .unwrap();
    let xg = table.numeric("xg").unwrap();
    assert!((xg[0] - 4.123).abs() < 1e-9);
}
