//! Season CSV ingest.
//!
//! Reads an FBRef-style season export and batch-upserts it into the
//! relational schema: league and team and player identities first (id
//! lookups served from in-memory caches loaded once per run), then the
//! stat row keyed by (player, team, season). Re-loading the same file
//! overwrites stat columns in place.
//!
//! Numeric cells follow the ingest zero-fill rule: blank or unparseable
//! values become 0, counts round half-to-even, floats keep 3 decimals.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::types::Season;
use crate::pipeline::columns::is_float_col;
use crate::pipeline::normalize::{parse_count, parse_rate};
use crate::storage::{StatRecord, StatsDatabase};
use crate::{DashError, Result};

use super::common::resolve_db;

/// CSV header → stat column, in catalog order.
const CSV_FIELD_MAP: &[(&str, &str)] = &[
    ("MP", "apps"),
    ("Starts", "starts"),
    ("Min", "minutes"),
    ("Gls", "goals"),
    ("Ast", "assists"),
    ("G-PK", "np_goals"),
    ("PK", "penalties"),
    ("PKatt", "penalty_att"),
    ("CrdY", "yellow_cards"),
    ("CrdR", "red_cards"),
    ("xG", "xg"),
    ("xA", "xa"),
    ("npxG", "npxg"),
    ("Sh", "shots"),
    ("SoT", "shots_on_target"),
    ("KP", "key_passes"),
    ("PPA", "passes_into_pen_area"),
    ("Succ", "dribbles"),
    ("Tkl", "tackles"),
    ("TklW", "tackles_won"),
    ("Int", "interceptions"),
    ("Blocks", "blocks"),
    ("Clr", "clearances"),
    ("Err", "errors"),
    ("Touches", "touches"),
    ("Cmp", "passes_completed"),
    ("Att", "passes_attempted"),
    ("PrgP", "progressive_passes"),
    ("PrgC", "progressive_carries"),
    ("PrgR", "progressive_receptions"),
    ("SCA", "shot_creating_actions"),
    ("GCA", "goal_creating_actions"),
    ("Fls", "fouls_committed"),
    ("Fld", "fouls_drawn"),
    ("Off", "offsides"),
    ("PKwon", "penalties_won"),
    ("PKcon", "penalties_conceded"),
    ("OG", "own_goals"),
    ("Recov", "recoveries"),
    ("Mis", "miscontrols"),
    ("Dis", "dispossessed"),
    ("Carries", "carries"),
    ("GA", "goals_against"),
    ("GA90", "goals_against_per90"),
    ("SoTA", "shots_on_target_against"),
    ("Saves", "saves"),
    ("Save%", "save_pct"),
    ("W", "wins"),
    ("D", "draws"),
    ("L", "losses"),
    ("CS", "clean_sheets"),
    ("CS%", "clean_sheet_pct"),
    ("PKA", "penalty_kicks_faced"),
    ("PKsv", "penalty_kicks_saved"),
    ("PKm", "penalty_kicks_missed_against"),
];

/// First comma-token of a position string ("DF,MF" → "DF").
pub fn clean_position(pos: &str) -> String {
    pos.split(',').next().unwrap_or("").trim().to_string()
}

/// Cell for a header name, or an empty string when the export lacks it.
/// Stats behind absent headers upsert as zero.
fn field<'a>(
    row: &'a csv::StringRecord,
    index: &HashMap<String, usize>,
    header: &str,
) -> &'a str {
    index
        .get(header)
        .and_then(|&i| row.get(i))
        .unwrap_or("")
}

/// Build a [`StatRecord`] from one CSV row.
fn build_record(row: &csv::StringRecord, index: &HashMap<String, usize>) -> StatRecord {
    let mut record = StatRecord {
        player_name: field(row, index, "Player").trim().to_string(),
        nationality: field(row, index, "Nation").trim().to_string(),
        team_name: field(row, index, "Squad").trim().to_string(),
        league_name: field(row, index, "Comp").trim().to_string(),
        position: field(row, index, "Pos").trim().to_string(),
        ..StatRecord::default()
    };
    for &(header, col) in CSV_FIELD_MAP {
        let raw = field(row, index, header);
        if is_float_col(col) {
            record.rates.insert(col, parse_rate(raw));
        } else {
            record.counts.insert(col, parse_count(raw));
        }
    }
    record
}

/// Load a season CSV into the database; returns the upserted row count.
///
/// Rows without a player, team, or league name are skipped. Work is
/// committed every `batch_size` rows and once more at the end.
pub fn load_csv(
    db: &StatsDatabase,
    csv_path: &Path,
    season: &Season,
    batch_size: usize,
    verbose: bool,
) -> Result<usize> {
    if !csv_path.exists() {
        return Err(DashError::CsvNotFound {
            path: csv_path.to_path_buf(),
        });
    }
    let batch_size = batch_size.max(1);

    let mut reader = csv::Reader::from_path(csv_path)?;
    let header_index: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_string(), i))
        .collect();

    let mut caches = db.load_id_caches()?;
    let mut upserted = 0usize;
    let mut skipped = 0usize;
    let mut batch = 0usize;

    db.begin_batch()?;
    for row in reader.records() {
        let row = row?;
        let record = build_record(&row, &header_index);
        if record.player_name.is_empty()
            || record.team_name.is_empty()
            || record.league_name.is_empty()
        {
            skipped += 1;
            continue;
        }

        let league_id = db.upsert_league(&mut caches, &record.league_name)?;
        let team_id = db.upsert_team(&mut caches, &record.team_name, league_id)?;
        let player_id = db.upsert_player(
            &mut caches,
            &record.player_name,
            &record.nationality,
            &clean_position(&record.position),
        )?;
        db.upsert_player_stats(player_id, team_id, league_id, season, &record)?;

        upserted += 1;
        batch += 1;
        if batch >= batch_size {
            db.commit_batch()?;
            db.begin_batch()?;
            batch = 0;
            if verbose {
                println!("Committed {upserted} rows so far...");
            }
        }
    }
    db.commit_batch()?;

    if skipped > 0 {
        println!("⚠ Skipped {skipped} rows without player/team/league names");
    }
    Ok(upserted)
}

/// Run the `load` command.
pub fn handle_load(
    csv: PathBuf,
    season: Season,
    batch_size: usize,
    db_path: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let db = resolve_db(db_path.as_deref())?;
    let upserted = load_csv(&db, &csv, &season, batch_size, verbose)?;
    println!("✓ Upserted {upserted} player-season rows for {season}");
    Ok(())
}
