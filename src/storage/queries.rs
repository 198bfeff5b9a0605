//! Upserts, filtered fetches, and reference-list queries

use super::{models::StatRecord, schema::StatsDatabase};
use crate::cache::GLOBAL_CACHE;
use crate::cli::types::{Season, StatFilters};
use crate::pipeline::columns::{self, is_float_col};
use crate::pipeline::table::{Cell, StatTable};
use anyhow::Result;
use rusqlite::params;
use rusqlite::types::ValueRef;
use rusqlite::OptionalExtension;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Identity-id lookup caches for a load run.
///
/// Loaded once from the existing tables, then kept current by the upserts so
/// repeat identities never round-trip to the database.
#[derive(Debug, Default)]
pub struct IdCaches {
    pub leagues: HashMap<String, i64>,
    pub teams: HashMap<(String, i64), i64>,
    pub players: HashMap<(String, String), i64>,
}

impl StatsDatabase {
    /// Populate [`IdCaches`] from the identity tables.
    pub fn load_id_caches(&self) -> Result<IdCaches> {
        let mut caches = IdCaches::default();

        let mut stmt = self
            .conn
            .prepare("SELECT league_id, league_name FROM leagues")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
        for row in rows {
            let (id, name) = row?;
            caches.leagues.insert(name, id);
        }

        let mut stmt = self
            .conn
            .prepare("SELECT team_id, team_name, league_id FROM teams")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;
        for row in rows {
            let (id, name, league_id) = row?;
            caches.teams.insert((name, league_id), id);
        }

        let mut stmt = self
            .conn
            .prepare("SELECT player_id, player_name, nationality FROM players")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        for row in rows {
            let (id, name, nationality) = row?;
            caches.players.insert((name, nationality), id);
        }

        Ok(caches)
    }

    /// Insert or look up a league id by name.
    pub fn upsert_league(&self, caches: &mut IdCaches, league_name: &str) -> Result<i64> {
        let league_name = league_name.trim();
        if let Some(&id) = caches.leagues.get(league_name) {
            return Ok(id);
        }
        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT league_id FROM leagues WHERE league_name = ?",
                params![league_name],
                |row| row.get(0),
            )
            .optional()?;
        let id = match existing {
            Some(id) => id,
            None => {
                self.conn.execute(
                    "INSERT INTO leagues (league_name) VALUES (?)",
                    params![league_name],
                )?;
                self.conn.last_insert_rowid()
            }
        };
        caches.leagues.insert(league_name.to_string(), id);
        Ok(id)
    }

    /// Insert or look up a team id by (name, league).
    pub fn upsert_team(&self, caches: &mut IdCaches, team_name: &str, league_id: i64) -> Result<i64> {
        let team_name = team_name.trim();
        let key = (team_name.to_string(), league_id);
        if let Some(&id) = caches.teams.get(&key) {
            return Ok(id);
        }
        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT team_id FROM teams WHERE team_name = ? AND league_id = ?",
                params![team_name, league_id],
                |row| row.get(0),
            )
            .optional()?;
        let id = match existing {
            Some(id) => id,
            None => {
                self.conn.execute(
                    "INSERT INTO teams (team_name, league_id) VALUES (?, ?)",
                    params![team_name, league_id],
                )?;
                self.conn.last_insert_rowid()
            }
        };
        caches.teams.insert(key, id);
        Ok(id)
    }

    /// Insert or look up a player id by (name, nationality).
    ///
    /// An existing player gets their primary position refreshed.
    pub fn upsert_player(
        &self,
        caches: &mut IdCaches,
        player_name: &str,
        nationality: &str,
        primary_position: &str,
    ) -> Result<i64> {
        let key = (player_name.to_string(), nationality.to_string());
        if let Some(&id) = caches.players.get(&key) {
            return Ok(id);
        }
        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT player_id FROM players WHERE player_name = ? AND nationality = ?",
                params![player_name, nationality],
                |row| row.get(0),
            )
            .optional()?;
        let id = match existing {
            Some(id) => {
                self.conn.execute(
                    "UPDATE players SET primary_position = ? WHERE player_id = ?",
                    params![primary_position, id],
                )?;
                id
            }
            None => {
                self.conn.execute(
                    "INSERT INTO players (player_name, nationality, primary_position)
                     VALUES (?, ?, ?)",
                    params![player_name, nationality, primary_position],
                )?;
                self.conn.last_insert_rowid()
            }
        };
        caches.players.insert(key, id);
        Ok(id)
    }

    /// Upsert one stat row keyed by (player, team, season).
    ///
    /// A conflict overwrites every non-key stat column and bumps
    /// `updated_at`.
    pub fn upsert_player_stats(
        &self,
        player_id: i64,
        team_id: i64,
        league_id: i64,
        season: &Season,
        record: &StatRecord,
    ) -> Result<()> {
        let stat_cols = columns::numeric_columns();
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        let mut sql = String::from(
            "INSERT INTO player_stats (player_id, team_id, league_id, season, position",
        );
        for col in &stat_cols {
            sql.push_str(", ");
            sql.push_str(col);
        }
        sql.push_str(", updated_at) VALUES (?, ?, ?, ?, ?");
        for _ in &stat_cols {
            sql.push_str(", ?");
        }
        sql.push_str(", ?) ON CONFLICT (player_id, team_id, season) DO UPDATE SET ");
        sql.push_str("league_id = excluded.league_id, position = excluded.position");
        for col in &stat_cols {
            sql.push_str(&format!(", {col} = excluded.{col}"));
        }
        sql.push_str(", updated_at = excluded.updated_at");

        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(player_id),
            Box::new(team_id),
            Box::new(league_id),
            Box::new(season.as_str().to_string()),
            Box::new(record.position.clone()),
        ];
        for col in &stat_cols {
            if is_float_col(col) {
                params.push(Box::new(record.rate(col)));
            } else {
                params.push(Box::new(record.count(col)));
            }
        }
        params.push(Box::new(now as i64));

        let mut stmt = self.conn.prepare_cached(&sql)?;
        stmt.execute(rusqlite::params_from_iter(
            params.iter().map(|p| p.as_ref()),
        ))?;
        Ok(())
    }

    /// Fetch the joined player-season table for a filter set.
    ///
    /// Filtering happens server-side: season and minimum minutes always,
    /// league/team/position sets when present. Results are read through the
    /// global query cache keyed by the filter struct.
    pub fn fetch_player_stats(&self, filters: &StatFilters) -> Result<StatTable> {
        if self.cache_enabled {
            if let Some(cached) = GLOBAL_CACHE.player_stats.get(filters) {
                return Ok(cached);
            }
        }

        let stat_cols = columns::numeric_columns();
        let mut sql = String::from(
            "SELECT ps.season, l.league_name, t.team_name, p.player_name,
                    p.nationality, ps.position",
        );
        for col in &stat_cols {
            sql.push_str(", ps.");
            sql.push_str(col);
        }
        sql.push_str(
            " FROM player_stats ps
              JOIN players p ON ps.player_id = p.player_id
              JOIN teams t ON ps.team_id = t.team_id
              JOIN leagues l ON ps.league_id = l.league_id
              WHERE ps.season = ? AND ps.minutes >= ?",
        );

        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(filters.season.as_str().to_string()),
            Box::new(filters.min_minutes),
        ];
        push_name_filter(&mut sql, &mut params, "l.league_name", filters.leagues.as_ref());
        push_name_filter(&mut sql, &mut params, "t.team_name", filters.teams.as_ref());
        push_name_filter(&mut sql, &mut params, "ps.position", filters.positions.as_ref());
        sql.push_str(" ORDER BY p.player_name");

        let identity_count = columns::IDENTITY_COLS.len();
        let mut labels: Vec<Vec<String>> = vec![Vec::new(); identity_count];
        let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); stat_cols.len()];

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(
            params.iter().map(|p| p.as_ref()),
        ))?;
        while let Some(row) = rows.next()? {
            for (i, out) in labels.iter_mut().enumerate() {
                out.push(row.get::<_, String>(i)?);
            }
            for (i, out) in cells.iter_mut().enumerate() {
                out.push(read_cell(row.get_ref(identity_count + i)?));
            }
        }

        let mut table = StatTable::new();
        for (i, name) in columns::IDENTITY_COLS.iter().enumerate() {
            table = table.with_labels(name, std::mem::take(&mut labels[i]));
        }
        for (i, name) in stat_cols.iter().enumerate() {
            table = table.with_cells(name, std::mem::take(&mut cells[i]));
        }

        if self.cache_enabled {
            GLOBAL_CACHE.player_stats.put(filters.clone(), table.clone());
        }
        Ok(table)
    }

    /// Distinct season labels, newest first.
    pub fn get_seasons(&self) -> Result<Vec<String>> {
        if self.cache_enabled {
            if let Some(cached) = GLOBAL_CACHE.seasons.get(&()) {
                return Ok(cached);
            }
        }
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT season FROM player_stats ORDER BY season DESC")?;
        let seasons = collect_strings(&mut stmt, params![])?;
        if self.cache_enabled {
            GLOBAL_CACHE.seasons.put((), seasons.clone());
        }
        Ok(seasons)
    }

    /// League names with stats in a season.
    pub fn get_leagues(&self, season: &Season) -> Result<Vec<String>> {
        if self.cache_enabled {
            if let Some(cached) = GLOBAL_CACHE.leagues.get(season) {
                return Ok(cached);
            }
        }
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT l.league_name FROM player_stats ps
             JOIN leagues l ON ps.league_id = l.league_id
             WHERE ps.season = ? ORDER BY l.league_name",
        )?;
        let leagues = collect_strings(&mut stmt, params![season.as_str()])?;
        if self.cache_enabled {
            GLOBAL_CACHE.leagues.put(season.clone(), leagues.clone());
        }
        Ok(leagues)
    }

    /// Team names with stats in a season, optionally restricted to leagues.
    pub fn get_teams(&self, season: &Season, leagues: Option<&[String]>) -> Result<Vec<String>> {
        let key = (season.clone(), leagues.map(<[String]>::to_vec));
        if self.cache_enabled {
            if let Some(cached) = GLOBAL_CACHE.teams.get(&key) {
                return Ok(cached);
            }
        }
        let mut sql = String::from(
            "SELECT DISTINCT t.team_name FROM player_stats ps
             JOIN teams t ON ps.team_id = t.team_id
             JOIN leagues l ON ps.league_id = l.league_id
             WHERE ps.season = ?",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> =
            vec![Box::new(season.as_str().to_string())];
        push_name_filter(&mut sql, &mut params, "l.league_name", key.1.as_ref());
        sql.push_str(" ORDER BY t.team_name");

        let mut stmt = self.conn.prepare(&sql)?;
        let teams = collect_strings(
            &mut stmt,
            rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
        )?;
        if self.cache_enabled {
            GLOBAL_CACHE.teams.put(key, teams.clone());
        }
        Ok(teams)
    }

    /// Position labels present in a season.
    pub fn get_positions(&self, season: &Season) -> Result<Vec<String>> {
        if self.cache_enabled {
            if let Some(cached) = GLOBAL_CACHE.positions.get(season) {
                return Ok(cached);
            }
        }
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT position FROM player_stats
             WHERE position <> '' AND season = ? ORDER BY position",
        )?;
        let positions = collect_strings(&mut stmt, params![season.as_str()])?;
        if self.cache_enabled {
            GLOBAL_CACHE.positions.put(season.clone(), positions.clone());
        }
        Ok(positions)
    }
}

/// Append `AND <column> IN (?, ...)` for a value set, if one is present.
fn push_name_filter(
    sql: &mut String,
    params: &mut Vec<Box<dyn rusqlite::ToSql>>,
    column: &str,
    values: Option<&Vec<String>>,
) {
    let Some(values) = values else { return };
    if values.is_empty() {
        return;
    }
    sql.push_str(&format!(" AND {column} IN ("));
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push('?');
        params.push(Box::new(value.clone()));
    }
    sql.push(')');
}

/// Convert one SQLite value into a pipeline cell.
///
/// The normalization step downstream owns the zero-fill of text and nulls;
/// the storage layer only preserves what the database returned.
fn read_cell(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null => Cell::Null,
        ValueRef::Integer(i) => Cell::Num(i as f64),
        ValueRef::Real(f) => Cell::Num(f),
        ValueRef::Text(t) => Cell::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(_) => Cell::Null,
    }
}

fn collect_strings<P: rusqlite::Params>(
    stmt: &mut rusqlite::Statement<'_>,
    params: P,
) -> Result<Vec<String>> {
    let rows = stmt.query_map(params, |row| row.get::<_, String>(0))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
