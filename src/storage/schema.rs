//! Database schema and connection management

use crate::error::DashError;
use crate::pipeline::columns::{COUNT_COLS, FLOAT_COLS};
use anyhow::Result;
use dirs::data_dir;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Database connection manager for player-season stats.
///
/// `cache_enabled` gates the global query cache; the in-memory constructor
/// used by tests turns it off so fixtures never see each other's results.
pub struct StatsDatabase {
    pub(crate) conn: Connection,
    pub(crate) cache_enabled: bool,
}

impl StatsDatabase {
    /// Open (or create) the database at the resolved location.
    ///
    /// Resolution order: explicit `path`, then the `FBREF_DASH_DB`
    /// environment variable, then the platform data directory.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let db_path = Self::database_path(path)?;

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        let mut db = Self {
            conn,
            cache_enabled: true,
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Open the database at the default resolved location.
    pub fn open_default() -> Result<Self> {
        Self::open(None)
    }

    /// In-memory database for tests; the query cache is disabled.
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self {
            conn,
            cache_enabled: false,
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Resolve the database file location.
    fn database_path(path: Option<&Path>) -> Result<PathBuf> {
        if let Some(p) = path {
            return Ok(p.to_path_buf());
        }
        if let Ok(env_path) = std::env::var(crate::DB_PATH_ENV_VAR) {
            if !env_path.is_empty() {
                return Ok(PathBuf::from(env_path));
            }
        }
        let base = data_dir().ok_or_else(|| DashError::MissingConfig {
            keys: format!("--db flag or {} environment variable", crate::DB_PATH_ENV_VAR),
        })?;
        Ok(base.join("fbref-dash").join("stats.db"))
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS leagues (
                league_id INTEGER PRIMARY KEY,
                league_name TEXT NOT NULL UNIQUE
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS teams (
                team_id INTEGER PRIMARY KEY,
                team_name TEXT NOT NULL,
                league_id INTEGER NOT NULL REFERENCES leagues(league_id),
                UNIQUE (team_name, league_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY,
                player_name TEXT NOT NULL,
                nationality TEXT NOT NULL DEFAULT '',
                primary_position TEXT,
                UNIQUE (player_name, nationality)
            )",
            [],
        )?;

        // The stat table's numeric columns come from the shared catalog so
        // ingest, storage, and enrichment stay in step.
        let mut stat_cols = String::new();
        for col in COUNT_COLS {
            stat_cols.push_str(&format!("{} INTEGER NOT NULL DEFAULT 0,\n", col));
        }
        for col in FLOAT_COLS {
            stat_cols.push_str(&format!("{} REAL NOT NULL DEFAULT 0,\n", col));
        }
        self.conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS player_stats (
                    stat_id INTEGER PRIMARY KEY,
                    player_id INTEGER NOT NULL REFERENCES players(player_id),
                    team_id INTEGER NOT NULL REFERENCES teams(team_id),
                    league_id INTEGER NOT NULL REFERENCES leagues(league_id),
                    season TEXT NOT NULL,
                    position TEXT NOT NULL DEFAULT '',
                    {}
                    updated_at INTEGER NOT NULL,
                    UNIQUE (player_id, team_id, season)
                )",
                stat_cols
            ),
            [],
        )?;

        // Indexes for the dashboard's filter columns
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_stats_season_minutes
             ON player_stats(season, minutes)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_stats_league
             ON player_stats(league_id)",
            [],
        )?;

        Ok(())
    }

    /// Start a batch; pairs with [`StatsDatabase::commit_batch`].
    pub(crate) fn begin_batch(&self) -> Result<()> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    pub(crate) fn commit_batch(&self) -> Result<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }
}
