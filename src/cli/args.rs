//! CLI argument definitions and parsing structures.

use super::types::{season::Season, StatFilters};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Common filtering arguments shared between the dashboard views
#[derive(Debug, Args)]
pub struct CommonFilters {
    /// Database file (or set `FBREF_DASH_DB` env var).
    #[clap(long)]
    pub db: Option<PathBuf>,

    /// Season label (e.g. 2024-2025).
    #[clap(long, short, default_value_t = Season::default())]
    pub season: Season,

    /// Exclude players below this many minutes played.
    #[clap(long, default_value_t = crate::DEFAULT_MIN_MINUTES)]
    pub min_minutes: u32,

    /// Filter by league name (repeatable): `-l "Premier League" -l "La Liga"`.
    #[clap(long = "league", short = 'l')]
    pub leagues: Option<Vec<String>>,

    /// Filter by team name (repeatable): `-t Arsenal -t Chelsea`.
    #[clap(long = "team", short = 't')]
    pub teams: Option<Vec<String>>,

    /// Filter by position (repeatable): `-p DF -p MF`.
    #[clap(long = "position", short = 'p')]
    pub positions: Option<Vec<String>>,
}

impl CommonFilters {
    /// Build the query filter set this view will fetch with.
    pub fn to_stat_filters(&self) -> StatFilters {
        StatFilters {
            season: self.season.clone(),
            min_minutes: self.min_minutes,
            leagues: self.leagues.clone().filter(|v| !v.is_empty()),
            teams: self.teams.clone().filter(|v| !v.is_empty()),
            positions: self.positions.clone().filter(|v| !v.is_empty()),
        }
    }
}

#[derive(Debug, Parser)]
#[clap(name = "fbref-dash", about = "FBRef top-5 leagues dashboard CLI")]
pub struct Dash {
    #[clap(subcommand)]
    pub command: Commands,
}

/// Reference lists the `list` command can print.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListTarget {
    Seasons,
    Leagues,
    Teams,
    Positions,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a season CSV export into the database.
    ///
    /// Upserts leagues, teams, players, and per-season stat rows; re-running
    /// with the same file overwrites stats in place.
    Load {
        /// Path to the CSV export.
        #[clap(long)]
        csv: PathBuf,

        /// Season label to store on every row.
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Commit interval in rows.
        #[clap(long, default_value_t = 500)]
        batch_size: usize,

        /// Database file (or set `FBREF_DASH_DB` env var).
        #[clap(long)]
        db: Option<PathBuf>,

        /// Print per-batch progress.
        #[clap(long)]
        verbose: bool,
    },

    /// League overview: KPI averages and the league summary table.
    Overview {
        #[clap(flatten)]
        filters: CommonFilters,

        /// Show per-90 rate columns instead of raw totals.
        #[clap(long)]
        per90: bool,

        /// Output results as JSON instead of text tables.
        #[clap(long)]
        json: bool,
    },

    /// One team: totals, top contributors, team-vs-league deltas, squad table.
    Team {
        /// Database file (or set `FBREF_DASH_DB` env var).
        #[clap(long)]
        db: Option<PathBuf>,

        /// Season label (e.g. 2024-2025).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// League the team plays in.
        #[clap(long, short)]
        league: String,

        /// Team name.
        #[clap(long, short)]
        team: String,

        /// Exclude players below this many minutes played.
        #[clap(long, default_value_t = crate::DEFAULT_MIN_MINUTES)]
        min_minutes: u32,

        /// Output results as JSON instead of text tables.
        #[clap(long)]
        json: bool,
    },

    /// Compare two players over the per-90 metric set.
    Compare {
        #[clap(flatten)]
        filters: CommonFilters,

        /// First player name (exact match).
        #[clap(long)]
        player_a: String,

        /// Second player name (exact match).
        #[clap(long)]
        player_b: String,

        /// Use non-penalty goals in the goal metrics.
        #[clap(long)]
        exclude_penalties: bool,

        /// Output results as JSON instead of text tables.
        #[clap(long)]
        json: bool,
    },

    /// Top players per metric.
    Leaderboard {
        #[clap(flatten)]
        filters: CommonFilters,

        /// Single metric to rank by; omit for the standard boards.
        #[clap(long, short)]
        metric: Option<String>,

        /// Number of rows per board.
        #[clap(long, default_value_t = 10)]
        top: usize,

        /// Rank by the per-90 rate where one exists.
        #[clap(long)]
        per90: bool,

        /// Output results as JSON instead of text tables.
        #[clap(long)]
        json: bool,
    },

    /// Browse the enriched player table with paging and column selection.
    Browse {
        #[clap(flatten)]
        filters: CommonFilters,

        /// Columns to show (repeatable); omit for the standard set.
        #[clap(long = "column", short = 'c')]
        columns: Option<Vec<String>>,

        /// Include per-90 columns in the standard set.
        #[clap(long)]
        per90: bool,

        /// Page number, starting at 1.
        #[clap(long, default_value_t = 1)]
        page: usize,

        /// Rows per page.
        #[clap(long, default_value_t = 50)]
        page_size: usize,

        /// Write the current page to a CSV file.
        #[clap(long)]
        export: Option<PathBuf>,

        /// Output results as JSON instead of text tables.
        #[clap(long)]
        json: bool,
    },

    /// Print reference lists: seasons, leagues, teams, or positions.
    List {
        /// What to list.
        #[clap(value_enum)]
        target: ListTarget,

        /// Database file (or set `FBREF_DASH_DB` env var).
        #[clap(long)]
        db: Option<PathBuf>,

        /// Season label (e.g. 2024-2025).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Restrict teams to these leagues (repeatable).
        #[clap(long = "league", short = 'l')]
        leagues: Option<Vec<String>>,
    },
}
