//! FBRef Top-5 Leagues Dashboard CLI Library
//!
//! A Rust library for loading FBRef-style season player statistics into a
//! local SQLite database and serving the analytics views of the dashboard
//! from the command line: league overviews, team summaries, player
//! comparisons, leaderboards, and a raw data browser.
//!
//! ## Features
//!
//! - **CSV Ingest**: Batch upsert of a season export into a relational schema
//! - **Enrichment Pipeline**: Per-90 rates and composite metrics derived from
//!   raw counting stats with a uniform division-by-zero policy
//! - **Aggregation**: League and team rollups that sum raw totals and
//!   re-derive rates (never averaging per-90 values across players)
//! - **Query Caching**: Time-bounded in-memory caching of database queries
//! - **Flexible Output**: Human-readable tables or JSON from every view
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fbref_dash::{
//!     pipeline::{aggregate_by_league, enrich_players},
//!     storage::StatsDatabase,
//!     Season, StatFilters,
//! };
//!
//! # fn example() -> fbref_dash::Result<()> {
//! let db = StatsDatabase::open_default()?;
//! let filters = StatFilters::new(Season::default(), 450);
//! let raw = db.fetch_player_stats(&filters)?;
//! let enriched = enrich_players(&raw);
//! let leagues = aggregate_by_league(&enriched);
//! println!("{} leagues", leagues.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Set the database location once to avoid passing `--db` to every command
//! (a `.env` file in the working directory is honored):
//! ```bash
//! export FBREF_DASH_DB=/path/to/stats.db
//! ```

pub mod cache;
pub mod cli;
pub mod commands;
pub mod error;
pub mod pipeline;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{Season, StatFilters};
pub use error::{DashError, Result};
pub use pipeline::table::StatTable;

pub const DB_PATH_ENV_VAR: &str = "FBREF_DASH_DB";

/// Default minimum-minutes threshold applied by the dashboard views.
pub const DEFAULT_MIN_MINUTES: u32 = 450;
