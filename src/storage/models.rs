//! Data models for the storage layer

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A competition (league) row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    pub league_id: i64,
    pub league_name: String,
}

/// A team within a league.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub team_id: i64,
    pub team_name: String,
    pub league_id: i64,
}

/// Player identity, keyed by (name, nationality).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub player_id: i64,
    pub player_name: String,
    pub nationality: String,
    pub primary_position: Option<String>,
}

/// One parsed CSV row, ready to upsert.
///
/// Stat values are keyed by catalog column name; a column missing from the
/// maps upserts as zero, matching the ingest zero-fill rule.
#[derive(Debug, Clone, Default)]
pub struct StatRecord {
    pub player_name: String,
    pub nationality: String,
    pub team_name: String,
    pub league_name: String,
    pub position: String,
    pub counts: BTreeMap<&'static str, i64>,
    pub rates: BTreeMap<&'static str, f64>,
}

impl StatRecord {
    pub fn count(&self, col: &str) -> i64 {
        self.counts.get(col).copied().unwrap_or(0)
    }

    pub fn rate(&self, col: &str) -> f64 {
        self.rates.get(col).copied().unwrap_or(0.0)
    }
}
