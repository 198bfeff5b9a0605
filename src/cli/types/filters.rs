//! Request-scoped query filters.

use super::season::Season;
use serde::{Deserialize, Serialize};

/// Filters applied server-side when fetching player-season rows.
///
/// One value describes one query, and the struct doubles as the cache key
/// for the query-result cache, so everything here is `Hash + Eq`. `None`
/// for a set filter means "no restriction".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatFilters {
    pub season: Season,
    pub min_minutes: u32,
    pub leagues: Option<Vec<String>>,
    pub teams: Option<Vec<String>>,
    pub positions: Option<Vec<String>>,
}

impl StatFilters {
    pub fn new(season: Season, min_minutes: u32) -> Self {
        Self {
            season,
            min_minutes,
            leagues: None,
            teams: None,
            positions: None,
        }
    }

    pub fn with_leagues(mut self, leagues: Vec<String>) -> Self {
        self.leagues = (!leagues.is_empty()).then_some(leagues);
        self
    }

    pub fn with_teams(mut self, teams: Vec<String>) -> Self {
        self.teams = (!teams.is_empty()).then_some(teams);
        self
    }

    pub fn with_positions(mut self, positions: Vec<String>) -> Self {
        self.positions = (!positions.is_empty()).then_some(positions);
        self
    }
}
