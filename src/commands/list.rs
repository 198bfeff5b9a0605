//! Reference lists: seasons, leagues, teams, positions.

use std::path::PathBuf;

use crate::cli::args::ListTarget;
use crate::cli::types::Season;
use crate::Result;

use super::common::{print_no_data, resolve_db};

/// Run the `list` command.
pub fn handle_list(
    db_path: Option<PathBuf>,
    target: ListTarget,
    season: Season,
    leagues: Option<Vec<String>>,
) -> Result<()> {
    let db = resolve_db(db_path.as_deref())?;
    let values = match target {
        ListTarget::Seasons => db.get_seasons()?,
        ListTarget::Leagues => db.get_leagues(&season)?,
        ListTarget::Teams => db.get_teams(&season, leagues.as_deref())?,
        ListTarget::Positions => db.get_positions(&season)?,
    };
    if values.is_empty() {
        print_no_data();
        return Ok(());
    }
    for value in values {
        println!("{value}");
    }
    Ok(())
}
