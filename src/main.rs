//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use fbref_dash::{
    cli::{Commands, Dash},
    commands::{
        browse::handle_browse, compare::handle_compare, leaderboard::handle_leaderboard,
        list::handle_list, load::handle_load, overview::handle_overview, team::handle_team,
    },
    Result,
};

/// Run the CLI.
fn main() -> Result<()> {
    // A .env file may carry FBREF_DASH_DB; absence is fine.
    dotenvy::dotenv().ok();
    let app = Dash::parse();

    match app.command {
        Commands::Load {
            csv,
            season,
            batch_size,
            db,
            verbose,
        } => handle_load(csv, season, batch_size, db, verbose)?,

        Commands::Overview {
            filters,
            per90,
            json,
        } => handle_overview(filters.db.clone(), filters.to_stat_filters(), per90, json)?,

        Commands::Team {
            db,
            season,
            league,
            team,
            min_minutes,
            json,
        } => handle_team(db, season, league, team, min_minutes, json)?,

        Commands::Compare {
            filters,
            player_a,
            player_b,
            exclude_penalties,
            json,
        } => handle_compare(
            filters.db.clone(),
            filters.to_stat_filters(),
            player_a,
            player_b,
            exclude_penalties,
            json,
        )?,

        Commands::Leaderboard {
            filters,
            metric,
            top,
            per90,
            json,
        } => handle_leaderboard(
            filters.db.clone(),
            filters.to_stat_filters(),
            metric,
            top,
            per90,
            json,
        )?,

        Commands::Browse {
            filters,
            columns,
            per90,
            page,
            page_size,
            export,
            json,
        } => handle_browse(
            filters.db.clone(),
            filters.to_stat_filters(),
            columns,
            per90,
            page,
            page_size,
            export,
            json,
        )?,

        Commands::List {
            target,
            db,
            season,
            leagues,
        } => handle_list(db, target, season, leagues)?,
    }

    Ok(())
}
