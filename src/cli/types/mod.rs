//! Shared types for CLI commands.

pub mod filters;
pub mod season;

pub use filters::StatFilters;
pub use season::Season;
