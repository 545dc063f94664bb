//! Private-leaderboard export files.
//!
//! This module contains the typed schema for the Advent of Code private
//! leaderboard JSON export and the file loader:
//! - `Leaderboard`, `Member`, `DayLevel`, `StarEntry` - validated export tree
//! - `load_board` - read and parse one export file

mod loader;
mod schema;

pub use loader::*;
pub use schema::*;
