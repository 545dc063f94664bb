//! Ranking reconstruction.
//!
//! This module contains the core pipeline:
//! - `record` - per-(day, participant) completion records
//! - `merge` - combine leaderboard files into one validated record set
//! - `patch` - substitute the user's true start times and synthetic ranks
//! - `score` - descending-rank points per day and cumulative totals

mod merge;
mod patch;
mod record;
mod score;

pub use merge::*;
pub use patch::*;
pub use record::*;
pub use score::*;
