//! Retroactively-comparable Advent of Code private leaderboard ranking.
//!
//! The official leaderboard times everyone from puzzle-day midnight. When
//! puzzles are solved after the fact the recorded times are meaningless,
//! so this crate rebuilds the ranking from the official export files plus
//! the user's self-reported start timestamps: leaderboard files are merged
//! into one validated record set, the user's own rows get their true start
//! and a synthetic rank that preserves everyone else's order, and points
//! are recomputed per day and in total. Honor system applies: the result
//! is only as honest as the self-reported timestamps.

pub mod board;
pub mod error;
pub mod rank;
pub mod report;
pub mod solutions;

pub use board::{load_board, DayLevel, Leaderboard, Member, StarEntry};
pub use error::{Error, Result};
pub use rank::{
    day_midnight, patch_own, score_days, DayBoard, DayRecord, DayRow, MergedBoard, ScoreReport,
    Star, StarResult, TotalRow, Totals,
};
pub use report::{
    display_name, render_day_board, render_full_report, render_own_report, render_totals,
    truncate_below_own, TextTable, DAY_TRAIL, TOTAL_TRAIL,
};
pub use solutions::{scan_solutions, StartEntry};
