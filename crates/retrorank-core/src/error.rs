use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Leaderboard year mismatch: expected {expected}, got {actual}")]
    YearMismatch { expected: u16, actual: u16 },

    #[error("Day {day} has {records} records but only {estimate} participants were counted")]
    ParticipantCount {
        day: u8,
        records: usize,
        estimate: usize,
    },

    #[error("More than one participant is named {name:?}: ids {ids:?}")]
    AmbiguousOwnParticipant { name: String, ids: Vec<u64> },

    #[error("Inconsistent ranking data: {0}")]
    Consistency(String),

    #[error("Invalid puzzle day: {0}")]
    InvalidDay(String),

    #[error("No leaderboard files given")]
    NoBoards,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
