use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

use super::Leaderboard;

/// Read and parse one leaderboard export file.
///
/// Any read or parse failure is fatal to the run; there is no partial
/// recovery from a malformed export.
pub fn load_board<P: AsRef<Path>>(path: P) -> Result<Leaderboard> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let board: Leaderboard = serde_json::from_str(&content)?;
    debug!(
        "Loaded leaderboard {:?}: event {}, {} members",
        path,
        board.event,
        board.members.len()
    );
    Ok(board)
}
