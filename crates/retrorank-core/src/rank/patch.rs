use strum::IntoEnumIterator;
use tracing::debug;

use crate::error::{Error, Result};
use crate::solutions::StartEntry;

use super::merge::MergedBoard;
use super::record::Star;

/// Patch the user's own records with their true start times.
///
/// The official leaderboard times everyone from midnight, so fixing the
/// start alone is not enough: points are awarded by rank, and the user's
/// position in the discrete arrival order has to move to where the true
/// elapsed time puts it. For each patched day and star the day's finishers
/// are re-ordered by elapsed time and the user receives a synthetic rank
/// that slots strictly between its new neighbors, leaving every other
/// participant's order untouched. The synthetic value may be fractional;
/// it exists purely as a sort key.
///
/// The pass is idempotent: when the user's rank already sits correctly
/// between its neighbors nothing is written, so re-running with the same
/// start entries changes nothing.
pub fn patch_own(board: &mut MergedBoard, own_ids: &[u64], starts: &[StartEntry]) -> Result<()> {
    let year = board.year();
    for entry in starts.iter().filter(|e| e.year == year) {
        for &own_id in own_ids {
            if board.get(entry.day, own_id).is_none() {
                continue;
            }
            patch_day(board, own_id, entry.day, entry.start_ts)?;
        }
    }
    Ok(())
}

fn patch_day(board: &mut MergedBoard, own_id: u64, day: u8, start_ts: i64) -> Result<()> {
    if let Some(record) = board.get_mut(day, own_id) {
        record.start = start_ts;
    }
    for star in Star::iter() {
        // Finishers ordered by elapsed time. Everyone else is timed from
        // midnight, so for them this is exactly the official arrival
        // order; only the user's position can move.
        let mut finishers: Vec<(u64, f64, i64)> = board
            .day_records(day)
            .iter()
            .filter_map(|r| r.star(star).map(|s| (r.id, s.rank, s.ts - r.start)))
            .collect();
        finishers.sort_by(|a, b| a.2.cmp(&b.2));

        let Some(pos) = finishers.iter().position(|&(id, _, _)| id == own_id) else {
            continue;
        };
        let current = finishers[pos].1;
        let left = pos.checked_sub(1).map(|i| finishers[i]);
        let right = finishers.get(pos + 1).copied();

        let synthetic = match (left, right) {
            (None, None) => None,
            (None, Some(next)) => (current >= next.1).then_some(next.1 - 1.0),
            (Some(prev), None) => (current <= prev.1).then_some(prev.1 + 1.0),
            (Some(prev), Some(next)) => {
                if prev.1 < current && current < next.1 {
                    None
                } else if prev.1 < next.1 {
                    Some((prev.1 + next.1) / 2.0)
                } else {
                    return Err(Error::Consistency(format!(
                        "day {day} {star} star: neighbor ranks around participant {own_id} \
                         not strictly ordered: {prev:?} vs {next:?}"
                    )));
                }
            }
        };

        if let Some(rank) = synthetic {
            debug!(
                "day {} {} star: participant {} rank {} -> {}",
                day, star, own_id, current, rank
            );
            if let Some(result) = board
                .get_mut(day, own_id)
                .and_then(|r| r.star_mut(star))
            {
                result.rank = rank;
            }
        }
    }
    Ok(())
}
