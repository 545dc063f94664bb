use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::debug;

use crate::board::Leaderboard;
use crate::error::{Error, Result};

use super::record::{day_midnight, DayRecord, StarResult};

/// All leaderboard data for one event year, merged and validated.
///
/// Records are keyed by `(day, participant id)`. Iteration order is
/// deterministic: days ascending, ids ascending within a day.
#[derive(Debug, Clone)]
pub struct MergedBoard {
    year: u16,
    records: BTreeMap<(u8, u64), DayRecord>,
    participant_estimate: usize,
}

impl MergedBoard {
    /// Merge one or more leaderboard exports for the same event year.
    ///
    /// With a single file the official per-star `star_index` is kept as the
    /// rank. With several files that index is file-local and not comparable,
    /// so the star's completion timestamp stands in as the ordering key
    /// instead. When the same participant/day appears in several files the
    /// last file wins.
    pub fn merge(boards: &[Leaderboard]) -> Result<Self> {
        let first = boards.first().ok_or(Error::NoBoards)?;
        let year = first.event;
        let multiboard = boards.len() > 1;

        let mut records = BTreeMap::new();
        let mut seen_ids: HashSet<u64> = HashSet::new();
        let mut last_member_count = 0;

        for board in boards {
            if board.event != year {
                return Err(Error::YearMismatch {
                    expected: year,
                    actual: board.event,
                });
            }
            for member in board.members.values() {
                seen_ids.insert(member.id);
                for (day_key, day_level) in &member.completion_day_level {
                    if day_level.star1.is_none() && day_level.star2.is_none() {
                        continue;
                    }
                    let day: u8 = day_key
                        .parse()
                        .map_err(|_| Error::InvalidDay(day_key.clone()))?;
                    let start = day_midnight(year, day)
                        .ok_or_else(|| Error::InvalidDay(day_key.clone()))?;

                    let rank_of = |entry: &crate::board::StarEntry| {
                        if multiboard {
                            entry.get_star_ts as f64
                        } else {
                            entry.star_index as f64
                        }
                    };
                    let record = DayRecord {
                        id: member.id,
                        name: member.name.clone(),
                        start,
                        star1: day_level.star1.as_ref().map(|e| StarResult {
                            ts: e.get_star_ts,
                            rank: rank_of(e),
                        }),
                        star2: day_level.star2.as_ref().map(|e| StarResult {
                            ts: e.get_star_ts,
                            rank: rank_of(e),
                        }),
                    };
                    validate_stars(day, &record, multiboard)?;
                    records.insert((day, member.id), record);
                }
            }
            last_member_count = board.members.len();
        }

        let participant_estimate = seen_ids.len().max(last_member_count);
        debug!(
            "Merged {} file(s) for {}: {} records, {} participants",
            boards.len(),
            year,
            records.len(),
            participant_estimate
        );

        Ok(Self {
            year,
            records,
            participant_estimate,
        })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// Upper bound on the number of participants; used as the point value
    /// of first place.
    pub fn participant_estimate(&self) -> usize {
        self.participant_estimate
    }

    pub fn get(&self, day: u8, id: u64) -> Option<&DayRecord> {
        self.records.get(&(day, id))
    }

    pub fn get_mut(&mut self, day: u8, id: u64) -> Option<&mut DayRecord> {
        self.records.get_mut(&(day, id))
    }

    /// Days with at least one record, ascending.
    pub fn days(&self) -> Vec<u8> {
        let mut days: Vec<u8> = self.records.keys().map(|&(day, _)| day).collect();
        days.dedup();
        days
    }

    /// All records for one day, ids ascending.
    pub fn day_records(&self, day: u8) -> Vec<&DayRecord> {
        self.records
            .range((day, u64::MIN)..=(day, u64::MAX))
            .map(|(_, record)| record)
            .collect()
    }

    /// Distinct participant ids whose display name matches exactly.
    pub fn ids_for_name(&self, name: &str) -> Vec<u64> {
        let ids: BTreeSet<u64> = self
            .records
            .values()
            .filter(|r| r.name.as_deref() == Some(name))
            .map(|r| r.id)
            .collect();
        ids.into_iter().collect()
    }

    /// The single participant id carrying this display name, for modes
    /// that cannot tolerate duplicates. `None` when the name never
    /// appears on the board.
    pub fn sole_id_for_name(&self, name: &str) -> Result<Option<u64>> {
        let ids = self.ids_for_name(name);
        match ids.as_slice() {
            [] => Ok(None),
            [id] => Ok(Some(*id)),
            _ => Err(Error::AmbiguousOwnParticipant {
                name: name.to_string(),
                ids,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn force_participant_estimate(&mut self, estimate: usize) {
        self.participant_estimate = estimate;
    }
}

/// Check the per-record star invariants: a second star implies a first
/// star earned no later, and official ranks for the two stars must be
/// strictly ordered. Rank ordering is not checked for timestamp proxies;
/// those are covered by the timestamp check itself.
fn validate_stars(day: u8, record: &DayRecord, multiboard: bool) -> Result<()> {
    let Some(star2) = &record.star2 else {
        return Ok(());
    };
    let Some(star1) = &record.star1 else {
        return Err(Error::Consistency(format!(
            "day {day} participant {}: second star without first: {star2:?}",
            record.id
        )));
    };
    if star1.ts > star2.ts {
        return Err(Error::Consistency(format!(
            "day {day} participant {}: star order contradiction: {star1:?} vs {star2:?}",
            record.id
        )));
    }
    if !multiboard && star1.rank >= star2.rank {
        return Err(Error::Consistency(format!(
            "day {day} participant {}: star ranks not strictly ordered: {star1:?} vs {star2:?}",
            record.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{DayLevel, Member, StarEntry};

    fn star(ts: i64, index: u64) -> Option<StarEntry> {
        Some(StarEntry {
            get_star_ts: ts,
            star_index: index,
        })
    }

    fn member(id: u64, name: &str, days: &[(&str, Option<StarEntry>, Option<StarEntry>)]) -> Member {
        Member {
            id,
            name: Some(name.to_string()),
            completion_day_level: days
                .iter()
                .map(|(day, star1, star2)| {
                    (
                        day.to_string(),
                        DayLevel {
                            star1: *star1,
                            star2: *star2,
                        },
                    )
                })
                .collect(),
        }
    }

    fn board(year: u16, members: Vec<Member>) -> Leaderboard {
        Leaderboard {
            event: year,
            members: members
                .into_iter()
                .map(|m| (m.id.to_string(), m))
                .collect(),
        }
    }

    // Midnight of 2022-12-05 EST.
    const DAY5: i64 = 1670216400;

    #[test]
    fn test_single_file_keeps_official_ranks() {
        let boards = [board(
            2022,
            vec![
                member(1, "A", &[("5", star(DAY5 + 60, 1), star(DAY5 + 120, 1))]),
                member(2, "B", &[("5", star(DAY5 + 90, 2), None)]),
            ],
        )];
        let merged = MergedBoard::merge(&boards).unwrap();

        let a = merged.get(5, 1).unwrap();
        assert_eq!(a.star1.unwrap().rank, 1.0);
        assert_eq!(a.star2.unwrap().rank, 1.0);
        assert_eq!(a.start, DAY5);
        let b = merged.get(5, 2).unwrap();
        assert_eq!(b.star1.unwrap().rank, 2.0);
        assert!(b.star2.is_none());
    }

    #[test]
    fn test_multiboard_substitutes_timestamp_ranks() {
        let file1 = board(2022, vec![member(1, "A", &[("5", star(DAY5 + 60, 1), None)])]);
        let file2 = board(2022, vec![member(2, "B", &[("5", star(DAY5 + 30, 1), None)])]);
        let merged = MergedBoard::merge(&[file1, file2]).unwrap();

        // Both were first on their own board; timestamps decide now.
        let a = merged.get(5, 1).unwrap().star1.unwrap();
        let b = merged.get(5, 2).unwrap().star1.unwrap();
        assert_eq!(a.rank, (DAY5 + 60) as f64);
        assert_eq!(b.rank, (DAY5 + 30) as f64);
        assert!(b.rank < a.rank);
    }

    #[test]
    fn test_year_mismatch_is_fatal() {
        let file1 = board(2022, vec![]);
        let file2 = board(2021, vec![]);
        let err = MergedBoard::merge(&[file1, file2]).unwrap_err();
        assert!(matches!(
            err,
            Error::YearMismatch {
                expected: 2022,
                actual: 2021
            }
        ));
    }

    #[test]
    fn test_no_boards_rejected() {
        assert!(matches!(MergedBoard::merge(&[]), Err(Error::NoBoards)));
    }

    #[test]
    fn test_participant_estimate_counts_starless_members() {
        let boards = [board(
            2022,
            vec![
                member(1, "A", &[("5", star(DAY5 + 60, 1), None)]),
                member(2, "B", &[]),
                member(3, "C", &[]),
            ],
        )];
        let merged = MergedBoard::merge(&boards).unwrap();
        assert_eq!(merged.participant_estimate(), 3);
        assert_eq!(merged.day_records(5).len(), 1);
    }

    #[test]
    fn test_second_star_without_first_rejected() {
        let boards = [board(
            2022,
            vec![member(1, "A", &[("5", None, star(DAY5 + 120, 1))])],
        )];
        assert!(matches!(
            MergedBoard::merge(&boards),
            Err(Error::Consistency(_))
        ));
    }

    #[test]
    fn test_star_timestamps_out_of_order_rejected() {
        let boards = [board(
            2022,
            vec![member(
                1,
                "A",
                &[("5", star(DAY5 + 500, 1), star(DAY5 + 100, 2))],
            )],
        )];
        assert!(matches!(
            MergedBoard::merge(&boards),
            Err(Error::Consistency(_))
        ));
    }

    #[test]
    fn test_star_ranks_not_strictly_ordered_rejected() {
        let boards = [board(
            2022,
            vec![member(
                1,
                "A",
                &[("5", star(DAY5 + 100, 3), star(DAY5 + 500, 3))],
            )],
        )];
        assert!(matches!(
            MergedBoard::merge(&boards),
            Err(Error::Consistency(_))
        ));
    }

    #[test]
    fn test_invalid_day_key_rejected() {
        let boards = [board(
            2022,
            vec![member(1, "A", &[("26", star(DAY5, 1), None)])],
        )];
        assert!(matches!(
            MergedBoard::merge(&boards),
            Err(Error::InvalidDay(_))
        ));
    }

    #[test]
    fn test_days_and_ids_for_name() {
        let boards = [board(
            2022,
            vec![
                member(1, "A", &[("5", star(DAY5 + 60, 1), None), ("7", star(DAY5, 1), None)]),
                member(2, "A", &[("5", star(DAY5 + 90, 2), None)]),
            ],
        )];
        let merged = MergedBoard::merge(&boards).unwrap();
        assert_eq!(merged.days(), vec![5, 7]);
        assert_eq!(merged.ids_for_name("A"), vec![1, 2]);
        assert!(merged.ids_for_name("nobody").is_empty());
    }

    #[test]
    fn test_sole_id_for_name() {
        let boards = [board(
            2022,
            vec![
                member(1, "A", &[("5", star(DAY5 + 60, 1), None)]),
                member(2, "A", &[("5", star(DAY5 + 90, 2), None)]),
                member(3, "B", &[("5", star(DAY5 + 120, 3), None)]),
            ],
        )];
        let merged = MergedBoard::merge(&boards).unwrap();
        assert_eq!(merged.sole_id_for_name("B").unwrap(), Some(3));
        assert_eq!(merged.sole_id_for_name("nobody").unwrap(), None);
        assert!(matches!(
            merged.sole_id_for_name("A"),
            Err(Error::AmbiguousOwnParticipant { .. })
        ));
    }
}
