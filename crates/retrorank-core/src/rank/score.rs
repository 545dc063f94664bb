use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::error::{Error, Result};

use super::merge::MergedBoard;
use super::record::Star;

/// One row of a per-day leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRow {
    pub id: u64,
    pub name: Option<String>,
    pub star1_minutes: Option<f64>,
    pub star2_minutes: Option<f64>,
    pub score: u64,
}

/// Leaderboard for a single day, rows by descending score.
#[derive(Debug, Clone)]
pub struct DayBoard {
    pub day: u8,
    pub rows: Vec<DayRow>,
}

/// One row of the totals leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalRow {
    pub id: u64,
    pub name: Option<String>,
    pub score: u64,
}

/// Cumulative scores across all days, keyed by `(id, name)`.
///
/// Built by `score_days` and returned to the caller; nothing is
/// accumulated in process-wide state.
#[derive(Debug, Clone, Default)]
pub struct Totals {
    scores: BTreeMap<(u64, Option<String>), u64>,
}

impl Totals {
    fn add(&mut self, id: u64, name: Option<&str>, points: u64) {
        *self
            .scores
            .entry((id, name.map(str::to_string)))
            .or_insert(0) += points;
    }

    pub fn get(&self, id: u64, name: Option<&str>) -> u64 {
        self.scores
            .get(&(id, name.map(str::to_string)))
            .copied()
            .unwrap_or(0)
    }

    /// Rows by descending score, ties by participant id.
    pub fn rows(&self) -> Vec<TotalRow> {
        let mut rows: Vec<TotalRow> = self
            .scores
            .iter()
            .map(|((id, name), &score)| TotalRow {
                id: *id,
                name: name.clone(),
                score,
            })
            .collect();
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        rows
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Everything the reports need: one board per populated day, ascending,
/// plus the cumulative totals.
#[derive(Debug, Clone)]
pub struct ScoreReport {
    pub days: Vec<DayBoard>,
    pub totals: Totals,
}

/// Score every populated day of the merged board.
///
/// Per day and per star, finishers ordered by rank get
/// `participant_estimate - position` points (0-based position, so first
/// place is worth the full participant count) and non-finishers get
/// nothing. The rank order is checked against the elapsed-time order on
/// the way through: a rank that contradicts the times means the merge
/// produced garbage and the run must not continue.
pub fn score_days(board: &MergedBoard) -> Result<ScoreReport> {
    let estimate = board.participant_estimate();
    let mut days = Vec::new();
    let mut totals = Totals::default();

    for day in board.days() {
        let records = board.day_records(day);
        if records.len() > estimate {
            return Err(Error::ParticipantCount {
                day,
                records: records.len(),
                estimate,
            });
        }

        let mut scores = vec![0u64; records.len()];
        for star in Star::iter() {
            // (record index, rank, elapsed seconds) for finishers only;
            // absent stars simply earn nothing.
            let mut finishers: Vec<(usize, f64, i64)> = records
                .iter()
                .enumerate()
                .filter_map(|(i, r)| r.star(star).map(|s| (i, s.rank, s.ts - r.start)))
                .collect();
            finishers.sort_by(|a, b| a.1.total_cmp(&b.1));

            for pair in finishers.windows(2) {
                let (_, _, earlier) = pair[0];
                let (_, _, later) = pair[1];
                if earlier > later {
                    return Err(Error::Consistency(format!(
                        "day {day} {star} star: rank order contradicts elapsed times: \
                         {:?} vs {:?}",
                        records[pair[0].0], records[pair[1].0]
                    )));
                }
            }

            for (position, &(i, _, _)) in finishers.iter().enumerate() {
                scores[i] += (estimate - position) as u64;
            }
        }

        let mut rows: Vec<DayRow> = records
            .iter()
            .zip(&scores)
            .map(|(r, &score)| DayRow {
                id: r.id,
                name: r.name.clone(),
                star1_minutes: r.elapsed_minutes(Star::First),
                star2_minutes: r.elapsed_minutes(Star::Second),
                score,
            })
            .collect();
        rows.sort_by(|a, b| b.score.cmp(&a.score));

        for row in &rows {
            totals.add(row.id, row.name.as_deref(), row.score);
        }
        days.push(DayBoard { day, rows });
    }

    Ok(ScoreReport { days, totals })
}
