use chrono::{FixedOffset, NaiveDate};
use strum::{Display, EnumIter};

/// First and last valid puzzle day of an event.
pub const FIRST_DAY: u8 = 1;
pub const LAST_DAY: u8 = 25;

/// One of the two completion milestones per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Star {
    #[strum(serialize = "first")]
    First,
    #[strum(serialize = "second")]
    Second,
}

/// Completion data for a single star.
///
/// `rank` is an ordering key, not a display value: the official 1-based
/// `star_index` for a single board, the completion timestamp when several
/// boards are merged, or a synthetic fraction once the user's own record
/// has been patched. Smaller is earlier. A missing `StarResult` is the
/// "not finished" case; there is no sentinel rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarResult {
    /// Unix timestamp at which the star was earned.
    pub ts: i64,
    pub rank: f64,
}

/// One participant's record for one puzzle day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub id: u64,
    pub name: Option<String>,
    /// Unix timestamp the participant is timed from. Defaults to the
    /// puzzle day's midnight; overwritten with the self-reported start
    /// for the user's own rows.
    pub start: i64,
    pub star1: Option<StarResult>,
    pub star2: Option<StarResult>,
}

impl DayRecord {
    pub fn star(&self, star: Star) -> Option<&StarResult> {
        match star {
            Star::First => self.star1.as_ref(),
            Star::Second => self.star2.as_ref(),
        }
    }

    pub fn star_mut(&mut self, star: Star) -> Option<&mut StarResult> {
        match star {
            Star::First => self.star1.as_mut(),
            Star::Second => self.star2.as_mut(),
        }
    }

    /// Minutes from this record's start to the star's completion.
    /// Negative when the star was earned before the recorded start.
    pub fn elapsed_minutes(&self, star: Star) -> Option<f64> {
        self.star(star).map(|s| (s.ts - self.start) as f64 / 60.0)
    }
}

/// Unix timestamp of the given puzzle day's midnight.
///
/// Puzzles unlock at midnight US Eastern; December is always EST (UTC-5),
/// so a fixed offset is exact. `None` for a day outside the event.
pub fn day_midnight(year: u16, day: u8) -> Option<i64> {
    if !(FIRST_DAY..=LAST_DAY).contains(&day) {
        return None;
    }
    let est = FixedOffset::west_opt(5 * 3600)?;
    let midnight = NaiveDate::from_ymd_opt(i32::from(year), 12, u32::from(day))?
        .and_hms_opt(0, 0, 0)?;
    Some(midnight.and_local_timezone(est).single()?.timestamp())
}
