use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// One private leaderboard export, as downloaded from the AoC API.
///
/// Only the fields the ranking needs are modeled; anything else in the
/// export is ignored. Missing numeric fields are a parse error, never
/// guessed at.
#[derive(Debug, Clone, Deserialize)]
pub struct Leaderboard {
    /// Event year. The API has emitted both `"2022"` and `2022` over time.
    #[serde(deserialize_with = "deserialize_event")]
    pub event: u16,
    /// Members keyed by their id rendered as a string.
    pub members: HashMap<String, Member>,
}

/// One participant in a leaderboard export.
#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub id: u64,
    /// Absent or null for members who hide their name.
    #[serde(default)]
    pub name: Option<String>,
    /// Day number (as a string key) to per-star completion data.
    #[serde(default)]
    pub completion_day_level: HashMap<String, DayLevel>,
}

/// Completion data for one member on one day.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayLevel {
    #[serde(rename = "1")]
    pub star1: Option<StarEntry>,
    #[serde(rename = "2")]
    pub star2: Option<StarEntry>,
}

/// Completion data for a single star.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StarEntry {
    /// Unix timestamp at which the star was earned.
    pub get_star_ts: i64,
    /// Official arrival order among this file's members, 1-based.
    pub star_index: u64,
}

fn deserialize_event<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Event {
        Number(u16),
        Text(String),
    }

    match Event::deserialize(deserializer)? {
        Event::Number(year) => Ok(year),
        Event::Text(text) => text.parse().map_err(serde::de::Error::custom),
    }
}
