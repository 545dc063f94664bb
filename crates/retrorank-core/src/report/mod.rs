//! Human-readable ranking reports.
//!
//! Per-day and totals tables in the style of the official site, truncated
//! a fixed number of rows below the user's own position so a big board
//! stays readable. Also the "own-only" report: just the user's elapsed
//! times, once by day and once by descending second-star time.

mod table;

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::rank::{DayBoard, ScoreReport, Totals};

pub use table::TextTable;

/// Rows kept after the user's own row in a per-day table.
pub const DAY_TRAIL: usize = 5;
/// Rows kept after the user's own row in the totals table.
pub const TOTAL_TRAIL: usize = 19;

/// Truncate a sorted report to end `trail` rows after the first row the
/// user owns. A list without the user is left whole.
pub fn truncate_below_own<T>(rows: &[T], trail: usize, is_own: impl Fn(&T) -> bool) -> &[T] {
    match rows.iter().position(is_own) {
        Some(pos) => &rows[..rows.len().min(pos + trail + 1)],
        None => rows,
    }
}

/// Plain-text-safe display name. Non-ASCII is stripped the way the
/// official site's text export behaves; a member with no usable name
/// shows up as the site's anonymous placeholder.
pub fn display_name(name: Option<&str>, id: u64) -> String {
    let ascii: String = name
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii)
        .collect();
    if ascii.trim().is_empty() {
        format!("(anonymous user #{id})")
    } else {
        ascii
    }
}

fn fmt_minutes(minutes: Option<f64>) -> String {
    minutes.map(|m| format!("{m:.1}")).unwrap_or_default()
}

/// Render one day's ranking, truncated below the user.
pub fn render_day_board(board: &DayBoard, year: u16, own_ids: &[u64]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!("Ranking for day {} of {}:", board.day, year).bold()
    );
    let mut table = TextTable::new(&["Name", "First * (min.)", "Second * (min.)", "Score"]);
    for row in truncate_below_own(&board.rows, DAY_TRAIL, |r| own_ids.contains(&r.id)) {
        table.push(vec![
            display_name(row.name.as_deref(), row.id),
            fmt_minutes(row.star1_minutes),
            fmt_minutes(row.star2_minutes),
            row.score.to_string(),
        ]);
    }
    out.push_str(&table.render());
    out
}

/// Render the cumulative totals, truncated below the user.
pub fn render_totals(totals: &Totals, year: u16, own_ids: &[u64]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("Total ranking for {year}:").bold());
    let rows = totals.rows();
    let mut table = TextTable::new(&["Name", "Score"]);
    for row in truncate_below_own(&rows, TOTAL_TRAIL, |r| own_ids.contains(&r.id)) {
        table.push(vec![
            display_name(row.name.as_deref(), row.id),
            row.score.to_string(),
        ]);
    }
    out.push_str(&table.render());
    out
}

/// The full report: every populated day in ascending order, then the
/// totals.
pub fn render_full_report(report: &ScoreReport, year: u16, own_ids: &[u64]) -> String {
    let mut out = String::new();
    for board in &report.days {
        out.push_str(&render_day_board(board, year, own_ids));
        out.push('\n');
    }
    out.push_str(&render_totals(&report.totals, year, own_ids));
    out
}

/// The own-only report: the user's elapsed times by day, then the same
/// rows by descending second-star time so the hardest days float up.
/// A year without any own completions renders empty tables.
pub fn render_own_report(report: &ScoreReport, year: u16, own_id: Option<u64>) -> String {
    let mut rows: Vec<(u8, Option<f64>, Option<f64>)> = report
        .days
        .iter()
        .filter_map(|board| {
            board
                .rows
                .iter()
                .find(|r| Some(r.id) == own_id)
                .map(|r| (board.day, r.star1_minutes, r.star2_minutes))
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("Own times for {year}:").bold());
    let mut table = TextTable::new(&["Day", "First * (min.)", "Second * (min.)"]);
    for &(day, star1, star2) in &rows {
        table.push(vec![
            day.to_string(),
            fmt_minutes(star1),
            fmt_minutes(star2),
        ]);
    }
    out.push_str(&table.render());

    // Descending by second-star time, days without a second star last.
    rows.sort_by(|a, b| match (a.2, b.2) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    out.push('\n');
    let _ = writeln!(
        out,
        "{}",
        format!("Hardest days of {year} (by second star):").bold()
    );
    let mut table = TextTable::new(&["Day", "First * (min.)", "Second * (min.)"]);
    for &(day, star1, star2) in &rows {
        table.push(vec![
            day.to_string(),
            fmt_minutes(star1),
            fmt_minutes(star2),
        ]);
    }
    out.push_str(&table.render());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::{DayRow, TotalRow};

    fn row(id: u64, name: &str, score: u64) -> DayRow {
        DayRow {
            id,
            name: Some(name.to_string()),
            star1_minutes: Some(10.0),
            star2_minutes: None,
            score,
        }
    }

    #[test]
    fn test_truncate_keeps_trail_rows_after_own() {
        let rows: Vec<u64> = (0..20).collect();
        let truncated = truncate_below_own(&rows, 5, |&r| r == 3);
        assert_eq!(truncated.len(), 9); // own at index 3 -> 3 + 5 + 1
        assert_eq!(truncated.last(), Some(&8));
    }

    #[test]
    fn test_truncate_short_list_unchanged() {
        let rows: Vec<u64> = (0..4).collect();
        let truncated = truncate_below_own(&rows, 19, |&r| r == 1);
        assert_eq!(truncated.len(), 4);
    }

    #[test]
    fn test_truncate_without_own_row_keeps_everything() {
        let rows: Vec<u64> = (0..20).collect();
        let truncated = truncate_below_own(&rows, 5, |&r| r == 99);
        assert_eq!(truncated.len(), 20);
    }

    #[test]
    fn test_display_name_strips_non_ascii() {
        assert_eq!(display_name(Some("Åsa Ö"), 1), "sa ");
        assert_eq!(display_name(Some("plain"), 1), "plain");
    }

    #[test]
    fn test_display_name_anonymous_placeholder() {
        assert_eq!(display_name(None, 123), "(anonymous user #123)");
        assert_eq!(display_name(Some(""), 7), "(anonymous user #7)");
        assert_eq!(display_name(Some("日本語"), 9), "(anonymous user #9)");
    }

    #[test]
    fn test_day_board_truncation_in_render() {
        let board = DayBoard {
            day: 5,
            rows: (0..12).map(|i| row(i, &format!("P{i}"), 12 - i)).collect(),
        };
        let rendered = render_day_board(&board, 2022, &[2]);
        // Heading + header + rule + rows 0..=7 (own at index 2, 5 after).
        let data_lines = rendered.lines().count() - 3;
        assert_eq!(data_lines, 8);
        assert!(rendered.contains("P7"));
        assert!(!rendered.contains("P8"));
    }

    #[test]
    fn test_own_report_sorts_hardest_days_last_section() {
        let own_row = |star2: Option<f64>| DayRow {
            id: 9,
            name: Some("Me".to_string()),
            star1_minutes: Some(1.0),
            star2_minutes: star2,
            score: 1,
        };
        let report = ScoreReport {
            days: vec![
                DayBoard {
                    day: 1,
                    rows: vec![own_row(Some(10.0))],
                },
                DayBoard {
                    day: 2,
                    rows: vec![own_row(Some(99.0))],
                },
                DayBoard {
                    day: 3,
                    rows: vec![own_row(None)],
                },
            ],
            totals: Totals::default(),
        };
        let rendered = render_own_report(&report, 2022, Some(9));
        let hardest = rendered.split("Hardest").nth(1).unwrap();
        let day99 = hardest.find("99.0").unwrap();
        let day10 = hardest.find("10.0").unwrap();
        assert!(day99 < day10);
        // The starless day sorts after both.
        let rows: Vec<&str> = hardest.lines().skip(3).collect();
        assert!(rows.last().unwrap().trim_start().starts_with('3'));
    }

    #[test]
    fn test_minutes_formatting() {
        assert_eq!(fmt_minutes(Some(1.25)), "1.2");
        assert_eq!(fmt_minutes(Some(-2.0)), "-2.0");
        assert_eq!(fmt_minutes(None), "");
    }

    #[test]
    fn test_totals_render_includes_scores() {
        let mut report_rows = Vec::new();
        for (id, score) in [(1u64, 30u64), (2, 20)] {
            report_rows.push(TotalRow {
                id,
                name: Some(format!("P{id}")),
                score,
            });
        }
        // Render through the public path: totals built via score_days are
        // covered in integration tests; here just exercise the table shape.
        let mut table = TextTable::new(&["Name", "Score"]);
        for row in &report_rows {
            table.push(vec![
                display_name(row.name.as_deref(), row.id),
                row.score.to_string(),
            ]);
        }
        let rendered = table.render();
        assert!(rendered.contains("P1"));
        assert!(rendered.contains("30"));
    }
}
