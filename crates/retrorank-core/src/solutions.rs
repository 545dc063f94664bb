//! Self-reported start times from the user's own solution notebooks.
//!
//! Solutions are Jupyter notebooks whose code cells carry a header pair:
//!
//! ```text
//! # 2022 day 5
//! # start_ts=1670212800
//! ```
//!
//! Each well-formed pair yields one `(year, day, start_ts)` entry. This is
//! honor-system data: the ranking is only as honest as the headers.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Result;

/// One self-reported start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartEntry {
    pub year: u16,
    pub day: u8,
    pub start_ts: i64,
}

/// The subset of the notebook format the header scan needs.
#[derive(Debug, Deserialize)]
struct Notebook {
    #[serde(default)]
    cells: Vec<Cell>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    cell_type: String,
    #[serde(default)]
    source: Vec<String>,
}

/// Scan a directory for `*.ipynb` files and collect every start entry
/// found in their code cell headers.
///
/// A notebook that cannot be read or parsed is skipped with a warning;
/// self-authored scratch files must not kill the run. A missing directory
/// is fatal.
pub fn scan_solutions<P: AsRef<Path>>(dir: P) -> Result<Vec<StartEntry>> {
    let mut entries = Vec::new();
    for file in fs::read_dir(dir)? {
        let path = file?.path();
        if path.extension().is_none_or(|ext| ext != "ipynb") {
            continue;
        }
        let notebook: Notebook = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(notebook) => notebook,
                Err(e) => {
                    warn!("Skipping notebook {:?}: {}", path, e);
                    continue;
                }
            },
            Err(e) => {
                warn!("Skipping notebook {:?}: {}", path, e);
                continue;
            }
        };
        let before = entries.len();
        entries.extend(
            notebook
                .cells
                .iter()
                .filter(|cell| cell.cell_type == "code")
                .filter_map(|cell| scan_cell(&cell.source)),
        );
        debug!("Found {} start entries in {:?}", entries.len() - before, path);
    }
    Ok(entries)
}

/// Extract the start entry from one cell's source lines, if the cell has
/// a complete, well-formed header. A malformed numeric field drops the
/// whole cell's entry; unrelated lines are ignored.
fn scan_cell(source: &[String]) -> Option<StartEntry> {
    let mut year_day = None;
    let mut start_ts = None;
    for line in source {
        if line.starts_with("# 20") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 4 && parts[0] == "#" && parts[2] == "day" {
                let year: u16 = parts[1].parse().ok()?;
                let day: u8 = parts[3].parse().ok()?;
                year_day = Some((year, day));
            }
        } else if let Some(value) = line.trim_end().strip_prefix("# start_ts=") {
            start_ts = Some(value.parse().ok()?);
        }
    }
    let (year, day) = year_day?;
    Some(StartEntry {
        year,
        day,
        start_ts: start_ts?,
    })
}
