use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use retrorank_core::{
    load_board, patch_own, render_full_report, render_own_report, scan_solutions, score_days,
    Leaderboard, MergedBoard,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retrorank")]
#[command(about = "Rank your late Advent of Code solves against a private leaderboard", version)]
struct Args {
    /// Your display name, exactly as it appears on the leaderboard
    own_name: String,

    /// Leaderboard JSON export files; several files for the same year are
    /// merged into one board
    #[arg(required = true)]
    boards: Vec<PathBuf>,

    /// Print only your own elapsed times instead of the full ranking
    #[arg(long)]
    own_only: bool,

    /// Directory scanned for *.ipynb solution files with start_ts headers
    #[arg(short, long, default_value = ".")]
    solutions: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("retrorank=info".parse()?)
                .add_directive("retrorank_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut boards: Vec<Leaderboard> = Vec::with_capacity(args.boards.len());
    for path in &args.boards {
        let board = load_board(path).with_context(|| format!("reading leaderboard {path:?}"))?;
        boards.push(board);
    }

    let mut merged = MergedBoard::merge(&boards).context("merging leaderboard files")?;
    let year = merged.year();
    info!(
        "Merged {} leaderboard file(s) for {}, {} participants",
        boards.len(),
        year,
        merged.participant_estimate()
    );

    let starts = scan_solutions(&args.solutions)
        .with_context(|| format!("scanning solutions in {:?}", args.solutions))?;
    info!("Found {} start timestamp(s) in solution headers", starts.len());

    let own_ids = merged.ids_for_name(&args.own_name);
    if own_ids.is_empty() {
        warn!(
            "Name {:?} does not appear on the board; nothing to patch and no truncation",
            args.own_name
        );
    }

    patch_own(&mut merged, &own_ids, &starts).context("patching own start times")?;
    let report = score_days(&merged).context("scoring")?;

    if args.own_only {
        let own_id = merged.sole_id_for_name(&args.own_name)?;
        println!("{}", render_own_report(&report, year, own_id));
    } else {
        println!("{}", render_full_report(&report, year, &own_ids));
    }

    Ok(())
}
