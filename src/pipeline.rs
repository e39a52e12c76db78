//! Per-position fetch pipeline and the aggregate run.

use anyhow::{anyhow, Context, Result};
use std::thread;
use std::time::Duration;

use crate::extract::extract_player_team_fpts;
use crate::fetch::TableSource;
use crate::sources::EXPECTED_POSITIONS;
use crate::table::select_projection_table;
use crate::types::{PositionSpec, ProjectionRow};

pub const DEFAULT_RETRIES: u32 = 2;
pub const DEFAULT_BACKOFF: f64 = 1.5;

/// Pull one position: CSV export first, rendered page as fallback,
/// then extraction and per-game conversion. Every failure inside an
/// attempt is retried with exponential backoff until the budget runs
/// out, at which point the last error is wrapped with the position and
/// URL.
pub fn fetch_position<S: TableSource>(
    source: &S,
    spec: &PositionSpec,
    weeks: u32,
    retries: u32,
    backoff: f64,
) -> Result<Vec<ProjectionRow>> {
    let mut attempt = 0;
    loop {
        match attempt_position(source, spec, weeks) {
            Ok(rows) => return Ok(rows),
            Err(err) if attempt < retries => {
                eprintln!("  attempt {} for {} failed: {:#}", attempt + 1, spec.label, err);
                thread::sleep(Duration::from_secs_f64(backoff.powi(attempt as i32)));
                attempt += 1;
            }
            Err(err) => {
                return Err(err.context(format!(
                    "failed to fetch {} from {}",
                    spec.label, spec.url
                )));
            }
        }
    }
}

fn attempt_position<S: TableSource>(
    source: &S,
    spec: &PositionSpec,
    weeks: u32,
) -> Result<Vec<ProjectionRow>> {
    let table = match source.fetch_export(&spec.url)? {
        Some(table) => table,
        None => {
            let tables = source.fetch_rendered(&spec.url)?;
            select_projection_table(&tables).ok_or_else(|| anyhow!("no data table found"))?
        }
    };
    if table.is_empty() {
        return Err(anyhow!("no data table found"));
    }

    let rows = extract_player_team_fpts(&table)?
        .into_iter()
        .map(|total| ProjectionRow {
            player: total.player,
            team: total.team,
            proj_pts: per_game_rate(total.fpts, weeks),
            pos: spec.label,
        })
        .collect();
    Ok(rows)
}

/// Season total divided by games in the season, rounded to 2 decimals.
/// `weeks` must be at least 1; the CLI enforces this.
pub fn per_game_rate(fpts: f64, weeks: u32) -> f64 {
    (fpts / weeks as f64 * 100.0).round() / 100.0
}

/// Run the pipeline for every configured position in order and
/// concatenate the results. The first position that exhausts its
/// retries aborts the whole run.
pub fn fetch_all<S: TableSource>(
    source: &S,
    specs: &[PositionSpec],
    weeks: u32,
    retries: u32,
    backoff: f64,
) -> Result<Vec<ProjectionRow>> {
    let mut all = Vec::new();
    for spec in specs {
        println!("Fetching {} projections from {}", spec.label, spec.url);
        let rows = fetch_position(source, spec, weeks, retries, backoff)
            .with_context(|| format!("aggregate run aborted at {}", spec.label))?;
        println!("  -> {} rows", rows.len());
        all.extend(rows);
    }

    // Sanity filter: keep only the expected position labels.
    all.retain(|row| EXPECTED_POSITIONS.contains(&row.pos));
    Ok(all)
}
