//! Field extraction: resolve the player, team and season-total columns
//! out of whatever schema the source handed back.

use anyhow::{anyhow, Result};

use crate::table::canonicalize;
use crate::types::{SeasonTotal, Table};

/// Accepted names for the season point total, in lookup order. `misc
/// fpts` only appears in grouped HTML headers and is already reduced to
/// `fpts` by the time this list is consulted.
const POINTS_ALIASES: [&str; 5] = ["fpts", "fantasy pts", "fantasypts", "points", "total fpts"];

/// Reduce a projections table to per-player season totals.
///
/// Column resolution: `player` (or `name`) for the player, `team` (or
/// `tm`) for the team, and the first present of [`POINTS_ALIASES`] for
/// the total. Without a team column the team code is recovered from the
/// player cell where possible. Rows with an empty player or a cell that
/// does not coerce to a usable number are dropped.
pub fn extract_player_team_fpts(table: &Table) -> Result<Vec<SeasonTotal>> {
    let table = canonicalize(table);

    let player_idx = table
        .column_index("player")
        .or_else(|| table.column_index("name"))
        .ok_or_else(|| anyhow!("could not find 'player' column in downloaded table"))?;

    let team_idx = ["team", "tm"].iter().find_map(|c| table.column_index(c));

    let fpts_idx = POINTS_ALIASES
        .iter()
        .find_map(|c| table.column_index(c))
        .ok_or_else(|| anyhow!("could not find 'fpts' (season total) column in downloaded table"))?;

    let mut out = Vec::new();
    for row in &table.rows {
        let raw_player = row.get(player_idx).map(String::as_str).unwrap_or("");

        let (player, team) = match team_idx {
            Some(idx) => {
                let team = row
                    .get(idx)
                    .map(|t| t.trim())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string);
                (raw_player.trim().to_string(), team)
            }
            None => split_player_team(raw_player),
        };

        let Some(fpts) = row.get(fpts_idx).and_then(|cell| parse_points(cell)) else {
            continue;
        };
        if player.is_empty() {
            continue;
        }

        out.push(SeasonTotal { player, team, fpts });
    }
    Ok(out)
}

/// Best-effort recovery of a team code embedded in the player cell,
/// e.g. `"Lamar Jackson BAL"`. The last whitespace-delimited token is
/// taken as the team only when it is at most 4 characters and entirely
/// upper-case; otherwise the cell is kept whole with an unknown team.
/// All-caps name suffixes (`III`) pass the test and are misread as a
/// team code.
pub fn split_player_team(raw: &str) -> (String, Option<String>) {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    if parts.len() >= 2 {
        let tail = parts[parts.len() - 1];
        if tail.chars().count() <= 4 && is_all_uppercase(tail) {
            return (parts[..parts.len() - 1].join(" "), Some(tail.to_string()));
        }
    }
    (raw.trim().to_string(), None)
}

/// True when the token has at least one cased character and none of its
/// cased characters are lower-case.
fn is_all_uppercase(token: &str) -> bool {
    let mut has_cased = false;
    for c in token.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Coerce a points cell. Anything that is not a finite, non-negative
/// number counts as missing.
fn parse_points(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
