use serde::{Deserialize, Serialize};
use std::fmt;

/// Player positions covered by the projections run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
        };
        f.write_str(label)
    }
}

/// One projections page to pull: its URL and the position it covers.
#[derive(Debug, Clone)]
pub struct PositionSpec {
    pub url: String,
    pub label: Position,
}

/// A table as retrieved from either the CSV export or the rendered page.
///
/// `header` holds one entry per header level, outermost first; the CSV
/// path always produces a single level, the HTML path may produce more
/// when the page uses a grouped header. Cells stay raw strings until
/// the extractor coerces them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub header: Vec<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        Table { header, rows }
    }

    /// Column labels at the innermost header level.
    pub fn columns(&self) -> &[String] {
        self.header.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns().iter().position(|c| c == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Extractor output: one player's season total before per-game conversion.
/// `team` is `None` when the source had no team column and the fallback
/// split did not produce a plausible team code.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonTotal {
    pub player: String,
    pub team: Option<String>,
    pub fpts: f64,
}

/// One row of the final output CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRow {
    pub player: String,
    pub team: Option<String>,
    pub proj_pts: f64,
    pub pos: Position,
}
