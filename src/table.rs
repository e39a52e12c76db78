//! Schema normalization and projection-table selection.

use crate::types::Table;

/// Column names that can hold the seasonal fantasy point total when
/// probing unknown tables.
pub const FPTS_ALIASES: [&str; 5] = ["fpts", "fantasy pts", "fantasypts", "points", "misc fpts"];

/// Canonicalize a table's schema: keep only the innermost header level,
/// then trim and lower-case every column name. Pure and idempotent.
pub fn canonicalize(table: &Table) -> Table {
    let columns: Vec<String> = table
        .columns()
        .iter()
        .map(|c| c.trim().to_lowercase())
        .collect();
    Table::new(vec![columns], table.rows.clone())
}

/// Pick the table that holds player projections: the first one, in
/// document order, whose canonical columns include `player` and at
/// least one seasonal-points alias. Returns the canonicalized match;
/// the inputs are left untouched.
pub fn select_projection_table(tables: &[Table]) -> Option<Table> {
    for table in tables {
        let candidate = canonicalize(table);
        let columns = candidate.columns();
        if columns.iter().any(|c| c == "player")
            && FPTS_ALIASES.iter().any(|a| columns.iter().any(|c| c == a))
        {
            return Some(candidate);
        }
    }
    None
}
