use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::ProjectionRow;

/// Relative output paths land under this directory.
pub const DATA_DIR: &str = "data";

/// Date-stamped default filename, e.g. `fp_rankings_08142025.csv`.
pub fn default_output_name(date: NaiveDate) -> String {
    format!("fp_rankings_{}.csv", date.format("%m%d%Y"))
}

/// Resolve the output path: an absolute override is used as given,
/// anything else (override or default name) goes under [`DATA_DIR`].
pub fn resolve_output_path(out: Option<&str>, today: NaiveDate) -> PathBuf {
    let name = match out {
        Some(name) => name.to_string(),
        None => default_output_name(today),
    };
    let path = PathBuf::from(&name);
    if path.is_absolute() {
        path
    } else {
        PathBuf::from(DATA_DIR).join(path)
    }
}

/// Write the consolidated rankings table, creating the parent directory
/// if needed. Columns: `player,team,proj_pts,pos`.
pub fn write_rankings(path: &Path, rows: &[ProjectionRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {:?}", parent))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open output file {:?}", path))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row for {}", row.player))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush output file {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    #[test]
    fn test_default_output_name_embeds_date() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
        assert_eq!(default_output_name(date), "fp_rankings_08142025.csv");
    }

    #[test]
    fn test_relative_paths_go_under_data_dir() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
        assert_eq!(
            resolve_output_path(None, date),
            PathBuf::from("data/fp_rankings_08142025.csv")
        );
        assert_eq!(
            resolve_output_path(Some("custom.csv"), date),
            PathBuf::from("data/custom.csv")
        );
    }

    #[test]
    fn test_absolute_path_is_kept() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
        assert_eq!(
            resolve_output_path(Some("/tmp/rankings.csv"), date),
            PathBuf::from("/tmp/rankings.csv")
        );
    }

    #[test]
    fn test_write_rankings_header_and_formatting() {
        let rows = vec![
            ProjectionRow {
                player: "Josh Allen".to_string(),
                team: Some("BUF".to_string()),
                proj_pts: 24.15,
                pos: Position::QB,
            },
            ProjectionRow {
                player: "Lamar Jackson".to_string(),
                team: None,
                proj_pts: 22.35,
                pos: Position::QB,
            },
        ];

        let path = std::env::temp_dir().join(format!("fp_rankings_test_{}.csv", std::process::id()));
        write_rankings(&path, &rows).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("player,team,proj_pts,pos"));
        assert_eq!(lines.next(), Some("Josh Allen,BUF,24.15,QB"));
        assert_eq!(lines.next(), Some("Lamar Jackson,,22.35,QB"));
    }
}
