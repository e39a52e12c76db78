use crate::types::{Position, PositionSpec};

/// The four FantasyPros season projection pages, in output order.
/// RB/WR/TE use the half-PPR scoring variants.
pub fn default_sources() -> Vec<PositionSpec> {
    vec![
        PositionSpec {
            url: "https://www.fantasypros.com/nfl/projections/qb.php?week=draft".to_string(),
            label: Position::QB,
        },
        PositionSpec {
            url: "https://www.fantasypros.com/nfl/projections/rb.php?week=draft&scoring=HALF"
                .to_string(),
            label: Position::RB,
        },
        PositionSpec {
            url: "https://www.fantasypros.com/nfl/projections/wr.php?week=draft&scoring=HALF"
                .to_string(),
            label: Position::WR,
        },
        PositionSpec {
            url: "https://www.fantasypros.com/nfl/projections/te.php?week=draft&scoring=HALF"
                .to_string(),
            label: Position::TE,
        },
    ]
}

/// Positions expected in the final output; anything else is discarded
/// by the aggregator.
pub const EXPECTED_POSITIONS: [Position; 4] =
    [Position::QB, Position::RB, Position::WR, Position::TE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources_cover_all_positions() {
        let sources = default_sources();
        assert_eq!(sources.len(), 4);
        for pos in EXPECTED_POSITIONS {
            assert!(
                sources.iter().any(|s| s.label == pos),
                "missing source for {}",
                pos
            );
        }
    }

    #[test]
    fn test_default_sources_order_is_fixed() {
        let labels: Vec<_> = default_sources().iter().map(|s| s.label).collect();
        assert_eq!(labels, EXPECTED_POSITIONS.to_vec());
    }
}
