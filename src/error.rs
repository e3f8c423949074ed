// Copyright (c) 2026 rezky_nightky

use std::fmt;
use std::time::Duration;

/// Configuration rejected before the animation starts.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `rows` or `cols` is zero.
    EmptyGrid { rows: u16, cols: u16 },
    /// The color palette has no entries.
    EmptyPalette,
    /// Drop height range is empty, inverted, or starts at zero.
    HeightRange { low: u16, high: u16 },
    /// Spawn threshold is not a finite value in `[0, 1]`.
    SpawnThreshold(f64),
    /// A timer period that is zero or longer than a day.
    PeriodRange {
        name: &'static str,
        period: Duration,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { rows, cols } => {
                write!(f, "grid must be at least 1x1 (got {rows} rows, {cols} cols)")
            }
            Self::EmptyPalette => write!(f, "color palette must have at least one entry"),
            Self::HeightRange { low, high } => {
                write!(f, "drop height range {low},{high} must satisfy 1 <= low <= high")
            }
            Self::SpawnThreshold(v) => {
                write!(f, "spawn threshold {v} must be a finite number in [0, 1]")
            }
            Self::PeriodRange { name, period } => write!(
                f,
                "{name} period {} ms must be between 1 ms and 86400000 ms",
                period.as_millis()
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_values() {
        let e = ConfigError::EmptyGrid { rows: 0, cols: 20 };
        assert_eq!(e.to_string(), "grid must be at least 1x1 (got 0 rows, 20 cols)");
        let e = ConfigError::PeriodRange {
            name: "drop",
            period: Duration::ZERO,
        };
        assert_eq!(e.to_string(), "drop period 0 ms must be between 1 ms and 86400000 ms");
    }
}
