//! Period-over-period price evolution.
//!
//! The change is normalized by the *current* price:
//! `(current - previous) / current`, not by the previous one.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvolutionResult {
    pub direction: Direction,
    /// Change in percent (`2.857` means +2.857%), `None` when unknown.
    pub percent: Option<f64>,
}

impl EvolutionResult {
    pub const UNKNOWN: EvolutionResult = EvolutionResult {
        direction: Direction::Unknown,
        percent: None,
    };

    pub fn is_unknown(&self) -> bool {
        self.direction == Direction::Unknown
    }
}

/// Compute the evolution between two observations of the same fuel type.
pub fn evolution(current: Option<f64>, previous: Option<f64>) -> EvolutionResult {
    let (Some(current), Some(previous)) = (current, previous) else {
        return EvolutionResult::UNKNOWN;
    };
    if !current.is_finite() || !previous.is_finite() || current <= 0.0 {
        return EvolutionResult::UNKNOWN;
    }

    let percent = (current - previous) / current * 100.0;
    let direction = if percent > 0.0 {
        Direction::Up
    } else if percent < 0.0 {
        Direction::Down
    } else {
        Direction::Flat
    };
    EvolutionResult {
        direction,
        percent: Some(percent),
    }
}

/// `+2.86%`, `-0.52%`, `0.00%`, or `-` when unknown. A change that rounds to
/// zero prints as `0.00%` whatever its direction.
impl fmt::Display for EvolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = match (self.direction, self.percent) {
            (Direction::Unknown, _) | (_, None) => return f.write_str("-"),
            (_, Some(p)) => p,
        };
        if (p * 100.0).round() == 0.0 {
            f.write_str("0.00%")
        } else if p > 0.0 {
            write!(f, "+{p:.2}%")
        } else {
            write!(f, "{p:.2}%")
        }
    }
}
