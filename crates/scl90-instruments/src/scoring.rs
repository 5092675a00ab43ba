use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Defines the valid range for a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ScoreRange {
    pub const LIKERT: ScoreRange = ScoreRange {
        min: 0.0,
        max: 4.0,
        step: Some(1.0),
    };

    pub fn contains(&self, value: f64) -> bool {
        if value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }
}

/// A symptom dimension: a named set of 1-based item numbers whose ratings
/// are summed and averaged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimension {
    pub id: String,
    pub name: String,
    pub items: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// 1-based item number.
    pub item: usize,
    pub value: f64,
    pub expected_range: ScoreRange,
    pub message: String,
}

/// Round to two decimals, the precision every reported mean and index
/// uses. Exact ties go to the even neighbour, so 9/8 reports as 1.12.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likert_range_accepts_only_whole_steps() {
        assert!(ScoreRange::LIKERT.contains(0.0));
        assert!(ScoreRange::LIKERT.contains(4.0));
        assert!(!ScoreRange::LIKERT.contains(2.5));
        assert!(!ScoreRange::LIKERT.contains(5.0));
        assert!(!ScoreRange::LIKERT.contains(-1.0));
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(1.5), 1.5);
    }

    #[test]
    fn round2_sends_exact_ties_to_even() {
        assert_eq!(round2(9.0 / 8.0), 1.12);
        assert_eq!(round2(21.0 / 8.0), 2.62);
        assert_eq!(round2(11.0 / 8.0), 1.38);
    }
}
