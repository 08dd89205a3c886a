use crate::error::TaskError;
use serde::{Deserialize, Serialize};

/// Where a submission is checked and how much that check counts.
///
/// Serialized as an `[x, weight]` pair.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct ScoringPoint {
    pub x: f64,
    pub weight: f64,
}

impl ScoringPoint {
    pub fn new(x: f64, weight: f64) -> Self {
        Self { x, weight }
    }

    /// Unit weight at `x`.
    pub fn at(x: f64) -> Self {
        Self::new(x, 1.0)
    }

    pub fn validate(&self) -> Result<(), TaskError> {
        if !self.x.is_finite() || !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(TaskError::InvalidWeight {
                x: self.x,
                weight: self.weight,
            });
        }
        Ok(())
    }
}

impl From<(f64, f64)> for ScoringPoint {
    fn from((x, weight): (f64, f64)) -> Self {
        Self::new(x, weight)
    }
}

impl From<ScoringPoint> for (f64, f64) {
    fn from(point: ScoringPoint) -> Self {
        (point.x, point.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_as_pair() {
        let point = ScoringPoint::new(0.5, 3.0);
        assert_eq!(serde_json::to_string(&point).unwrap(), "[0.5,3.0]");
        let points: Vec<ScoringPoint> = serde_json::from_str("[[-1, 1], [2.5, 0.5]]").unwrap();
        assert_eq!(
            points,
            vec![ScoringPoint::new(-1.0, 1.0), ScoringPoint::new(2.5, 0.5)]
        );
    }

    #[test]
    fn test_validate() {
        assert!(ScoringPoint::at(1.0).validate().is_ok());
        assert!(ScoringPoint::new(1.0, 0.0).validate().is_err());
        assert!(ScoringPoint::new(1.0, -2.0).validate().is_err());
        assert!(ScoringPoint::new(f64::NAN, 1.0).validate().is_err());
        assert!(ScoringPoint::new(0.0, f64::INFINITY).validate().is_err());
    }
}
