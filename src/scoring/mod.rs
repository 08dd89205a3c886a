//! Grading a submission by comparing derivatives at weighted points.

mod batch;
mod point;

pub use point::ScoringPoint;

use crate::ast::Expression;
use crate::derivative::{derivative_with, DerivativeConfig, Univariate};
use log::{debug, warn};

/// Credit awarded when the scaled difference falls below `tolerance`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ToleranceTier {
    pub tolerance: f64,
    /// Percentage, 0 to 100.
    pub credit: u8,
}

impl ToleranceTier {
    pub const fn new(tolerance: f64, credit: u8) -> Self {
        Self { tolerance, credit }
    }
}

pub const DEFAULT_TIERS: [ToleranceTier; 6] = [
    ToleranceTier::new(1e-5, 100),
    ToleranceTier::new(1e-3, 90),
    ToleranceTier::new(1e-1, 60),
    ToleranceTier::new(1e0, 30),
    ToleranceTier::new(1e1, 10),
    ToleranceTier::new(f64::INFINITY, 0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Checked in order, the first match wins; keep tolerances ascending.
    pub tiers: Vec<ToleranceTier>,
    pub derivative: DerivativeConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_TIERS.to_vec(),
            derivative: DerivativeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Percentage credit for one point, given the reference derivative
    /// `expected` and the estimated derivative of the submission `actual`.
    pub fn credit(&self, expected: f64, actual: f64) -> u8 {
        if expected == actual {
            return 100;
        }
        let delta = (expected - actual).abs();
        if !delta.is_finite() {
            return 0;
        }
        let scale = (expected.abs() + actual.abs()).max(1.0);
        self.config
            .tiers
            .iter()
            .find(|tier| delta < tier.tolerance * scale)
            .map_or(0, |tier| tier.credit)
    }

    /// Scores `submitted` against `reference`, which already is the known
    /// derivative. Returns a percentage from 0 to 100.
    pub fn score<U: Univariate + ?Sized>(
        &self,
        reference: &Expression,
        submitted: &U,
        points: &[ScoringPoint],
    ) -> u8 {
        let mut earned = 0.0;
        let mut total = 0.0;
        for point in points {
            let expected = reference.evaluate(point.x);
            let actual = derivative_with(submitted, point.x, &self.config.derivative);
            let credit = self.credit(expected, actual);
            debug!(
                "x = {}: expected {}, got {}, credit {}%",
                point.x, expected, actual, credit
            );
            earned += point.weight * f64::from(credit) / 100.0;
            total += point.weight;
        }

        if !(total > 0.0 && total.is_finite()) {
            warn!("Scoring over {} points with total weight {}", points.len(), total);
            return 0;
        }
        (100.0 * earned / total).round_ties_even().clamp(0.0, 100.0) as u8
    }
}

/// Scores with the default tiers and derivative step.
pub fn score<U: Univariate + ?Sized>(
    reference: &Expression,
    submitted: &U,
    points: &[ScoringPoint],
) -> u8 {
    Scorer::default().score(reference, submitted, points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Expression {
        source.parse().unwrap()
    }

    fn unit_points() -> Vec<ScoringPoint> {
        (1..=10).map(|i| ScoringPoint::at(i as f64 / 10.0)).collect()
    }

    #[test]
    fn test_correct_antiderivative_scores_full() {
        let reference = parse("2*x + cos(x)");
        let submitted = parse("x^2 + sin(x) + 7");
        assert_eq!(score(&reference, &submitted, &unit_points()), 100);
    }

    #[test]
    fn test_wrong_submission_scores_low() {
        let reference = parse("2*x");
        let submitted = parse("x^3");
        assert!(score(&reference, &submitted, &unit_points()) < 60);
    }

    #[test]
    fn test_function_against_its_own_derivative_scores_full() {
        let cases = [
            ("exp(x)*sin(x)", "exp(x)*(sin(x) + cos(x))"),
            ("x^5 - 3*x", "5*x^4 - 3"),
            ("ln(x)", "1/x"),
            ("sqrt(x)", "1/(2*sqrt(x))"),
        ];
        let points: Vec<ScoringPoint> = (1..=20)
            .map(|i| ScoringPoint::new(i as f64 / 4.0, (i % 3 + 1) as f64))
            .collect();
        for (function, derivative) in cases {
            assert_eq!(
                score(&parse(derivative), &parse(function), &points),
                100,
                "{}",
                function
            );
        }
    }

    #[test]
    fn test_equal_values_get_full_credit() {
        let scorer = Scorer::default();
        assert_eq!(scorer.credit(f64::INFINITY, f64::INFINITY), 100);
        assert_eq!(scorer.credit(3.0, 3.0), 100);
        assert_eq!(scorer.credit(f64::INFINITY, 1.0), 0);
        assert_eq!(scorer.credit(f64::NAN, f64::NAN), 0);
        assert_eq!(scorer.credit(f64::INFINITY, f64::NEG_INFINITY), 0);
    }

    #[test]
    fn test_tiers() {
        let scorer = Scorer::default();
        assert_eq!(scorer.credit(0.0, 5e-6), 100);
        assert_eq!(scorer.credit(0.0, 5e-4), 90);
        assert_eq!(scorer.credit(0.0, 0.05), 60);
        assert_eq!(scorer.credit(0.0, 0.5), 30);
        // delta 5 against scale 5
        assert_eq!(scorer.credit(0.0, 5.0), 10);
        // relative to |y1| + |y2|
        assert_eq!(scorer.credit(1000.0, 1000.5), 90);
        // finite values of opposite sign never reach the first four tiers
        assert_eq!(scorer.credit(-1.0, 1.0), 10);
    }

    #[test]
    fn test_credit_is_monotone_in_difference() {
        let scorer = Scorer::default();
        let expected = 2.0;
        for direction in [1.0, -1.0] {
            let mut previous = 100;
            for step in 0..60 {
                let actual = expected + direction * 1e-7 * 1.5_f64.powi(step);
                let credit = scorer.credit(expected, actual);
                assert!(credit <= previous, "credit rose at {}", actual);
                previous = credit;
            }
            assert_eq!(previous, if direction > 0.0 { 30 } else { 10 });
        }
        assert_eq!(scorer.credit(expected, f64::INFINITY), 0);
    }

    #[test]
    fn test_weighted_aggregation() {
        // the submission matches at x = 0 only
        let reference = parse("0");
        let submitted = |x: f64| if x < 5.0 { 0.0 } else { f64::NAN };
        let points = [ScoringPoint::new(0.0, 1.0), ScoringPoint::new(10.0, 3.0)];
        assert_eq!(score(&reference, &submitted, &points), 25);
    }

    #[test]
    fn test_rounds_half_to_even() {
        let reference = parse("0");
        let submitted = |x: f64| if x < 5.0 { 0.0 } else { f64::NAN };
        // 100 * 1/8 = 12.5
        let points = [ScoringPoint::new(0.0, 1.0), ScoringPoint::new(10.0, 7.0)];
        assert_eq!(score(&reference, &submitted, &points), 12);
    }

    #[test]
    fn test_empty_point_set_scores_zero() {
        let f = parse("x");
        assert_eq!(score(&f, &f, &[]), 0);
    }

    #[test]
    fn test_sentinels_never_panic() {
        let reference = parse("1/x");
        let submitted = parse("exp(10^x)");
        let points = [ScoringPoint::at(0.0), ScoringPoint::at(400.0)];
        assert_eq!(score(&reference, &submitted, &points), 0);
    }

    #[test]
    fn test_custom_tiers() {
        let scorer = Scorer::new(ScoringConfig {
            tiers: vec![ToleranceTier::new(1e-1, 80), ToleranceTier::new(f64::INFINITY, 0)],
            ..ScoringConfig::default()
        });
        assert_eq!(scorer.credit(0.0, 0.05), 80);
        assert_eq!(scorer.credit(0.0, 0.5), 0);
    }
}
