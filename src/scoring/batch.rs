use super::{Scorer, ScoringPoint};
use crate::ast::{Expression, Parser};
use crate::derivative::Univariate;
use crate::error::ParseError;
use log::debug;
use rayon::prelude::*;

impl Scorer {
    /// Scores every submission against the same reference, in parallel.
    pub fn score_many<U>(
        &self,
        reference: &Expression,
        submissions: &[U],
        points: &[ScoringPoint],
    ) -> Vec<u8>
    where
        U: Univariate + Sync,
    {
        submissions
            .par_iter()
            .map(|submission| self.score(reference, submission, points))
            .collect()
    }

    /// Parses and scores submitted formula texts in parallel. Each text that
    /// does not parse yields its own error.
    pub fn grade_many<S>(
        &self,
        parser: &Parser,
        reference: &Expression,
        sources: &[S],
        points: &[ScoringPoint],
    ) -> Vec<Result<u8, ParseError>>
    where
        S: AsRef<str> + Sync,
    {
        debug!("Grading {} submissions", sources.len());
        sources
            .par_iter()
            .map(|source| {
                let submission = parser.parse(source.as_ref())?;
                Ok(self.score(reference, &submission, points))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<ScoringPoint> {
        (0..8).map(|i| ScoringPoint::at(-1.0 + i as f64 * 0.25)).collect()
    }

    #[test]
    fn test_score_many_matches_sequential() {
        let scorer = Scorer::default();
        let reference: Expression = "3*x^2".parse().unwrap();
        let submissions: Vec<Expression> = ["x^3", "x^3 + 5", "x^2", "sin(x)"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();

        let parallel = scorer.score_many(&reference, &submissions, &points());
        let sequential: Vec<u8> = submissions
            .iter()
            .map(|s| scorer.score(&reference, s, &points()))
            .collect();
        assert_eq!(parallel, sequential);
        assert_eq!(parallel[0], 100);
        assert_eq!(parallel[1], 100);
    }

    #[test]
    fn test_grade_many_keeps_order_and_errors() {
        let scorer = Scorer::default();
        let reference: Expression = "cos(x)".parse().unwrap();
        let sources = ["sin(x)", "sin(x", "sin(x) - 2"];
        let grades = scorer.grade_many(&Parser::default(), &reference, &sources, &points());
        assert_eq!(grades.len(), 3);
        assert_eq!(grades[0], Ok(100));
        assert_eq!(
            grades[1],
            Err(ParseError::UnclosedDelimiter { position: 3 })
        );
        assert_eq!(grades[2], Ok(100));
    }
}
