//! Tasks: a reference derivative, the points it is checked at, and the
//! persisted form they are stored in.

use crate::ast::{Expression, Parser};
use crate::error::{EvalError, ParseError, TaskError};
use crate::generator::generate_with;
use crate::scoring::{Scorer, ScoringPoint};
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

const RANDOM_MIN_DEPTH: usize = 2;
const RANDOM_MAX_DEPTH: usize = 4;
const RANDOM_DOMAIN: (f64, f64) = (-1.0, 1.0);
const RANDOM_POINTS: usize = 20;
const RANDOM_ATTEMPTS: usize = 100;

/// `n` evenly spaced points in `(a, b]`: `a + (b - a)·i/n` for `i = 1..=n`.
pub fn linspace(a: f64, b: f64, n: usize) -> impl Iterator<Item = f64> {
    (1..=n).map(move |i| a + (b - a) * i as f64 / n as f64)
}

/// Closed interval a formula is meant to be looked at on. Stored as `[lo, hi]`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Domain {
    lo: f64,
    hi: f64,
}

impl Domain {
    pub fn new(lo: f64, hi: f64) -> Result<Self, TaskError> {
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(TaskError::InvalidDomain { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.lo..=self.hi).contains(&x)
    }

    pub fn linspace(&self, n: usize) -> impl Iterator<Item = f64> {
        linspace(self.lo, self.hi, n)
    }
}

impl TryFrom<[f64; 2]> for Domain {
    type Error = TaskError;

    fn try_from([lo, hi]: [f64; 2]) -> Result<Self, Self::Error> {
        Domain::new(lo, hi)
    }
}

impl From<Domain> for [f64; 2] {
    fn from(domain: Domain) -> Self {
        [domain.lo, domain.hi]
    }
}

/// A formula as it is stored: its source text and a domain. The text is
/// parsed again whenever the tree is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    #[serde(rename = "niz")]
    pub source: String,
    #[serde(rename = "obmocje")]
    pub domain: Domain,
}

impl FunctionSpec {
    pub fn new(source: impl Into<String>, domain: Domain) -> Self {
        Self {
            source: source.into(),
            domain,
        }
    }

    pub fn parse(&self) -> Result<Expression, ParseError> {
        self.source.parse()
    }

    pub fn to_latex(&self) -> Result<String, ParseError> {
        Ok(self.parse()?.to_latex())
    }
}

/// Stored shape of a [`Task`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "odvedena_funkcija")]
    pub reference: FunctionSpec,
    #[serde(rename = "tocke_za_preverjanje")]
    pub points: Vec<ScoringPoint>,
}

/// An exercise: find a function whose derivative is `reference`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    reference: FunctionSpec,
    expression: Expression,
    points: Vec<ScoringPoint>,
}

impl Task {
    pub fn new(reference: FunctionSpec, points: Vec<ScoringPoint>) -> Result<Self, TaskError> {
        if points.is_empty() {
            return Err(TaskError::NoPoints);
        }
        for point in &points {
            point.validate()?;
        }
        let expression = reference.parse()?;
        Ok(Self {
            reference,
            expression,
            points,
        })
    }

    pub fn reference(&self) -> &FunctionSpec {
        &self.reference
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn points(&self) -> &[ScoringPoint] {
        &self.points
    }

    /// Parses a submitted antiderivative and scores it with the default
    /// scorer. A submission that does not parse earns nothing and is
    /// reported as a [`ParseError`].
    pub fn grade(&self, submission: &str) -> Result<u8, ParseError> {
        self.grade_with(&Parser::default(), &Scorer::default(), submission)
    }

    pub fn grade_with(
        &self,
        parser: &Parser,
        scorer: &Scorer,
        submission: &str,
    ) -> Result<u8, ParseError> {
        let submitted = parser.parse(submission)?;
        let score = scorer.score(&self.expression, &submitted, &self.points);
        debug!("Graded '{}' against '{}': {}", submission, self.reference.source, score);
        Ok(score)
    }

    pub fn random() -> Result<Self, TaskError> {
        Self::random_with(&mut rand::rng())
    }

    /// Authors a task from a random reference formula on [-1, 1], checked at
    /// 20 evenly spaced points of weight 1. Formulas that leave their domain
    /// at any of those points are discarded and drawn again.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, TaskError> {
        let parser = Parser::default();
        let domain = Domain::new(RANDOM_DOMAIN.0, RANDOM_DOMAIN.1)?;
        let points: Vec<ScoringPoint> = domain
            .linspace(RANDOM_POINTS)
            .map(ScoringPoint::at)
            .collect();

        for attempt in 1..=RANDOM_ATTEMPTS {
            let depth = rng.random_range(RANDOM_MIN_DEPTH..=RANDOM_MAX_DEPTH);
            let source = generate_with(rng, depth);
            let expression = parser.parse(&source)?;

            let failure = points
                .iter()
                .map(|point| expression.try_evaluate(point.x))
                .find_map(|result| match result {
                    Err(err @ EvalError::Domain { .. }) => Some(err),
                    _ => None,
                });
            match failure {
                Some(err) => debug!("Attempt {}: discarding '{}' ({})", attempt, source, err),
                None => {
                    return Ok(Self {
                        reference: FunctionSpec::new(source, domain),
                        expression,
                        points,
                    })
                }
            }
        }

        warn!("No usable random formula after {} attempts", RANDOM_ATTEMPTS);
        Err(TaskError::GenerationExhausted {
            attempts: RANDOM_ATTEMPTS,
        })
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        Task::new(record.reference, record.points)
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        TaskRecord {
            reference: task.reference,
            points: task.points,
        }
    }
}
