//! Wall-clock limits around evaluation and scoring of untrusted formulas.
//!
//! The work runs on tokio's blocking pool. A computation that overruns is not
//! interrupted; it finishes in the background and its result is dropped.

use crate::ast::Expression;
use crate::error::GuardError;
use crate::scoring::{Scorer, ScoringPoint};
use log::warn;
use std::sync::Arc;
use std::time::Duration;
use tokio::task;
use tokio::time;

pub async fn within<T, F>(limit: Duration, work: F) -> Result<T, GuardError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match time::timeout(limit, task::spawn_blocking(work)).await {
        Ok(joined) => Ok(joined?),
        Err(_) => {
            warn!("Computation did not finish within {:?}", limit);
            Err(GuardError::TimedOut(limit))
        }
    }
}

pub async fn evaluate_within(
    expression: Arc<Expression>,
    x: f64,
    limit: Duration,
) -> Result<f64, GuardError> {
    within(limit, move || expression.evaluate(x)).await
}

pub async fn score_within(
    scorer: Arc<Scorer>,
    reference: Arc<Expression>,
    submitted: Arc<Expression>,
    points: Arc<[ScoringPoint]>,
    limit: Duration,
) -> Result<u8, GuardError> {
    within(limit, move || scorer.score(&reference, submitted.as_ref(), &points)).await
}
