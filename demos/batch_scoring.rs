use integrator::cache::ExpressionCache;
use integrator::guard::score_within;
use integrator::{Parser, Scorer, ScoringPoint};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let cache = ExpressionCache::new(64);
    let reference = cache.get("2*x*cos(x^2)").expect("Failed to parse");
    let points: Vec<ScoringPoint> = integrator::task::linspace(-2.0, 2.0, 40)
        .map(ScoringPoint::at)
        .collect();

    let submissions = [
        "sin(x^2)",
        "sin(x^2) + pi",
        "cos(x^2)",
        "x^2",
        "sin(x^2",
        "10^(10^x)",
    ];

    let scorer = Scorer::default();
    let grades = scorer.grade_many(&Parser::default(), &reference, &submissions, &points);
    for (submission, grade) in submissions.iter().zip(&grades) {
        match grade {
            Ok(score) => println!("{:>16} -> {}%", submission, score),
            Err(err) => println!("{:>16} -> could not parse function: {}", submission, err),
        }
    }

    // the same grading, one submission at a time under a wall-clock limit
    let scorer = Arc::new(scorer);
    let points: Arc<[ScoringPoint]> = points.into();
    for submission in submissions {
        let Ok(submitted) = cache.get(submission) else {
            continue;
        };
        let result = score_within(
            Arc::clone(&scorer),
            Arc::clone(&reference),
            submitted,
            Arc::clone(&points),
            Duration::from_millis(250),
        )
        .await;
        match result {
            Ok(score) => println!("{:>16} -> {}% (guarded)", submission, score),
            Err(err) => println!("{:>16} -> {}", submission, err),
        }
    }
}
