use integrator::{Domain, FunctionSpec, ScoringPoint, Task};

fn main() {
    pretty_env_logger::init();

    let domain = Domain::new(0.0, 2.0).expect("valid domain");
    let reference = FunctionSpec::new("3 + exp((-x^9 - 7*x)/2)", domain);
    let points = domain.linspace(10).map(ScoringPoint::at).collect();
    let task = Task::new(reference, points).expect("Failed to build task");

    println!("Find f with f'(x) = {}", task.expression());
    println!("LaTeX: {}", task.expression().to_latex());

    for submission in ["3*x", "3*x + x^2", "sin(x) *", "3*x + exp(x)"] {
        match task.grade(submission) {
            Ok(score) => println!("{:>14} -> {}%", submission, score),
            Err(err) => println!("{:>14} -> could not parse function: {}", submission, err),
        }
    }
}
