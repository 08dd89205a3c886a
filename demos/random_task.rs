use integrator::Task;

fn main() {
    pretty_env_logger::init();

    let task = Task::random().expect("Failed to generate a task");
    let reference = task.reference();
    println!("Reference derivative: {}", reference.source);
    println!(
        "Domain: [{}, {}], {} scoring points",
        reference.domain.lo(),
        reference.domain.hi(),
        task.points().len()
    );

    match serde_json::to_string_pretty(&task) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("Error: {}", err),
    }
}
