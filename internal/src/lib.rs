pub mod pretty;

use model::config::CacheConfig;
use model::json_serialisation::load_program_from_json;
use solution::json_serialisation::schedule_to_json;
use solution::Schedule;
use solver::registry::OptimizerSpec;

use std::sync::atomic::AtomicBool;
use std::time as stdtime;

/// Loads the program, runs the configured optimizer on an empty schedule and
/// returns the json output together with the per-room schedule table.
pub fn run(
    input_data: serde_json::Value,
    spec_data: serde_json::Value,
) -> (serde_json::Value, String) {
    let cache_config: CacheConfig = spec_data
        .get("caches")
        .cloned()
        .map(|json| serde_json::from_value(json).expect("Error parsing cache configuration"))
        .unwrap_or_default();
    let optimizer_spec = spec_data
        .get("optimizer")
        .cloned()
        .map(|json| OptimizerSpec::from_json(json).expect("Error parsing optimizer spec"))
        .unwrap_or_default();

    let program =
        load_program_from_json(input_data, cache_config).expect("Error loading program");
    let optimizer = optimizer_spec
        .resolve()
        .expect("Error resolving optimizer spec");

    let start_time = stdtime::Instant::now();
    let cancel = AtomicBool::new(false);
    let final_solution = optimizer.optimize(Schedule::empty(program.clone()), &cancel);
    let runtime_duration = stdtime::Instant::now().duration_since(start_time);

    println!("\n\nFinal schedule:");
    println!("{}", final_solution.schedule());

    let room_table = pretty::room_table_csv(final_solution.schedule());
    println!("{}", room_table);

    println!("Final score: {:.3}", final_solution.score());
    println!("Running time: {:0.2}sec", runtime_duration.as_secs_f32());

    let json_output = serde_json::json!({
        "program": program.name(),
        "score": final_solution.score(),
        "schedule": schedule_to_json(final_solution.schedule()),
    });
    (json_output, room_table)
}
