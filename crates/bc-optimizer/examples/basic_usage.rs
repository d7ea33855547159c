use bc_optimizer::{best_of, codec, run_seeds, search, SearchEngine};
use bc_types::{OptimizationGoal, PrecisionSpace, PrecisionSpec, SearchSettings};
use tracing_subscriber::EnvFilter;

fn objective(x: f64) -> f64 {
    (x % 1.0) * ((20.0 * std::f64::consts::PI * x).cos() - x.sin())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("bitclimb basic usage example");

    // Three ways to describe the same precision
    let space = PrecisionSpace::by_step_size(0.001, -4.0, 12.0)?;
    let same = PrecisionSpace::by_bit_length(space.bit_length(), -4.0, 12.0)?;
    println!(
        "Space [-4, 12]: step {}, {} bits, {} decimal places (by bit length: step {})",
        space.step_size(),
        space.bit_length(),
        space.decimal_places(),
        same.step_size()
    );
    println!("x = 5.5 encodes as {}", codec::real_to_binary(5.5, &space));

    // A single seeded run
    let settings = SearchSettings::new(-4.0, 12.0, PrecisionSpec::StepSize(0.001))
        .with_generations(50)
        .with_seed(2024);
    let report = search(&settings, &objective)?;
    println!(
        "Best x = {} ({}), f(x) = {:.3}, {} sweeps over {} generations",
        report.best_rounded,
        report.best_binary,
        report.best_fitness,
        report.trace.sweep_count(),
        report.trace.len()
    );
    println!("Per-generation bests: {:?}", report.trace.generation_bests());

    // Engine driven directly
    let config = settings.config()?;
    let outcome = SearchEngine::from_seed(config, 7).run(&objective);
    println!("Seed 7 found {} after {} evaluations", outcome.best, outcome.evaluations);

    // Independent seeds in parallel
    let reports = run_seeds(&settings, &objective, &[1, 2, 3, 4, 5, 6, 7, 8])?;
    if let Some(best) = best_of(&reports, OptimizationGoal::Max) {
        println!(
            "Best of {} runs: x = {}, f(x) = {:.3}",
            reports.len(),
            best.best_rounded,
            best.best_fitness
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
