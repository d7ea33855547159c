//! Iterated bit-flip local search.
//!
//! A run keeps one global incumbent for its whole lifetime. Each generation
//! starts from a fresh random genotype and sweeps its single-bit neighbours
//! until a full sweep no longer improves the incumbent (a local optimum).
//! After every sweep the search moves to the incumbent, so later sweeps
//! explore around the best point found so far.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use bc_types::{OptimizationGoal, PrecisionSpace, SearchConfig, SweepPolicy};

use crate::genotype::Genotype;
use crate::trace::{ConvergenceTrace, TraceBuilder};

/// A real-valued objective of one real variable.
///
/// Implemented for every `Fn(f64) -> f64`, so closures can be passed
/// directly.
pub trait Objective {
    fn evaluate(&self, x: f64) -> f64;
}

impl<F> Objective for F
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> f64 {
        self(x)
    }
}

/// What a finished run hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub best: Genotype,
    pub best_fitness: f64,
    pub trace: ConvergenceTrace,
    /// Objective calls made during the run.
    pub evaluations: u64,
}

/// Local search engine owning its random source.
///
/// Engines never share a generator, so separate engines can run on separate
/// threads and still reproduce their results from a seed.
#[derive(Debug, Clone)]
pub struct SearchEngine<R = ChaCha8Rng> {
    config: SearchConfig,
    rng: R,
}

impl SearchEngine<ChaCha8Rng> {
    pub fn from_seed(config: SearchConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: SearchConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Replaces the random source with a freshly seeded one.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}

impl<R: Rng> SearchEngine<R> {
    pub fn with_rng(config: SearchConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs all configured generations against `objective`.
    ///
    /// Never fails: the configuration was validated when it was built and
    /// the objective is assumed total.
    pub fn run<O: Objective + ?Sized>(&mut self, objective: &O) -> SearchOutcome {
        let space = self.config.space;
        let bits = space.bit_length();
        let generations = self.config.generations;
        let direction = self.config.comparison();

        info!(
            "Starting local search: {} generations, {} bit genotypes over [{}, {}]",
            generations,
            bits,
            space.low(),
            space.high()
        );
        if direction != self.config.goal {
            debug!(
                "Configured goal {} is not used for comparison, climbing toward larger values",
                self.config.goal
            );
        }

        let mut evaluator = Evaluator::new(objective, &space);
        let mut incumbent = Incumbent::new(Genotype::random(&mut self.rng, bits), &mut evaluator);
        let mut history = TraceBuilder::with_capacity(generations);

        for generation in 0..generations {
            let mut current = Genotype::random(&mut self.rng, bits);
            let mut sweeps = 0usize;

            loop {
                history.record(incumbent.fitness);
                sweeps += 1;

                let improved = match self.config.sweep {
                    SweepPolicy::Greedy => {
                        greedy_sweep(current, &mut incumbent, &mut evaluator, direction)
                    }
                    SweepPolicy::Steepest => {
                        steepest_sweep(current, &mut incumbent, &mut evaluator, direction)
                    }
                };
                current = incumbent.genotype;

                if !improved {
                    break;
                }
            }

            history.next_generation();
            debug!(
                generation,
                sweeps,
                fitness = incumbent.fitness,
                "Generation reached a local optimum"
            );
        }

        info!(
            "Local search finished: best {} (f = {}) after {} evaluations",
            incumbent.genotype,
            incumbent.fitness,
            evaluator.calls
        );

        SearchOutcome {
            best: incumbent.genotype,
            best_fitness: incumbent.fitness,
            trace: history.build(),
            evaluations: evaluator.calls,
        }
    }
}

/// Decodes genotypes and counts objective calls.
struct Evaluator<'a, O: ?Sized> {
    objective: &'a O,
    space: &'a PrecisionSpace,
    calls: u64,
}

impl<'a, O: Objective + ?Sized> Evaluator<'a, O> {
    fn new(objective: &'a O, space: &'a PrecisionSpace) -> Self {
        Self {
            objective,
            space,
            calls: 0,
        }
    }

    fn fitness(&mut self, genotype: Genotype) -> f64 {
        self.calls += 1;
        self.objective.evaluate(genotype.to_real(self.space))
    }
}

struct Incumbent {
    genotype: Genotype,
    fitness: f64,
}

impl Incumbent {
    fn new<O: Objective + ?Sized>(genotype: Genotype, evaluator: &mut Evaluator<'_, O>) -> Self {
        let fitness = evaluator.fitness(genotype);
        if !fitness.is_finite() {
            warn!("Initial incumbent {} has non-finite fitness {}", genotype, fitness);
        }
        Self { genotype, fitness }
    }

    fn adopt(&mut self, genotype: Genotype, fitness: f64) {
        trace!("Adopting {} (f = {}) over {}", genotype, fitness, self.fitness);
        if !fitness.is_finite() {
            warn!("Incumbent {} has non-finite fitness {}", genotype, fitness);
        }
        self.genotype = genotype;
        self.fitness = fitness;
    }
}

/// Adopts each improving neighbour of `current` as soon as it is found.
/// Later neighbours must beat the updated incumbent.
fn greedy_sweep<O: Objective + ?Sized>(
    current: Genotype,
    incumbent: &mut Incumbent,
    evaluator: &mut Evaluator<'_, O>,
    direction: OptimizationGoal,
) -> bool {
    let mut improved = false;
    for neighbour in current.neighbours() {
        let fitness = evaluator.fitness(neighbour);
        if direction.improves(fitness, incumbent.fitness) {
            incumbent.adopt(neighbour, fitness);
            improved = true;
        }
    }
    improved
}

/// Evaluates every neighbour of `current`, then adopts the best one if it
/// beats the incumbent. Ties keep the lowest bit position.
fn steepest_sweep<O: Objective + ?Sized>(
    current: Genotype,
    incumbent: &mut Incumbent,
    evaluator: &mut Evaluator<'_, O>,
    direction: OptimizationGoal,
) -> bool {
    let mut best: Option<(Genotype, f64)> = None;
    for neighbour in current.neighbours() {
        let fitness = evaluator.fitness(neighbour);
        let replace = match best {
            None => true,
            Some((_, best_fitness)) => direction.improves(fitness, best_fitness),
        };
        if replace {
            best = Some((neighbour, fitness));
        }
    }

    match best {
        Some((neighbour, fitness)) if direction.improves(fitness, incumbent.fitness) => {
            incumbent.adopt(neighbour, fitness);
            true
        }
        _ => false,
    }
}
