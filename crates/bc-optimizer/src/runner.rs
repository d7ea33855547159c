//! Running searches straight from [`SearchSettings`].

use rayon::prelude::*;
use tracing::info;

use bc_types::{BcResult, OptimizationGoal, SearchSettings};

use crate::engine::{Objective, SearchEngine};
use crate::report::SearchReport;

/// Validates `settings` and runs one search, seeded from `settings.seed`
/// when present.
pub fn search<O: Objective + ?Sized>(
    settings: &SearchSettings,
    objective: &O,
) -> BcResult<SearchReport> {
    let config = settings.config()?;
    let mut engine = match settings.seed {
        Some(seed) => SearchEngine::from_seed(config, seed),
        None => SearchEngine::from_entropy(config),
    };
    Ok(engine.run_report(objective))
}

/// Runs one independent search per seed in parallel.
///
/// Every run owns its own generator, so the reports are identical to
/// running the seeds one after another. Reports come back in seed order.
pub fn run_seeds<O>(
    settings: &SearchSettings,
    objective: &O,
    seeds: &[u64],
) -> BcResult<Vec<SearchReport>>
where
    O: Objective + Sync + ?Sized,
{
    let config = settings.config()?;
    info!("Running {} independent searches", seeds.len());

    Ok(seeds
        .par_iter()
        .map(|&seed| SearchEngine::from_seed(config, seed).run_report(objective))
        .collect())
}

/// The best report under `goal`. The earliest report wins ties.
pub fn best_of(reports: &[SearchReport], goal: OptimizationGoal) -> Option<&SearchReport> {
    reports.iter().fold(None, |best, report| match best {
        Some(current) if !report.beats(current, goal) => Some(current),
        _ => Some(report),
    })
}
