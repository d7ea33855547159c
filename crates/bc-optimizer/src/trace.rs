//! Convergence history of a search run.

use serde::{Deserialize, Serialize};

/// Per generation, the incumbent fitness recorded before each sweep.
///
/// Only produced by [`TraceBuilder::build`]; read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceTrace {
    generations: Vec<Vec<f64>>,
}

impl ConvergenceTrace {
    pub fn generations(&self) -> &[Vec<f64>] {
        &self.generations
    }

    pub fn generation(&self, index: usize) -> Option<&[f64]> {
        self.generations.get(index).map(Vec::as_slice)
    }

    /// Number of generations recorded.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Total number of sweeps across all generations.
    pub fn sweep_count(&self) -> usize {
        self.generations.iter().map(Vec::len).sum()
    }

    /// All recorded values in run order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.generations.iter().flatten().copied()
    }

    /// Last value recorded in each generation.
    pub fn generation_bests(&self) -> Vec<f64> {
        self.generations
            .iter()
            .filter_map(|sweeps| sweeps.last().copied())
            .collect()
    }

    pub fn into_inner(self) -> Vec<Vec<f64>> {
        self.generations
    }
}

/// Append-only accumulator filled while a run is in progress.
#[derive(Debug, Default)]
pub struct TraceBuilder {
    generations: Vec<Vec<f64>>,
    current: Vec<f64>,
}

impl TraceBuilder {
    pub fn with_capacity(generations: usize) -> Self {
        Self {
            generations: Vec::with_capacity(generations),
            current: Vec::new(),
        }
    }

    /// Records the incumbent fitness ahead of a sweep.
    pub fn record(&mut self, fitness: f64) {
        self.current.push(fitness);
    }

    /// Closes the open generation and starts the next one.
    pub fn next_generation(&mut self) {
        self.generations.push(std::mem::take(&mut self.current));
    }

    /// Finishes the trace. Values recorded after the last
    /// [`TraceBuilder::next_generation`] are discarded.
    pub fn build(self) -> ConvergenceTrace {
        ConvergenceTrace {
            generations: self.generations,
        }
    }
}
