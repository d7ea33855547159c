//! Caller-facing summary of a finished run.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bc_types::{BcResult, OptimizationGoal, SearchConfig};

use crate::engine::{Objective, SearchEngine, SearchOutcome};
use crate::genotype::Genotype;
use crate::trace::ConvergenceTrace;

/// Unique run identifier.
pub type RunId = Uuid;

/// Best solution in all three representations plus the convergence trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub run_id: RunId,
    /// Goal the run was configured with.
    pub goal: OptimizationGoal,
    /// Direction fitness was actually compared in. Differs from `goal`
    /// when the goal was not respected.
    pub comparison: OptimizationGoal,
    pub best_binary: String,
    pub best_real: f64,
    /// `best_real` rounded to the space's decimal places for display.
    pub best_rounded: f64,
    pub best_fitness: f64,
    /// Decimal places of the space the run searched.
    pub decimal_places: u32,
    pub evaluations: u64,
    pub trace: ConvergenceTrace,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SearchReport {
    pub fn from_outcome(
        outcome: SearchOutcome,
        config: &SearchConfig,
        started_at: DateTime<Utc>,
    ) -> Self {
        let space = &config.space;
        let best_real = outcome.best.to_real(space);
        Self {
            run_id: Uuid::new_v4(),
            goal: config.goal,
            comparison: config.comparison(),
            best_binary: outcome.best.to_binary(),
            best_real,
            best_rounded: space.round(best_real),
            best_fitness: outcome.best_fitness,
            decimal_places: space.decimal_places(),
            evaluations: outcome.evaluations,
            trace: outcome.trace,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Parses `best_binary` back into a genotype. Fails on a report whose
    /// binary was edited or corrupted after serialization.
    pub fn best_genotype(&self) -> BcResult<Genotype> {
        Ok(Genotype::from_binary(&self.best_binary)?)
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// `true` when `self` is strictly better than `other` under `goal`.
    pub fn beats(&self, other: &SearchReport, goal: OptimizationGoal) -> bool {
        goal.improves(self.best_fitness, other.best_fitness)
    }
}

impl<R: Rng> SearchEngine<R> {
    /// Runs the engine and packages the outcome as a [`SearchReport`].
    pub fn run_report<O: Objective + ?Sized>(&mut self, objective: &O) -> SearchReport {
        let started_at = Utc::now();
        let outcome = self.run(objective);
        SearchReport::from_outcome(outcome, self.config(), started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bc_types::{BcError, CodecError, PrecisionSpace};

    fn report() -> SearchReport {
        let space = PrecisionSpace::by_bit_length(3, 0.0, 7.0).unwrap();
        let config = SearchConfig::new(space, 10, OptimizationGoal::Max);
        SearchEngine::from_seed(config, 4).run_report(&|x: f64| x)
    }

    #[test]
    fn report_carries_all_representations() {
        let report = report();
        assert_eq!(report.best_binary.len(), 3);
        let space = PrecisionSpace::by_bit_length(3, 0.0, 7.0).unwrap();
        assert_eq!(
            crate::codec::binary_to_real(&report.best_binary, &space).unwrap(),
            report.best_real
        );
        assert_eq!(report.best_fitness, report.best_real);
        assert_eq!(report.trace.len(), 10);
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn best_rounded_uses_space_rounding() {
        let space = PrecisionSpace::by_decimal_places(2, -1.0, 1.0).unwrap();
        let config = SearchConfig::new(space, 5, OptimizationGoal::Max);
        let report = SearchEngine::from_seed(config, 11).run_report(&|x: f64| -x * x);

        assert_eq!(report.decimal_places, 2);
        assert_eq!(report.best_rounded, space.round(report.best_real));
    }

    #[test]
    fn comparison_is_recorded_separately_from_goal() {
        let space = PrecisionSpace::by_bit_length(3, 0.0, 7.0).unwrap();
        let config = SearchConfig::new(space, 3, OptimizationGoal::Min);

        let inert = SearchEngine::from_seed(config, 1).run_report(&|x: f64| x);
        assert_eq!(inert.goal, OptimizationGoal::Min);
        assert_eq!(inert.comparison, OptimizationGoal::Max);

        let respected =
            SearchEngine::from_seed(config.with_respect_goal(true), 1).run_report(&|x: f64| x);
        assert_eq!(respected.comparison, OptimizationGoal::Min);
    }

    #[test]
    fn best_genotype_parses_binary() {
        let mut report = report();
        let genotype = report.best_genotype().unwrap();
        assert_eq!(genotype.to_binary(), report.best_binary);

        report.best_binary = "1x0".to_string();
        match report.best_genotype() {
            Err(BcError::Codec(CodecError::InvalidBinary { .. })) => (),
            other => panic!("expected codec error, got {other:?}"),
        }
    }

    #[test]
    fn comparison_follows_goal() {
        let mut high = report();
        high.best_fitness = 3.0;
        let mut low = report();
        low.best_fitness = 1.0;

        assert!(high.beats(&low, OptimizationGoal::Max));
        assert!(low.beats(&high, OptimizationGoal::Min));
        assert!(!high.beats(&high, OptimizationGoal::Max));
    }

    #[test]
    fn report_serialization_roundtrip() {
        let report = report();
        let json = serde_json::to_string(&report).unwrap();
        let decoded: SearchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, report);
    }
}
