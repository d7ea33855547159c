//! Run settings and validated search configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::{BcError, BcResult, SpaceError};
use crate::goal::{OptimizationGoal, SweepPolicy};
use crate::space::PrecisionSpace;

/// Which factory path derives the precision of a space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionSpec {
    StepSize(f64),
    DecimalPlaces(u32),
    BitLength(u32),
}

impl PrecisionSpec {
    /// Builds the space for `[low, high]` through the matching factory.
    pub fn build(self, low: f64, high: f64) -> Result<PrecisionSpace, SpaceError> {
        match self {
            Self::StepSize(step) => PrecisionSpace::by_step_size(step, low, high),
            Self::DecimalPlaces(places) => PrecisionSpace::by_decimal_places(places, low, high),
            Self::BitLength(bits) => PrecisionSpace::by_bit_length(bits, low, high),
        }
    }
}

impl Default for PrecisionSpec {
    fn default() -> Self {
        Self::StepSize(0.001)
    }
}

/// User-facing settings for a run, everything except the objective itself.
///
/// Nothing is validated until [`SearchSettings::config`] is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Lower bound of the interval (inclusive).
    pub low: f64,
    /// Upper bound of the interval (inclusive).
    pub high: f64,
    pub precision: PrecisionSpec,
    /// Number of generations `T`.
    pub generations: usize,
    pub goal: OptimizationGoal,
    /// Fixed seed for reproducible runs. `None` draws from entropy.
    pub seed: Option<u64>,
    pub sweep: SweepPolicy,
    /// Compare fitness in the direction of `goal`. When false the search
    /// always climbs toward larger values regardless of `goal`.
    pub respect_goal: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            low: -4.0,
            high: 12.0,
            precision: PrecisionSpec::default(),
            generations: 50,
            goal: OptimizationGoal::Max,
            seed: None,
            sweep: SweepPolicy::Greedy,
            respect_goal: false,
        }
    }
}

impl SearchSettings {
    pub fn new(low: f64, high: f64, precision: PrecisionSpec) -> Self {
        Self {
            low,
            high,
            precision,
            ..Self::default()
        }
    }

    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_goal(mut self, goal: OptimizationGoal) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_sweep(mut self, sweep: SweepPolicy) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn with_respect_goal(mut self, respect_goal: bool) -> Self {
        self.respect_goal = respect_goal;
        self
    }

    pub fn from_json_str(json: &str) -> BcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> BcResult<Self> {
        let path = path.as_ref();
        debug!("Loading search settings from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> BcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the interval and precision, building the space.
    pub fn space(&self) -> BcResult<PrecisionSpace> {
        Ok(self.precision.build(self.low, self.high)?)
    }

    /// Validates the settings into a [`SearchConfig`].
    pub fn config(&self) -> BcResult<SearchConfig> {
        let space = self.space()?;
        if self.respect_goal && self.goal == OptimizationGoal::Min {
            warn!("Goal-aware comparison enabled: the search will descend toward smaller values");
        }
        Ok(SearchConfig::new(space, self.generations, self.goal)
            .with_sweep(self.sweep)
            .with_respect_goal(self.respect_goal))
    }
}

/// A validated configuration handed to the search engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchConfig {
    pub space: PrecisionSpace,
    pub generations: usize,
    pub goal: OptimizationGoal,
    pub sweep: SweepPolicy,
    pub respect_goal: bool,
}

impl SearchConfig {
    pub fn new(space: PrecisionSpace, generations: usize, goal: OptimizationGoal) -> Self {
        Self {
            space,
            generations,
            goal,
            sweep: SweepPolicy::Greedy,
            respect_goal: false,
        }
    }

    pub fn with_sweep(mut self, sweep: SweepPolicy) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn with_respect_goal(mut self, respect_goal: bool) -> Self {
        self.respect_goal = respect_goal;
        self
    }

    /// The direction the comparison actually uses. Without `respect_goal`
    /// this is always [`OptimizationGoal::Max`].
    pub fn comparison(&self) -> OptimizationGoal {
        if self.respect_goal {
            self.goal
        } else {
            OptimizationGoal::Max
        }
    }
}

impl TryFrom<&SearchSettings> for SearchConfig {
    type Error = BcError;

    fn try_from(settings: &SearchSettings) -> BcResult<Self> {
        settings.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_form() {
        let settings = SearchSettings::default();
        assert_eq!(settings.low, -4.0);
        assert_eq!(settings.high, 12.0);
        assert_eq!(settings.precision, PrecisionSpec::StepSize(0.001));
        assert_eq!(settings.generations, 50);

        let config = settings.config().unwrap();
        assert_eq!(config.space.bit_length(), 14);
        assert_eq!(config.comparison(), OptimizationGoal::Max);
    }

    #[test]
    fn builder_chain() {
        let settings = SearchSettings::new(0.0, 7.0, PrecisionSpec::BitLength(3))
            .with_generations(10)
            .with_goal(OptimizationGoal::Min)
            .with_seed(42)
            .with_sweep(SweepPolicy::Steepest)
            .with_respect_goal(true);

        let config = settings.config().unwrap();
        assert_eq!(config.generations, 10);
        assert_eq!(config.sweep, SweepPolicy::Steepest);
        assert_eq!(config.comparison(), OptimizationGoal::Min);
        assert_eq!(settings.seed, Some(42));
    }

    #[test]
    fn goal_is_inert_without_respect_goal() {
        let config = SearchSettings::default()
            .with_goal(OptimizationGoal::Min)
            .config()
            .unwrap();
        assert_eq!(config.goal, OptimizationGoal::Min);
        assert_eq!(config.comparison(), OptimizationGoal::Max);
    }

    #[test]
    fn invalid_precision_fails_eagerly() {
        let settings = SearchSettings::new(0.0, 1.0, PrecisionSpec::BitLength(40));
        match settings.config() {
            Err(BcError::Space(SpaceError::BitLengthOutOfRange { bits: 40 })) => (),
            other => panic!("expected bit length error, got {other:?}"),
        }

        let settings = SearchSettings::new(3.0, 1.0, PrecisionSpec::DecimalPlaces(2));
        assert!(SearchConfig::try_from(&settings).is_err());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let settings = SearchSettings::from_json_str(
            r#"{ "low": 0.0, "high": 1.0, "precision": { "decimal_places": 2 }, "goal": "Min" }"#,
        )
        .unwrap();
        assert_eq!(settings.precision, PrecisionSpec::DecimalPlaces(2));
        assert_eq!(settings.goal, OptimizationGoal::Min);
        assert_eq!(settings.generations, 50);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = SearchSettings::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, BcError::Serialization(_)));
    }

    #[test]
    fn settings_file_roundtrip() {
        let settings = SearchSettings::new(-1.0, 2.0, PrecisionSpec::StepSize(0.1))
            .with_generations(5)
            .with_seed(7);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(settings.to_json_string().unwrap().as_bytes())
            .unwrap();

        let loaded = SearchSettings::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_settings_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SearchSettings::from_json_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, BcError::Io(_)));
    }
}
