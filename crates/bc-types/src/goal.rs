//! Optimization direction and neighbourhood sweep policy.

use serde::{Deserialize, Serialize};

/// Whether the objective should be maximized or minimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptimizationGoal {
    Max,
    Min,
}

impl Default for OptimizationGoal {
    fn default() -> Self {
        Self::Max
    }
}

impl OptimizationGoal {
    /// Strict improvement test of `candidate` over `incumbent` in this direction.
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Self::Max => candidate > incumbent,
            Self::Min => candidate < incumbent,
        }
    }
}

impl std::fmt::Display for OptimizationGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Max => write!(f, "max"),
            Self::Min => write!(f, "min"),
        }
    }
}

/// How a sweep over the single-bit neighbours of the current point adopts
/// improvements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweepPolicy {
    /// Adopt every improving neighbour immediately, comparing later
    /// neighbours against the updated incumbent.
    Greedy,
    /// Evaluate every neighbour first, then adopt only the best one.
    Steepest,
}

impl Default for SweepPolicy {
    fn default() -> Self {
        Self::Greedy
    }
}
