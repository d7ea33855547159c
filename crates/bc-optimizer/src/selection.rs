//! Fitness-proportional selection primitives.
//!
//! None of these are used by [`crate::SearchEngine`]; they back
//! selection-based variants that pick genotypes by roulette wheel.

use rand::Rng;

use bc_types::{validation_error, BcResult, OptimizationGoal};

/// Smallest index `i` with `cdf[i] >= r`, found by binary search over an
/// ascending slice.
///
/// A threshold above every entry maps to the last index, and an empty
/// slice yields `0`.
pub fn cdf_index(r: f64, cdf: &[f64]) -> usize {
    let index = cdf.partition_point(|&q| q < r);
    index.min(cdf.len().saturating_sub(1))
}

/// Normalized running sums of non-negative `weights`, ending at `1.0`.
pub fn cumulative_distribution(weights: &[f64]) -> BcResult<Vec<f64>> {
    if let Some(bad) = weights.iter().find(|w| !(w.is_finite() && **w >= 0.0)) {
        return Err(validation_error!(
            "Selection weight must be finite and non-negative, got {}",
            bad
        ));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(validation_error!("Selection weights sum to zero"));
    }

    let mut running = 0.0;
    let mut cdf: Vec<f64> = weights
        .iter()
        .map(|w| {
            running += w;
            running / total
        })
        .collect();
    if let Some(last) = cdf.last_mut() {
        *last = 1.0;
    }
    Ok(cdf)
}

/// Draws an index from `cdf` with probability proportional to its bucket.
pub fn roulette_select<R: Rng + ?Sized>(rng: &mut R, cdf: &[f64]) -> usize {
    cdf_index(rng.gen::<f64>(), cdf)
}

/// Shifts a raw objective value into a positive selection weight.
///
/// For [`OptimizationGoal::Max`] `extreme` is the smallest observed value
/// and the weight is `fx - extreme + offset`. For [`OptimizationGoal::Min`]
/// `extreme` is the largest observed value and the weight is
/// `-(fx - extreme) + offset`.
pub fn scaled_fitness(fx: f64, goal: OptimizationGoal, extreme: f64, offset: f64) -> f64 {
    match goal {
        OptimizationGoal::Max => fx - extreme + offset,
        OptimizationGoal::Min => -(fx - extreme) + offset,
    }
}

/// Starting value for tracking the extreme opposite to `goal`, so the first
/// observation always replaces it.
pub fn opposite_extreme(goal: OptimizationGoal) -> f64 {
    match goal {
        OptimizationGoal::Max => f64::MAX,
        OptimizationGoal::Min => f64::MIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn cdf_lookup_example() {
        assert_eq!(cdf_index(0.35, &[0.1, 0.3, 0.5, 0.9, 1.0]), 2);
    }

    #[test]
    fn cdf_lookup_edges() {
        let cdf = [0.1, 0.3, 0.5, 0.9, 1.0];
        assert_eq!(cdf_index(0.0, &cdf), 0);
        assert_eq!(cdf_index(0.1, &cdf), 0);
        assert_eq!(cdf_index(0.3, &cdf), 1);
        assert_eq!(cdf_index(1.0, &cdf), 4);
        assert_eq!(cdf_index(1.5, &cdf), 4);
        assert_eq!(cdf_index(0.5, &[]), 0);
    }

    #[test]
    fn cumulative_distribution_is_normalized() {
        let cdf = cumulative_distribution(&[1.0, 1.0, 2.0]).unwrap();
        assert_eq!(cdf, vec![0.25, 0.5, 1.0]);
    }

    #[test]
    fn invalid_weights_are_rejected() {
        assert!(cumulative_distribution(&[1.0, -1.0]).is_err());
        assert!(cumulative_distribution(&[0.0, 0.0]).is_err());
        assert!(cumulative_distribution(&[]).is_err());
        assert!(cumulative_distribution(&[f64::NAN]).is_err());
    }

    #[test]
    fn roulette_never_picks_empty_bucket() {
        let cdf = cumulative_distribution(&[1.0, 0.0, 3.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..500 {
            assert_ne!(roulette_select(&mut rng, &cdf), 1);
        }
    }

    #[test]
    fn scaling_keeps_weights_positive() {
        let values = [-3.0, 0.5, 4.0];
        let min = values.iter().copied().fold(opposite_extreme(OptimizationGoal::Max), f64::min);
        let max = values.iter().copied().fold(opposite_extreme(OptimizationGoal::Min), f64::max);
        assert_eq!(min, -3.0);
        assert_eq!(max, 4.0);

        let offset = 0.001;
        for fx in values {
            assert!(scaled_fitness(fx, OptimizationGoal::Max, min, offset) > 0.0);
            assert!(scaled_fitness(fx, OptimizationGoal::Min, max, offset) > 0.0);
        }
        assert_eq!(scaled_fitness(-3.0, OptimizationGoal::Max, min, offset), offset);
        assert_eq!(scaled_fitness(4.0, OptimizationGoal::Min, max, offset), offset);
    }
}
