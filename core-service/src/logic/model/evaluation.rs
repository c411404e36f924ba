//! Hold-out split and regression metrics

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Below this many rows everything is used for training
pub const MIN_ROWS_FOR_HOLDOUT: usize = 5;

/// Row indices for training and hold-out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Split {
    pub fn has_holdout(&self) -> bool {
        !self.test.is_empty()
    }
}

/// Metrics on the hold-out rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldoutMetrics {
    pub mae: f64,
    pub r2: f64,
}

/// Seeded shuffle, then the first `ceil(n * fraction)` rows are held out
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Split {
    let fraction = test_fraction.clamp(0.0, 1.0);
    if n < MIN_ROWS_FOR_HOLDOUT || fraction == 0.0 {
        return Split {
            train: (0..n).collect(),
            test: Vec::new(),
        };
    }

    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    // Always leave at least one training row
    let n_test = ((n as f64 * fraction).ceil() as usize).min(n - 1);
    let train = order.split_off(n_test);

    Split { train, test: order }
}

pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Coefficient of determination. A constant target scores 1.0 when matched
/// exactly and 0.0 otherwise.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }

    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes_and_disjoint() {
        let split = train_test_split(10, 0.2, 42);
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 8);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_seeded() {
        assert_eq!(train_test_split(50, 0.2, 7), train_test_split(50, 0.2, 7));
    }

    #[test]
    fn test_small_dataset_has_no_holdout() {
        let split = train_test_split(4, 0.2, 42);
        assert!(!split.has_holdout());
        assert_eq!(split.train, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_split_keeps_a_training_row() {
        let split = train_test_split(5, 1.0, 42);
        assert_eq!(split.train.len(), 1);
        assert_eq!(split.test.len(), 4);
    }

    #[test]
    fn test_metrics() {
        let actual = [1.0, 2.0, 3.0];
        assert_eq!(mean_absolute_error(&actual, &[1.0, 2.0, 4.0]), 1.0 / 3.0);
        assert_eq!(r2_score(&actual, &actual), 1.0);
        assert_eq!(r2_score(&actual, &[2.0, 2.0, 2.0]), 0.0);
        assert_eq!(r2_score(&[1.0, 1.0], &[1.0, 1.0]), 1.0);
    }
}
