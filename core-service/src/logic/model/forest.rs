//! Random Forest Ensemble
//!
//! Bagged regression trees for the health-impact score.
//! Bootstrap rows are drawn with replacement from a seeded RNG, so a given
//! dataset + seed always produces the same forest.

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::inference::ImpactRegressor;
use super::tree::{RegressionTree, TreeParams};
use crate::constants::{DEFAULT_SEED, DEFAULT_TREE_COUNT};

// ============================================================================
// PARAMETERS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    /// None = grow until pure
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_TREE_COUNT,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            seed: DEFAULT_SEED,
        }
    }
}

impl ForestParams {
    fn tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            min_samples_leaf: self.min_samples_leaf,
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainingError {
    #[error("no training rows")]
    EmptyTrainingSet,

    #[error("feature matrix has {rows} rows but {targets} targets were given")]
    ShapeMismatch { rows: usize, targets: usize },

    #[error("forest needs at least one tree")]
    NoTrees,
}

// ============================================================================
// RANDOM FOREST
// ============================================================================

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
    /// Normalized, sums to 1 (or all zero when no tree split)
    importances: Vec<f64>,
}

impl RandomForest {
    /// Fit the forest on a design matrix and its targets
    pub fn fit(x: ArrayView2<f64>, y: &[f64], params: &ForestParams) -> Result<Self, TrainingError> {
        let n = x.nrows();
        if n == 0 {
            return Err(TrainingError::EmptyTrainingSet);
        }
        if n != y.len() {
            return Err(TrainingError::ShapeMismatch { rows: n, targets: y.len() });
        }
        if params.n_trees == 0 {
            return Err(TrainingError::NoTrees);
        }

        let tree_params = params.tree_params();
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.n_trees);

        for _ in 0..params.n_trees {
            // Bootstrap sample
            let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            trees.push(RegressionTree::fit(x, y, &bootstrap, &tree_params));
        }

        let importances = aggregate_importances(&trees, x.ncols());
        let mean_depth = trees.iter().map(|t| t.depth() as f64).sum::<f64>() / trees.len() as f64;
        log::debug!(
            "Random forest fitted: {} trees, {} rows, {} features, mean depth {:.1}",
            trees.len(),
            n,
            x.ncols(),
            mean_depth
        );

        Ok(Self { trees, importances })
    }

    /// Mean prediction over all trees
    pub fn predict(&self, features: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        total / self.trees.len() as f64
    }

    /// Predict every row of a matrix
    pub fn predict_batch(&self, x: ArrayView2<f64>) -> Vec<f64> {
        x.rows()
            .into_iter()
            .map(|row| match row.as_slice() {
                Some(slice) => self.predict(slice),
                None => self.predict(&row.to_vec()),
            })
            .collect()
    }

    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl ImpactRegressor for RandomForest {
    fn predict(&self, features: &[f64]) -> f64 {
        RandomForest::predict(self, features)
    }

    fn name(&self) -> &str {
        "random_forest"
    }

    fn feature_importances(&self) -> Option<&[f64]> {
        Some(&self.importances)
    }

    fn size(&self) -> usize {
        self.trees.len()
    }
}

/// Per-tree normalize, average, renormalize
fn aggregate_importances(trees: &[RegressionTree], n_features: usize) -> Vec<f64> {
    let mut importances = vec![0.0; n_features];

    for tree in trees {
        let raw = tree.feature_importances();
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            continue;
        }
        for (acc, &imp) in importances.iter_mut().zip(raw) {
            *acc += imp / total;
        }
    }

    let total: f64 = importances.iter().sum();
    if total > 0.0 {
        for imp in &mut importances {
            *imp /= total;
        }
    }

    importances
}
