//! Regression Tree (CART)
//!
//! Binary tree grown by variance reduction (squared-error splits).
//! Nodes live in a flat arena; node 0 is the root.

use std::cmp::Ordering;

use ndarray::ArrayView2;

/// Stop splitting below this impurity
const PURITY_EPSILON: f64 = 1e-12;

// ============================================================================
// PARAMETERS
// ============================================================================

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    /// None = grow until pure
    pub max_depth: Option<usize>,
    /// Minimum samples a node needs before it may split
    pub min_samples_split: usize,
    /// Minimum samples on each side of a split
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

// ============================================================================
// NODES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    /// Parent SSE minus children SSE
    gain: f64,
}

// ============================================================================
// TREE
// ============================================================================

#[derive(Debug, Clone)]
pub struct RegressionTree {
    nodes: Vec<Node>,
    /// Unnormalized impurity decrease per feature
    importances: Vec<f64>,
    depth: usize,
}

impl RegressionTree {
    /// Grow a tree on the rows of `x` listed in `indices` (repeats allowed)
    pub fn fit(x: ArrayView2<f64>, y: &[f64], indices: &[usize], params: &TreeParams) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            importances: vec![0.0; x.ncols()],
            depth: 0,
        };

        let mut indices = indices.to_vec();
        if !indices.is_empty() {
            tree.build(x, y, &mut indices, 0, params);
        } else {
            tree.nodes.push(Node::Leaf { value: 0.0 });
        }

        tree
    }

    /// Walk to a leaf. Missing trailing features read as 0.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { value } => return *value,
                Node::Split { feature, threshold, left, right } => {
                    let v = features.get(*feature).copied().unwrap_or(0.0);
                    id = if v <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Raw impurity decrease per feature
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    fn build(
        &mut self,
        x: ArrayView2<f64>,
        y: &[f64],
        indices: &mut [usize],
        depth: usize,
        params: &TreeParams,
    ) -> usize {
        let (sum, sum_sq) = indices
            .iter()
            .fold((0.0, 0.0), |(s, q), &i| (s + y[i], q + y[i] * y[i]));
        let n = indices.len() as f64;
        let sse = sum_sq - sum * sum / n;

        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { value: sum / n });
        self.depth = self.depth.max(depth);

        let depth_reached = params.max_depth.map_or(false, |d| depth >= d);
        if depth_reached
            || indices.len() < params.min_samples_split.max(2)
            || sse <= PURITY_EPSILON
        {
            return id;
        }

        let Some(split) = best_split(x, y, indices, sse, params.min_samples_leaf.max(1)) else {
            return id;
        };

        // Partition in place: left = value <= threshold
        let mut mid = 0;
        for k in 0..indices.len() {
            if x[[indices[k], split.feature]] <= split.threshold {
                indices.swap(mid, k);
                mid += 1;
            }
        }

        self.importances[split.feature] += split.gain;

        let (left_rows, right_rows) = indices.split_at_mut(mid);
        let left = self.build(x, y, left_rows, depth + 1, params);
        let right = self.build(x, y, right_rows, depth + 1, params);

        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };

        id
    }
}

/// Exhaustive search over every feature and every distinct cut point
fn best_split(
    x: ArrayView2<f64>,
    y: &[f64],
    indices: &[usize],
    parent_sse: f64,
    min_leaf: usize,
) -> Option<Split> {
    let n = indices.len();
    let (total_sum, total_sq) = indices
        .iter()
        .fold((0.0, 0.0), |(s, q), &i| (s + y[i], q + y[i] * y[i]));

    let mut best: Option<(f64, Split)> = None;
    let mut order = indices.to_vec();

    for feature in 0..x.ncols() {
        order.sort_by(|&a, &b| {
            x[[a, feature]]
                .partial_cmp(&x[[b, feature]])
                .unwrap_or(Ordering::Equal)
        });

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;

        for k in 0..n - 1 {
            let yi = y[order[k]];
            left_sum += yi;
            left_sq += yi * yi;

            let here = x[[order[k], feature]];
            let next = x[[order[k + 1], feature]];
            if here >= next {
                continue;
            }

            let n_left = k + 1;
            let n_right = n - n_left;
            if n_left < min_leaf || n_right < min_leaf {
                continue;
            }

            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / n_left as f64)
                + (right_sq - right_sum * right_sum / n_right as f64);

            if best.as_ref().map_or(true, |(b, _)| sse < *b) {
                let mut threshold = here + (next - here) / 2.0;
                // Midpoint can round up to `next` for adjacent floats
                if threshold >= next {
                    threshold = here;
                }
                best = Some((
                    sse,
                    Split {
                        feature,
                        threshold,
                        gain: (parent_sse - sse).max(0.0),
                    },
                ));
            }
        }
    }

    best.map(|(_, split)| split)
}
