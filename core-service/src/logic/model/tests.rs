use super::evaluation::{mean_absolute_error, r2_score, train_test_split};
use super::{CalibratedThresholds, ForestParams, ImpactRegressor, RandomForest, TrainingError};
use ndarray::{Array2, Axis};

/// y = 0.1 below x=10.5, 0.9 above; second column is constant
fn step_data() -> (Array2<f64>, Vec<f64>) {
    let rows: Vec<f64> = (1..=20).flat_map(|i| [i as f64, 7.0]).collect();
    let x = Array2::from_shape_vec((20, 2), rows).unwrap();
    let y = (1..=20).map(|i| if i <= 10 { 0.1 } else { 0.9 }).collect();
    (x, y)
}

fn small_params() -> ForestParams {
    ForestParams { n_trees: 25, ..Default::default() }
}

#[test]
fn test_forest_default_params() {
    let params = ForestParams::default();
    assert_eq!(params.n_trees, 140);
    assert_eq!(params.seed, 42);
    assert_eq!(params.min_samples_split, 2);
    assert!(params.max_depth.is_none());
}

#[test]
fn test_forest_learns_step() {
    let (x, y) = step_data();
    let forest = RandomForest::fit(x.view(), &y, &small_params()).unwrap();

    assert_eq!(forest.n_trees(), 25);
    assert!(forest.predict(&[2.0, 7.0]) < 0.2);
    assert!(forest.predict(&[19.0, 7.0]) > 0.8);
}

#[test]
fn test_forest_is_reproducible_with_seed() {
    let (x, y) = step_data();
    let a = RandomForest::fit(x.view(), &y, &small_params()).unwrap();
    let b = RandomForest::fit(x.view(), &y, &small_params()).unwrap();

    for probe in [0.0, 5.5, 10.4, 10.6, 15.0, 30.0] {
        assert_eq!(a.predict(&[probe, 7.0]), b.predict(&[probe, 7.0]));
    }
    assert_eq!(a.feature_importances(), b.feature_importances());
}

#[test]
fn test_forest_importances_normalized() {
    let (x, y) = step_data();
    let forest = RandomForest::fit(x.view(), &y, &small_params()).unwrap();
    let imp = forest.feature_importances();

    assert_eq!(imp.len(), 2);
    assert!((imp.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    // Constant column can never split
    assert_eq!(imp[1], 0.0);
}

#[test]
fn test_forest_through_trait_object() {
    let (x, y) = step_data();
    let forest = RandomForest::fit(x.view(), &y, &small_params()).unwrap();
    let model: Box<dyn ImpactRegressor> = Box::new(forest);

    assert_eq!(model.name(), "random_forest");
    assert_eq!(model.size(), 25);
    assert!(model.feature_importances().is_some());
    assert!(model.predict(&[1.0, 7.0]) < 0.2);
}

#[test]
fn test_forest_training_errors() {
    let empty = Array2::<f64>::zeros((0, 3));
    assert_eq!(
        RandomForest::fit(empty.view(), &[], &ForestParams::default()).unwrap_err(),
        TrainingError::EmptyTrainingSet
    );

    let (x, _) = step_data();
    assert_eq!(
        RandomForest::fit(x.view(), &[0.5; 3], &ForestParams::default()).unwrap_err(),
        TrainingError::ShapeMismatch { rows: 20, targets: 3 }
    );

    let (x, y) = step_data();
    let params = ForestParams { n_trees: 0, ..Default::default() };
    assert_eq!(
        RandomForest::fit(x.view(), &y, &params).unwrap_err(),
        TrainingError::NoTrees
    );
}

#[test]
fn test_forest_batch_matches_single() {
    let (x, y) = step_data();
    let forest = RandomForest::fit(x.view(), &y, &small_params()).unwrap();
    let batch = forest.predict_batch(x.view());

    for (row, predicted) in x.rows().into_iter().zip(&batch) {
        assert_eq!(forest.predict(&row.to_vec()), *predicted);
    }
}

#[test]
fn test_danger_never_below_warn() {
    let datasets: Vec<Vec<f64>> = vec![
        (0..10).map(|i| i as f64).collect(),
        (0..37).map(|i| ((i * 13) % 37) as f64 / 37.0).collect(),
        (0..25).map(|i| (i as f64).powi(3) - 40.0 * i as f64).collect(),
        (0..12).map(|i| if i % 2 == 0 { -(i as f64) } else { i as f64 * 0.01 }).collect(),
    ];

    for targets in datasets {
        let t = CalibratedThresholds::calibrate(&targets).unwrap();
        assert!(t.danger() >= t.warn(), "{targets:?}");
    }
}

#[test]
fn test_holdout_evaluation_on_step() {
    let (x, y) = step_data();
    let split = train_test_split(y.len(), 0.2, 42);

    let x_train = x.select(Axis(0), &split.train);
    let y_train: Vec<f64> = split.train.iter().map(|&i| y[i]).collect();
    let forest = RandomForest::fit(x_train.view(), &y_train, &small_params()).unwrap();

    let x_test = x.select(Axis(0), &split.test);
    let y_test: Vec<f64> = split.test.iter().map(|&i| y[i]).collect();
    let predicted = forest.predict_batch(x_test.view());

    assert_eq!(y_test.len(), 4);
    assert!(mean_absolute_error(&y_test, &predicted) < 0.4);
    assert!(r2_score(&y_test, &predicted) <= 1.0);
}
