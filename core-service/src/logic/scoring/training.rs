//! One-shot training from the historical dataset

use std::time::Instant;

use chrono::{DateTime, Utc};
use ndarray::Axis;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TEST_FRACTION;
use crate::logic::dataset::HistoricalDataset;
use crate::logic::error::StartupError;
use crate::logic::features::{FeatureEncoder, LayoutInfo};
use crate::logic::model::evaluation::{mean_absolute_error, r2_score, train_test_split};
use crate::logic::model::{
    CalibratedThresholds, ForestParams, HoldoutMetrics, RandomForest, ThresholdConfig,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub forest: ForestParams,
    /// Share of rows held out for evaluation
    pub test_fraction: f64,
    pub thresholds: ThresholdConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            forest: ForestParams::default(),
            test_fraction: DEFAULT_TEST_FRACTION,
            thresholds: ThresholdConfig::default(),
        }
    }
}

/// What happened at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub rows: usize,
    pub skipped_rows: usize,
    pub train_rows: usize,
    pub holdout_rows: usize,
    /// None when the dataset was too small to hold rows out
    pub holdout: Option<HoldoutMetrics>,
    pub layout: LayoutInfo,
    pub thresholds: CalibratedThresholds,
    pub n_trees: usize,
    pub trained_at: DateTime<Utc>,
    pub training_time_ms: u64,
}

/// Fitted components, ready to be wrapped in a scoring context
pub struct TrainedModel {
    pub encoder: FeatureEncoder,
    pub forest: RandomForest,
    pub thresholds: CalibratedThresholds,
    pub report: TrainingReport,
}

/// Fit encoder, thresholds and forest.
///
/// Encoder vocabulary and thresholds use every row; the forest only sees
/// the training split.
pub fn train(dataset: &HistoricalDataset, config: &TrainingConfig) -> Result<TrainedModel, StartupError> {
    let start = Instant::now();
    let records = dataset.records();

    let encoder = FeatureEncoder::fit(records);
    let x = encoder.transform_batch(records);
    let y = dataset.targets();

    let thresholds = CalibratedThresholds::calibrate_with(&y, &config.thresholds)?;

    let split = train_test_split(records.len(), config.test_fraction, config.forest.seed);
    let x_train = x.select(Axis(0), &split.train);
    let y_train: Vec<f64> = split.train.iter().map(|&i| y[i]).collect();

    let forest = RandomForest::fit(x_train.view(), &y_train, &config.forest)?;

    let holdout = if split.has_holdout() {
        let x_test = x.select(Axis(0), &split.test);
        let y_test: Vec<f64> = split.test.iter().map(|&i| y[i]).collect();
        let predicted = forest.predict_batch(x_test.view());

        let metrics = HoldoutMetrics {
            mae: mean_absolute_error(&y_test, &predicted),
            r2: r2_score(&y_test, &predicted),
        };
        log::info!("Hold-out ({} rows): MAE {:.4}, R² {:.4}", y_test.len(), metrics.mae, metrics.r2);
        Some(metrics)
    } else {
        log::info!("Dataset too small for hold-out; trained on all {} rows", records.len());
        None
    };

    let layout = encoder.layout();
    log::info!(
        "Feature layout v{} (hash: {:08x}): {}",
        layout.version(),
        layout.hash(),
        layout.columns().join(", ")
    );

    let report = TrainingReport {
        rows: records.len(),
        skipped_rows: dataset.skipped(),
        train_rows: split.train.len(),
        holdout_rows: split.test.len(),
        holdout,
        layout: layout.info(),
        thresholds,
        n_trees: forest.n_trees(),
        trained_at: Utc::now(),
        training_time_ms: start.elapsed().as_millis() as u64,
    };

    log::info!(
        "Model trained: {} trees on {} rows ({} skipped) in {} ms",
        report.n_trees,
        report.train_rows,
        report.skipped_rows,
        report.training_time_ms
    );

    Ok(TrainedModel { encoder, forest, thresholds, report })
}
