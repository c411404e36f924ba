//! Scoring Context
//!
//! Immutable fitted state: encoder, regressor, thresholds. Built once at
//! startup; concurrent requests only read it. The only mutable part is the
//! atomic latency counters, which never affect a score.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::training::{train, TrainingConfig, TrainingReport};
use crate::logic::advisory::{AdviceRequest, AdvisoryComposer, AdvisoryResult};
use crate::logic::alert::{explain_classification, AlertLevel, AlertRules, ClassificationResult};
use crate::logic::config::EngineConfig;
use crate::logic::dataset::HistoricalDataset;
use crate::logic::error::StartupError;
use crate::logic::explain::{explain_model, ModelExplanation};
use crate::logic::features::{FeatureEncoder, FeatureVector, LayoutInfo, LayoutMismatchError};
use crate::logic::model::inference::predict_timed;
use crate::logic::model::{
    CalibratedThresholds, EngineStatus, ImpactRegressor, InferenceStats, PredictionResult,
};
use crate::logic::observation::Observation;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// One observation run through encode -> predict -> classify
#[derive(Debug, Clone)]
pub struct Scored {
    pub vector: FeatureVector,
    pub prediction: PredictionResult,
    pub classification: ClassificationResult,
}

impl Scored {
    pub fn level(&self) -> AlertLevel {
        self.classification.alert_level
    }

    pub fn advice_request(&self, observation: &Observation) -> AdviceRequest {
        AdviceRequest {
            battery_temp: observation.battery_temp,
            ambient_temp: observation.ambient_temp,
            device_state: observation.device_state.clone(),
            predicted_impact: self.prediction.score,
            alert_level: self.level(),
        }
    }
}

/// Model introspection for `/model` and the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_name: String,
    pub n_trees: usize,
    pub layout: LayoutInfo,
    pub thresholds: CalibratedThresholds,
    pub alert_rules: AlertRules,
    pub training: Option<TrainingReport>,
    pub feature_importances: ModelExplanation,
    pub status: EngineStatus,
}

// ============================================================================
// CONTEXT
// ============================================================================

pub struct ScoringContext {
    encoder: FeatureEncoder,
    regressor: Box<dyn ImpactRegressor>,
    thresholds: CalibratedThresholds,
    rules: AlertRules,
    report: Option<TrainingReport>,
    stats: InferenceStats,
}

impl ScoringContext {
    /// Fit everything from an in-memory dataset
    pub fn train(dataset: &HistoricalDataset, config: &TrainingConfig) -> Result<Self, StartupError> {
        let trained = train(dataset, config)?;

        Ok(Self {
            encoder: trained.encoder,
            regressor: Box::new(trained.forest),
            thresholds: trained.thresholds,
            rules: AlertRules::default(),
            report: Some(trained.report),
            stats: InferenceStats::new(),
        })
    }

    /// Load the CSV, then fit
    pub fn train_from_csv(path: impl AsRef<Path>, config: &TrainingConfig) -> Result<Self, StartupError> {
        let dataset = HistoricalDataset::load(path)?;
        Self::train(&dataset, config)
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, StartupError> {
        Self::train_from_csv(&config.dataset_path, &config.training)
    }

    /// Assemble from already fitted parts (tests, alternate regressors)
    pub fn from_parts(
        encoder: FeatureEncoder,
        regressor: Box<dyn ImpactRegressor>,
        thresholds: CalibratedThresholds,
    ) -> Self {
        Self {
            encoder,
            regressor,
            thresholds,
            rules: AlertRules::default(),
            report: None,
            stats: InferenceStats::new(),
        }
    }

    // ========================================================================
    // PIPELINE
    // ========================================================================

    pub fn encode(&self, observation: &Observation) -> FeatureVector {
        self.encoder.transform(observation)
    }

    /// Predict from a vector; rejects vectors encoded under another layout
    pub fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult, LayoutMismatchError> {
        vector.validate(self.encoder.layout())?;
        Ok(predict_timed(self.regressor.as_ref(), vector.as_slice(), &self.stats))
    }

    pub fn classify(&self, battery_temp: f64, impact: f64) -> ClassificationResult {
        explain_classification(
            battery_temp,
            impact,
            self.thresholds.warn(),
            self.thresholds.danger(),
            &self.rules,
        )
    }

    /// Encode, predict and classify one observation
    pub fn score(&self, observation: &Observation) -> Scored {
        let vector = self.encode(observation);
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Encoded observation: {}", vector.to_log_entry(self.encoder.layout()));
        }
        // Vector comes from our own encoder, so the layout always matches
        let prediction = predict_timed(self.regressor.as_ref(), vector.as_slice(), &self.stats);
        let classification = self.classify(observation.battery_temp, prediction.score);

        Scored { vector, prediction, classification }
    }

    /// Full pipeline with template advice
    pub fn advisory(&self, observation: &Observation) -> AdvisoryResult {
        let scored = self.score(observation);
        AdvisoryComposer::template_only().compose_template(&scored.advice_request(observation))
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn thresholds(&self) -> &CalibratedThresholds {
        &self.thresholds
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn rules(&self) -> &AlertRules {
        &self.rules
    }

    pub fn report(&self) -> Option<&TrainingReport> {
        self.report.as_ref()
    }

    pub fn status(&self) -> EngineStatus {
        self.stats.status(self.regressor.name())
    }

    pub fn model_info(&self) -> ModelInfo {
        let importances = self.regressor.feature_importances().unwrap_or(&[]);

        ModelInfo {
            model_name: self.regressor.name().to_string(),
            n_trees: self.regressor.size(),
            layout: self.encoder.layout().info(),
            thresholds: self.thresholds,
            alert_rules: self.rules,
            training: self.report.clone(),
            feature_importances: explain_model(self.encoder.layout(), importances),
            status: self.status(),
        }
    }
}
