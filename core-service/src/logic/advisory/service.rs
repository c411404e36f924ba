//! Advisory Service
//!
//! Scoring context plus composer: the one entry point request handlers use.

use std::sync::Arc;

use super::composer::AdvisoryComposer;
use super::enhanced::GeminiGenerator;
use super::types::AdvisoryResult;
use crate::logic::config::EnhanceConfig;
use crate::logic::observation::Observation;
use crate::logic::scoring::ScoringContext;

#[derive(Clone)]
pub struct AdvisoryService {
    context: Arc<ScoringContext>,
    composer: AdvisoryComposer,
}

impl AdvisoryService {
    pub fn new(context: Arc<ScoringContext>, composer: AdvisoryComposer) -> Self {
        Self { context, composer }
    }

    pub fn template_only(context: Arc<ScoringContext>) -> Self {
        Self::new(context, AdvisoryComposer::template_only())
    }

    /// Gemini tier when enabled and keyed, template only otherwise
    pub fn from_config(context: Arc<ScoringContext>, config: &EnhanceConfig) -> Self {
        let composer = match (&config.api_key, config.enabled) {
            (Some(key), true) => {
                match GeminiGenerator::new(key, &config.model, &config.endpoint, config.timeout()) {
                    Ok(generator) => {
                        log::info!("Advice enhancement enabled ({})", config.model);
                        AdvisoryComposer::with_enhanced(Arc::new(generator), config.timeout())
                    }
                    Err(e) => {
                        log::warn!("Advice enhancement unavailable: {}", e);
                        AdvisoryComposer::template_only()
                    }
                }
            }
            _ => {
                log::info!("Advice enhancement disabled; using templates");
                AdvisoryComposer::template_only()
            }
        };

        Self::new(context, composer)
    }

    pub async fn advisory(&self, observation: &Observation) -> AdvisoryResult {
        let scored = self.context.score(observation);
        log::debug!(
            "Scored {}: impact {:.5} -> {}",
            observation.device_state,
            scored.prediction.score,
            scored.level()
        );

        self.composer.compose(&scored.advice_request(observation)).await
    }

    pub fn context(&self) -> &Arc<ScoringContext> {
        &self.context
    }

    pub fn is_enhanced(&self) -> bool {
        self.composer.is_enhanced()
    }
}
