//! Advisory Composer
//!
//! Builds the response record. The template tier always answers; the
//! enhanced tier is tried first when configured and bounded by a timeout.

use std::sync::Arc;
use std::time::Duration;

use super::enhanced::{EnhanceError, EnhancedGenerator};
use super::template::TemplateGenerator;
use super::types::{Advice, AdviceRequest, AdvisoryResult};
use crate::logic::alert::AlertLevel;

#[derive(Clone)]
pub struct AdvisoryComposer {
    template: TemplateGenerator,
    enhanced: Option<Arc<dyn EnhancedGenerator>>,
    timeout: Duration,
}

impl AdvisoryComposer {
    /// Deterministic text only
    pub fn template_only() -> Self {
        Self {
            template: TemplateGenerator::new(),
            enhanced: None,
            timeout: Duration::ZERO,
        }
    }

    pub fn with_enhanced(generator: Arc<dyn EnhancedGenerator>, timeout: Duration) -> Self {
        Self {
            template: TemplateGenerator::new(),
            enhanced: Some(generator),
            timeout,
        }
    }

    pub fn is_enhanced(&self) -> bool {
        self.enhanced.is_some()
    }

    pub fn compose_template(&self, req: &AdviceRequest) -> AdvisoryResult {
        AdvisoryResult::new(req.alert_level, self.template.generate(req), req.predicted_impact)
    }

    /// Enhanced text when available, template otherwise. Never fails.
    pub async fn compose(&self, req: &AdviceRequest) -> AdvisoryResult {
        let Some(generator) = &self.enhanced else {
            return self.compose_template(req);
        };

        let outcome = match tokio::time::timeout(self.timeout, generator.enhance(req)).await {
            Ok(result) => result,
            Err(_) => Err(EnhanceError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(advice) => {
                let advice = enforce_action_contract(req.alert_level, advice);
                AdvisoryResult::new(req.alert_level, advice, req.predicted_impact)
            }
            Err(e) => {
                log::warn!("{} enhancement failed ({}), using template", generator.name(), e);
                self.compose_template(req)
            }
        }
    }
}

impl Default for AdvisoryComposer {
    fn default() -> Self {
        Self::template_only()
    }
}

/// Safe never carries an action; warning/danger always do
fn enforce_action_contract(level: AlertLevel, mut advice: Advice) -> Advice {
    if level.requires_action() {
        if advice.action.is_none() {
            advice.action = TemplateGenerator::action(level).map(str::to_string);
        }
    } else {
        advice.action = None;
    }
    advice
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn request(level: AlertLevel) -> AdviceRequest {
        AdviceRequest {
            battery_temp: 38.0,
            ambient_temp: 24.0,
            device_state: "charging".into(),
            predicted_impact: 0.123456789,
            alert_level: level,
        }
    }

    /// Replies with a fixed advice
    struct Scripted(Advice);

    #[async_trait]
    impl EnhancedGenerator for Scripted {
        async fn enhance(&self, _req: &AdviceRequest) -> Result<Advice, EnhanceError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct Failing;

    #[async_trait]
    impl EnhancedGenerator for Failing {
        async fn enhance(&self, _req: &AdviceRequest) -> Result<Advice, EnhanceError> {
            Err(EnhanceError::Network("connection refused".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Slow;

    #[async_trait]
    impl EnhancedGenerator for Slow {
        async fn enhance(&self, _req: &AdviceRequest) -> Result<Advice, EnhanceError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Advice { tip: "too late".into(), action: None })
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    const LEVELS: [AlertLevel; 3] = [AlertLevel::Safe, AlertLevel::Warning, AlertLevel::Danger];

    #[tokio::test]
    async fn test_template_only_matches_template() {
        let composer = AdvisoryComposer::template_only();
        for level in LEVELS {
            let req = request(level);
            assert_eq!(composer.compose(&req).await, composer.compose_template(&req));
        }
    }

    #[tokio::test]
    async fn test_failing_generator_falls_back() {
        let composer = AdvisoryComposer::with_enhanced(Arc::new(Failing), Duration::from_secs(1));
        let baseline = AdvisoryComposer::template_only();
        for level in LEVELS {
            let req = request(level);
            assert_eq!(composer.compose(&req).await, baseline.compose_template(&req));
        }
    }

    #[tokio::test]
    async fn test_slow_generator_times_out() {
        let composer = AdvisoryComposer::with_enhanced(Arc::new(Slow), Duration::from_millis(20));
        let req = request(AlertLevel::Warning);
        assert_eq!(
            composer.compose(&req).await,
            AdvisoryComposer::template_only().compose_template(&req)
        );
    }

    #[tokio::test]
    async fn test_enhanced_text_is_used() {
        let advice = Advice { tip: "Custom tip.".into(), action: Some("Custom action.".into()) };
        let composer = AdvisoryComposer::with_enhanced(Arc::new(Scripted(advice)), Duration::from_secs(1));

        let result = composer.compose(&request(AlertLevel::Danger)).await;
        assert_eq!(result.natural_language_tip, "Custom tip.");
        assert_eq!(result.optional_action.as_deref(), Some("Custom action."));
        assert_eq!(result.predicted_health_impact, 0.12346);
    }

    #[tokio::test]
    async fn test_action_contract_after_enhancement() {
        // Missing action on warning is filled from the template
        let advice = Advice { tip: "Warm.".into(), action: None };
        let composer = AdvisoryComposer::with_enhanced(Arc::new(Scripted(advice)), Duration::from_secs(1));
        let result = composer.compose(&request(AlertLevel::Warning)).await;
        assert_eq!(
            result.optional_action,
            TemplateGenerator::action(AlertLevel::Warning).map(str::to_string)
        );

        // Action on safe is dropped
        let advice = Advice { tip: "Fine.".into(), action: Some("Do something.".into()) };
        let composer = AdvisoryComposer::with_enhanced(Arc::new(Scripted(advice)), Duration::from_secs(1));
        let result = composer.compose(&request(AlertLevel::Safe)).await;
        assert_eq!(result.natural_language_tip, "Fine.");
        assert!(result.optional_action.is_none());
    }
}
