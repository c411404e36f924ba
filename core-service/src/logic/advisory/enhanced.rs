//! Enhanced Generator - External Text Generation
//!
//! Optional second tier for advice text. Talks to a Gemini-style
//! `generateContent` endpoint. Every failure is returned as `EnhanceError`;
//! the composer turns it into the template result.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{Advice, AdviceRequest};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("http client error: {0}")]
    Client(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("response has no TIP line")]
    MissingTip,

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

// ============================================================================
// GENERATOR TRAIT
// ============================================================================

#[async_trait]
pub trait EnhancedGenerator: Send + Sync {
    async fn enhance(&self, req: &AdviceRequest) -> Result<Advice, EnhanceError>;

    fn name(&self) -> &str;
}

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

// ============================================================================
// GEMINI CLIENT
// ============================================================================

pub struct GeminiGenerator {
    api_key: String,
    model: String,
    endpoint: String,
    http_client: reqwest::Client,
}

impl GeminiGenerator {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, EnhanceError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EnhanceError::Client(e.to_string()))?;

        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl EnhancedGenerator for GeminiGenerator {
    async fn enhance(&self, req: &AdviceRequest) -> Result<Advice, EnhanceError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: build_prompt(req) }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 200,
            },
        };

        let response = self.http_client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| EnhanceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EnhanceError::Status(response.status().as_u16()));
        }

        let parsed: GenerateContentResponse = response.json().await
            .map_err(|e| EnhanceError::Parse(e.to_string()))?;

        let text = parsed.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| EnhanceError::Parse("no candidates".to_string()))?;

        parse_advice(text)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

// ============================================================================
// PROMPT & PARSING
// ============================================================================

pub fn build_prompt(req: &AdviceRequest) -> String {
    format!(
        "You are a battery health advisor for electronic devices. Generate a concise, \
actionable advice message based on the following parameters:

Battery Temperature: {:.1}°C
Ambient Temperature: {:.1}°C
Temperature Differential: {:+.1}°C
Device State: {}
Alert Level: {}
Health Impact Score: {:.3}

Generate TWO responses:
1. A brief, friendly advisory message (1-2 sentences) explaining the current battery status and any concerns
2. A specific action item if the alert level is \"warning\" or \"danger\", or None if \"safe\"

Format your response as:
TIP: [your advisory message]
ACTION: [specific action or \"None\"]

Keep the tone professional but approachable. Focus on practical advice.",
        req.battery_temp,
        req.ambient_temp,
        req.temperature_delta(),
        req.device_state,
        req.alert_level,
        req.predicted_impact,
    )
}

/// Extract `TIP:` / `ACTION:` lines. `ACTION: None` means no action.
pub fn parse_advice(text: &str) -> Result<Advice, EnhanceError> {
    let mut tip = None;
    let mut action = None;

    for line in text.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("TIP:") {
            let rest = rest.trim();
            if !rest.is_empty() {
                tip = Some(rest.to_string());
            }
        } else if let Some(rest) = line.strip_prefix("ACTION:") {
            let rest = rest.trim();
            action = if rest.is_empty() || rest.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(rest.to_string())
            };
        }
    }

    let tip = tip.ok_or(EnhanceError::MissingTip)?;
    Ok(Advice { tip, action })
}
