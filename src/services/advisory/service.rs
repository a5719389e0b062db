//! Advisory query orchestration: template → substitution → generation.
//!
//! Two entry points:
//! - `advise`: structured profile, literal `{placeholder}` substitution into `prompt.txt`
//! - `analyze`: free-form payload appended to `analyze_prompt.txt`
//!
//! Degraded mode is a second backend injected at construction. When present it
//! answers for a failed primary; when absent the failure is returned as-is.
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::services::advisory::{
    AdvisoryBackend, AdvisoryError, GenerationError,
    templates::{ANALYSIS_TEMPLATE, PROFILE_TEMPLATE, TemplateLocator},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryProfile {
    pub balance: i64,
    pub experience: String,
    pub preference: String,
    pub liquidity: String,
    pub risk_bearing: String,
    pub minimum_freezing_period: i64,
}

/// Replace every occurrence of each profile placeholder. No escaping, no conditionals.
pub fn fill_profile_prompt(template: &str, profile: &AdvisoryProfile) -> String {
    template
        .replace("{balance}", &profile.balance.to_string())
        .replace("{experience}", &profile.experience)
        .replace("{preference}", &profile.preference)
        .replace("{liquidity}", &profile.liquidity)
        .replace("{risk_bearing}", &profile.risk_bearing)
        .replace(
            "{minimum_freezing_period}",
            &profile.minimum_freezing_period.to_string(),
        )
}

/// Append the serialized payload to the end of the template text.
pub fn fill_analysis_prompt(template: &str, payload: &Map<String, Value>) -> String {
    let mut prompt = String::with_capacity(template.len() + 256);
    prompt.push_str(template);
    prompt.push_str(&Value::Object(payload.clone()).to_string());
    prompt
}

#[derive(Clone)]
pub struct AdvisoryService {
    templates: TemplateLocator,
    primary: Arc<dyn AdvisoryBackend>,
    fallback: Option<Arc<dyn AdvisoryBackend>>,
}

impl AdvisoryService {
    pub fn new(
        templates: TemplateLocator,
        primary: Arc<dyn AdvisoryBackend>,
        fallback: Option<Arc<dyn AdvisoryBackend>>,
    ) -> Self {
        Self {
            templates,
            primary,
            fallback,
        }
    }

    pub fn degraded_mode(&self) -> bool {
        self.fallback.is_some()
    }

    pub async fn advise(&self, profile: &AdvisoryProfile) -> Result<String, AdvisoryError> {
        let template = self.templates.load(PROFILE_TEMPLATE).await?;
        let prompt = fill_profile_prompt(&template, profile);
        self.generate(&prompt).await
    }

    pub async fn analyze(&self, payload: &Map<String, Value>) -> Result<String, AdvisoryError> {
        let template = self.templates.load(ANALYSIS_TEMPLATE).await?;
        let prompt = fill_analysis_prompt(&template, payload);
        self.generate(&prompt).await
    }

    async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError> {
        let err = match self.primary.generate(prompt).await {
            Ok(text) => {
                info!(backend = self.primary.name(), degraded = false, "advisory generated");
                return Ok(text);
            }
            Err(err) => err,
        };

        // A missing key is a deployment problem, not an outage; never mask it.
        let fallback = match &self.fallback {
            Some(fallback) if err != GenerationError::MissingApiKey => fallback,
            _ => {
                warn!(backend = self.primary.name(), error = %err, "advisory generation failed");
                return Err(err.into());
            }
        };

        warn!(
            backend = self.primary.name(),
            fallback = fallback.name(),
            degraded = true,
            error = %err,
            "advisory generation failed; serving canned advisory"
        );
        Ok(fallback.generate(prompt).await?)
    }
}
