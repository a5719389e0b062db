/// Factory: build `AdvisoryService` from application `Config`.
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::services::advisory::{
    AdvisoryBackend, AdvisoryService, canned::CannedBackend, gemini::GeminiBackend,
    templates::TemplateLocator,
};

pub fn build_advisory_service(config: &Config, http: reqwest::Client) -> Result<AdvisoryService> {
    let primary = GeminiBackend::new(
        http,
        &config.gemini_api_url,
        &config.gemini_model,
        &config.gemini_api_key,
    )
    .context("failed to build generation backend")?;

    let fallback: Option<Arc<dyn AdvisoryBackend>> = if config.degraded_mode {
        tracing::warn!("degraded mode enabled: failed generations will be answered with canned advisories");
        Some(Arc::new(CannedBackend))
    } else {
        None
    };

    let templates = TemplateLocator::with_default_search_path(&config.prompt_dir);
    tracing::debug!(search_dirs = ?templates.search_dirs(), "prompt template search path");

    let service = AdvisoryService::new(templates, Arc::new(primary), fallback);
    tracing::info!(degraded_mode = service.degraded_mode(), "advisory service ready");
    Ok(service)
}
