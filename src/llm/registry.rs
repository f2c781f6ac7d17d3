//! Model configuration and the registry holding the configured service

use super::{GeminiService, LlmService, LoggingService};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the LLM provider
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub gemini_api_key: Option<String>,
    pub model: String,
    /// API base URL (override for gateways and tests)
    pub base_url: String,
    pub timeout: Duration,
    /// Cap on generated tokens per reply; unset means the model default
    pub max_output_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_output_tokens: None,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            gemini_api_key: get("GEMINI_API_KEY"),
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            timeout: get("GEMINI_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map_or(defaults.timeout, Duration::from_secs),
            max_output_tokens: get("GEMINI_MAX_OUTPUT_TOKENS")
                .and_then(|v| v.parse().ok())
                .filter(|&n: &u32| n > 0),
        }
    }
}

/// Registry of the configured model
pub struct ModelRegistry {
    service: Option<Arc<dyn LlmService>>,
    model_id: String,
    max_output_tokens: Option<u32>,
}

impl ModelRegistry {
    pub fn new(config: &LlmConfig) -> Self {
        let service = config
            .gemini_api_key
            .as_ref()
            .and_then(|api_key| Self::try_create_model(api_key, config));

        Self {
            service,
            model_id: config.model.clone(),
            max_output_tokens: config.max_output_tokens,
        }
    }

    /// Registry serving a fixed service, for tests
    #[cfg(test)]
    pub fn with_service(service: Arc<dyn LlmService>) -> Self {
        let model_id = service.model_id().to_string();
        Self {
            service: Some(service),
            model_id,
            max_output_tokens: None,
        }
    }

    fn try_create_model(api_key: &str, config: &LlmConfig) -> Option<Arc<dyn LlmService>> {
        match GeminiService::new(
            api_key.to_string(),
            &config.model,
            &config.base_url,
            config.timeout,
        ) {
            Ok(service) => Some(Arc::new(LoggingService::new(Arc::new(service)))),
            Err(e) => {
                tracing::error!(model = %config.model, error = %e, "Failed to create LLM service");
                None
            }
        }
    }

    /// Get the default model
    pub fn default(&self) -> Option<Arc<dyn LlmService>> {
        self.service.clone()
    }

    pub fn has_models(&self) -> bool {
        self.service.is_some()
    }

    pub fn default_model_id(&self) -> &str {
        &self.model_id
    }

    /// Output cap applied to every chat request
    pub fn max_output_tokens(&self) -> Option<u32> {
        self.max_output_tokens
    }
}
