//! HTTP API for the teaching assistant

mod handlers;
mod types;

pub use handlers::create_router;

use crate::llm::ModelRegistry;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub llm_registry: Arc<ModelRegistry>,
    pub system_prompt: Arc<str>,
}

impl AppState {
    pub fn new(llm_registry: Arc<ModelRegistry>, system_prompt: impl Into<Arc<str>>) -> Self {
        Self {
            llm_registry,
            system_prompt: system_prompt.into(),
        }
    }
}
