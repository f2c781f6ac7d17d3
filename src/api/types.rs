//! API request and response types

use crate::conversation::TurnPayload;
use crate::render::Fragment;
use crate::welcome::QuickTopic;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Request to send a chat message
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub chat_history: Vec<TurnPayload>,
}

/// Response for a chat message
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ChatResponse {
    /// Raw model text
    pub response: String,
    /// RFC 3339 UTC with milliseconds
    pub timestamp: String,
    /// `response` rendered into fragments
    pub blocks: Vec<Fragment>,
}

/// Request to render arbitrary text
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct RenderRequest {
    pub text: String,
}

/// Rendered text, both as fragments and as escaped HTML
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct RenderResponse {
    pub blocks: Vec<Fragment>,
    pub html: String,
}

/// Liveness response for `/`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub active_status: bool,
    pub error: bool,
}

/// Response for `/api/health`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub model_configured: bool,
}

/// Greeting and quick topics for a new session
#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub greeting: &'static str,
    pub topics: &'static [QuickTopic],
}

/// Error response
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            error: message.into(),
            details,
        }
    }
}
