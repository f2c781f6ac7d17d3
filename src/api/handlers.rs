//! HTTP request handlers

use super::types::{
    ChatRequest, ChatResponse, ErrorResponse, HealthResponse, RenderRequest, RenderResponse,
    StatusResponse, TopicsResponse,
};
use super::AppState;
use crate::conversation::history_from_payload;
use crate::llm::LlmRequest;
use crate::prompt::{assemble, PromptError};
use crate::render::{render, to_html};
use crate::welcome::{GREETING, QUICK_TOPICS};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/", get(get_status))
        .route("/api/health", get(get_health))
        // Chat
        .route("/api/chat", post(send_chat))
        .route("/api/render", post(render_text))
        // Session bootstrap
        .route("/api/topics", get(get_topics))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Liveness
// ============================================================

async fn get_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        active_status: true,
        error: false,
    })
}

async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.llm_registry.default_model_id().to_string(),
        model_configured: state.llm_registry.has_models(),
    })
}

// ============================================================
// Chat
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = payload?;

    if req.message.trim().is_empty() {
        return Err(AppError::BadRequest {
            error: "Message is required".to_string(),
            details: None,
        });
    }

    let history = history_from_payload(req.chat_history).map_err(|e| AppError::BadRequest {
        error: "Invalid chat history".to_string(),
        details: Some(PromptError::from(e).to_string()),
    })?;
    let prompt = assemble(&state.system_prompt, &history, &req.message)?;

    let Some(llm) = state.llm_registry.default() else {
        return Err(AppError::Generation(
            "GEMINI_API_KEY is not configured".to_string(),
        ));
    };

    tracing::debug!(
        history_turns = history.len(),
        prompt_bytes = prompt.len(),
        max_tokens = ?state.llm_registry.max_output_tokens(),
        "Sending chat prompt"
    );

    let request = LlmRequest {
        max_tokens: state.llm_registry.max_output_tokens(),
        ..LlmRequest::new(prompt)
    };
    let response = llm.complete(&request).await.map_err(|e| {
        tracing::warn!(error = %e, kind = ?e.kind, "Chat generation failed");
        AppError::Generation(e.message)
    })?;

    let blocks = render(&response.text);
    Ok(Json(ChatResponse {
        response: response.text,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        blocks,
    }))
}

async fn render_text(
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<RenderResponse>, AppError> {
    let Json(req) = payload?;
    let blocks = render(&req.text);
    let html = to_html(&blocks);
    Ok(Json(RenderResponse { blocks, html }))
}

// ============================================================
// Session bootstrap
// ============================================================

async fn get_topics() -> Json<TopicsResponse> {
    Json(TopicsResponse {
        greeting: GREETING,
        topics: QUICK_TOPICS,
    })
}

async fn get_version() -> &'static str {
    concat!("cs-tutor ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest {
        error: String,
        details: Option<String>,
    },
    /// The model could not produce a response
    Generation(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            error: "Invalid request body".to_string(),
            details: Some(rejection.body_text()),
        }
    }
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        AppError::BadRequest {
            error: "Invalid input".to_string(),
            details: Some(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest { error, details } => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(error, details))
            }
            AppError::Generation(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Failed to generate response", Some(details)),
            ),
        };

        (status, Json(body)).into_response()
    }
}
