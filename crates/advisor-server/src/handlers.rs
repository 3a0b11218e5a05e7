//! HTTP Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use finance_advisor::{
    AdvisorError, ChatMessage, ChatReply, FinancialProfile, InvestmentAdvice, ProfileInput,
};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model_connected: bool,
    pub model: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub user_id: String,

    #[serde(flatten)]
    pub profile: ProfileInput,
}

#[derive(Debug, Deserialize)]
pub struct GenerateAdviceRequest {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct AdviceHistoryResponse {
    pub advice: Vec<InvestmentAdvice>,
}

#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub history: Vec<ChatHistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct ChatHistoryEntry {
    #[serde(rename = "type")]
    pub message_type: String,
    pub content: String,
    pub formatted_content: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a domain error onto an HTTP status and a user-facing body
///
/// Store and internal failures are logged with full detail but reach the
/// client only as a generic message.
fn error_response(err: AdvisorError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        AdvisorError::Validation(_) | AdvisorError::EmptyMessage => StatusCode::BAD_REQUEST,
        AdvisorError::ProfileExists => StatusCode::CONFLICT,
        AdvisorError::ProfileNotFound | AdvisorError::AdviceNotFound(_) => StatusCode::NOT_FOUND,
        AdvisorError::Store(_) | AdvisorError::Internal(_) => {
            tracing::error!("Request failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: err.user_message(),
        }),
    )
}

/// Shape a stored chat message for the history endpoint
///
/// Advisor content is stored as sanitized HTML and user content as plain
/// text; both pass through unchanged.
fn history_entry(message: &ChatMessage) -> ChatHistoryEntry {
    ChatHistoryEntry {
        message_type: message.author.to_string(),
        content: message.content.clone(),
        formatted_content: message.content.clone(),
        timestamp: message.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_connected = state.provider.health_check().await.unwrap_or(false);
    let info = state.provider.describe();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_connected,
        model: info.model,
    })
}

/// Create a financial profile and generate its first advice
pub async fn create_profile(
    State(state): State<AppState>,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<FinancialProfile>, (StatusCode, Json<ErrorResponse>)> {
    let profile = state
        .engine
        .create_profile(&payload.user_id, payload.profile)
        .await
        .map_err(error_response)?;

    Ok(Json(profile))
}

/// Update an existing financial profile
pub async fn update_profile(
    State(state): State<AppState>,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<FinancialProfile>, (StatusCode, Json<ErrorResponse>)> {
    let profile = state
        .engine
        .update_profile(&payload.user_id, payload.profile)
        .map_err(error_response)?;

    Ok(Json(profile))
}

/// Fetch the caller's financial profile
pub async fn get_profile(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<FinancialProfile>, (StatusCode, Json<ErrorResponse>)> {
    let profile = state
        .engine
        .get_profile(&query.user_id)
        .map_err(error_response)?;

    Ok(Json(profile))
}

/// Generate fresh investment advice for the caller's profile
pub async fn generate_advice(
    State(state): State<AppState>,
    Json(payload): Json<GenerateAdviceRequest>,
) -> Result<Json<InvestmentAdvice>, (StatusCode, Json<ErrorResponse>)> {
    let advice = state
        .engine
        .generate_advice(&payload.user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(advice))
}

/// List the caller's advice, newest first
pub async fn advice_history(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<AdviceHistoryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let advice = state
        .engine
        .advice_history(&query.user_id)
        .map_err(error_response)?;

    Ok(Json(AdviceHistoryResponse { advice }))
}

/// Fetch one advice record, scoped to the requesting user
pub async fn get_advice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<UserQuery>,
) -> Result<Json<InvestmentAdvice>, (StatusCode, Json<ErrorResponse>)> {
    let advice = state
        .engine
        .get_advice(id, &query.user_id)
        .map_err(error_response)?;

    Ok(Json(advice))
}

/// Chat endpoint: one user message in, one advisor reply out
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, Json<ErrorResponse>)> {
    let reply = state
        .engine
        .chat_turn(&payload.user_id, &payload.message)
        .await
        .map_err(error_response)?;

    Ok(Json(reply))
}

/// Full chat transcript in chronological order
pub async fn chat_history(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ChatHistoryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let messages = state
        .engine
        .chat_history(&query.user_id)
        .map_err(error_response)?;

    let history = messages.iter().map(history_entry).collect();
    Ok(Json(ChatHistoryResponse { history }))
}
