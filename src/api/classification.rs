use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::models::ClassificationType;
use crate::services::classification::RECENT_LIMIT;
use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;

/// Classification event as posted by the voice agent's webhook tool. The
/// transcript and metadata blocks it may carry are accepted and ignored;
/// transcript persistence is the conversation-ended path's job, since the
/// classification can arrive before the call ends.
#[derive(Debug, Deserialize)]
pub struct ClassificationRequest {
    /// Left as raw JSON so a non-string value is rejected with the same 400
    /// as an unknown category, not a deserialization error.
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

// POST /classification
pub async fn record_classification(
    State(state): State<AppState>,
    Json(request): Json<ClassificationRequest>,
) -> Result<Json<Value>, ApiError> {
    let kind = request
        .kind
        .as_ref()
        .and_then(Value::as_str)
        .and_then(ClassificationType::parse)
        .ok_or_else(|| ApiError::bad_request("Invalid classification type"))?;

    let record = state.classifications.record(kind, request.conversation_id);
    tracing::info!(
        kind = kind.as_str(),
        id = %record.id,
        "classification received"
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "message": format!("Classification set to {}", kind.as_str()),
        "id": record.id
    })))
}

// GET /classification
pub async fn list_classifications(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({
        "classifications": state.classifications.recent(RECENT_LIMIT)
    }))
}
