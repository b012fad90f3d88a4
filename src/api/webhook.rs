use crate::api::state::AppState;
use crate::models::ConversationEndedPayload;
use crate::services::persistence;
use axum::{Json, extract::State, http::StatusCode};
use serde_json::Value;

// POST /webhook — conversation-ended events from the provider.
//
// Failure uses the `success: false` body shape rather than a 4xx: the
// provider treats any 2xx as delivered, and a missing conversation_id is not
// something a redelivery would fix.
pub async fn conversation_ended(
    State(state): State<AppState>,
    Json(payload): Json<ConversationEndedPayload>,
) -> (StatusCode, Json<Value>) {
    let Some(conversation_id) = payload
        .conversation_id
        .clone()
        .filter(|id| !id.is_empty())
    else {
        return (
            StatusCode::OK,
            Json(serde_json::json!({ "success": false, "error": "No conversation_id" })),
        );
    };

    let store = match state.datastore() {
        Ok(store) => store,
        Err(err) => return failure(err.to_string()),
    };

    match persistence::persist_ended(store, &conversation_id, &payload).await {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "conversation_id": conversation_id })),
        ),
        Err(err) => {
            tracing::error!(error = %err, %conversation_id, "failed to process webhook");
            failure("Failed to process webhook".to_string())
        }
    }
}

fn failure(error: String) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "success": false, "error": error })),
    )
}
