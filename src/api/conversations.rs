use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::services::persistence;
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::Value;

const LIST_PAGE_SIZE: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct ConversationsQuery {
    #[serde(default)]
    pub id: Option<String>,
}

// GET /conversations — with `id`, proxy one conversation from the provider
// and persist it on the way through; without, proxy the provider's list for
// the configured agent. Both return the upstream JSON unmodified.
pub async fn get_conversations(
    State(state): State<AppState>,
    Query(query): Query<ConversationsQuery>,
) -> Result<Json<Value>, ApiError> {
    let provider = state.provider()?;

    match query.id {
        Some(id) => {
            let store = state.datastore()?;
            let raw = persistence::fetch_and_persist(provider, store, &id).await?;
            Ok(Json(raw))
        }
        None => {
            let raw = provider
                .list_conversations(&state.config.agent_id, LIST_PAGE_SIZE)
                .await?;
            Ok(Json(raw))
        }
    }
}
