use crate::error::{Error, Result};
use crate::models::{ConversationRow, NewConversation};
use crate::storage::rest::RestClient;
use std::sync::Arc;

const TABLE: &str = "conversations";

/// Conversations table client. Inserts upsert on the provider-side
/// conversation id so re-delivered webhooks update the existing row instead
/// of creating duplicates.
pub struct ConversationStore {
    rest: Arc<RestClient>,
}

impl ConversationStore {
    pub fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    pub async fn insert(&self, conversation: &NewConversation) -> Result<ConversationRow> {
        let rows: Vec<ConversationRow> = self
            .rest
            .insert_returning(TABLE, "on_conflict=provider_conversation_id", conversation)
            .await?;

        rows.into_iter().next().ok_or_else(|| {
            Error::Persistence("datastore returned no row for inserted conversation".to_string())
        })
    }
}
