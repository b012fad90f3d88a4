use crate::error::Result;
use crate::models::conversation::{DEFAULT_AGENT_NAME, DEFAULT_CUSTOMER_NAME};
use crate::models::{
    CallMetadata, ConversationEndedPayload, ConversationRow, ConversationStatus, NewConversation,
    NewMessage, TranscriptTurn,
};
use crate::provider::ConvaiClient;
use crate::storage::Datastore;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

/// Persist an already-delivered conversation-ended payload.
///
/// The close event itself is what marks the call finished, so the stored
/// status is `completed` regardless of the raw status string in the payload.
pub async fn persist_ended(
    store: &Datastore,
    conversation_id: &str,
    payload: &ConversationEndedPayload,
) -> Result<ConversationRow> {
    write(store, conversation_id, ConversationStatus::Completed, payload).await
}

/// Fetch one conversation from the provider, persist it, and hand back the
/// provider's raw JSON for proxying.
///
/// An upstream failure aborts before anything is written. A conversation
/// insert failure aborts message insertion; a message insert failure leaves
/// the conversation row in place, since the metadata is still useful without
/// a transcript.
pub async fn fetch_and_persist(
    provider: &ConvaiClient,
    store: &Datastore,
    conversation_id: &str,
) -> Result<Value> {
    let raw = provider.get_conversation(conversation_id).await?;

    let payload: ConversationEndedPayload = match serde_json::from_value(raw.clone()) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(
                error = %err,
                conversation_id,
                "provider payload did not decode; persisting without transcript"
            );
            ConversationEndedPayload::default()
        }
    };
    let status = map_status(payload.status.as_deref());
    write(store, conversation_id, status, &payload).await?;

    Ok(raw)
}

async fn write(
    store: &Datastore,
    provider_conversation_id: &str,
    status: ConversationStatus,
    payload: &ConversationEndedPayload,
) -> Result<ConversationRow> {
    let (customer_name, agent_name) = display_names(payload.metadata.as_ref());
    let (started_at, ended_at) = call_window(payload.metadata.as_ref(), status);

    let conversation = store
        .conversations
        .insert(&NewConversation {
            provider_conversation_id: provider_conversation_id.to_string(),
            customer_name,
            agent_name,
            status,
            started_at,
            ended_at,
        })
        .await?;

    let messages = transcript_messages(&conversation.id, payload.transcript.as_deref());
    if !messages.is_empty() {
        store.messages.insert_many(&messages).await?;
    }

    tracing::info!(
        conversation_id = %conversation.id,
        provider_conversation_id,
        messages = messages.len(),
        "conversation persisted"
    );

    Ok(conversation)
}

/// Map the provider's lifecycle state onto the local status enum.
fn map_status(raw: Option<&str>) -> ConversationStatus {
    match raw {
        Some("done") | Some("completed") => ConversationStatus::Completed,
        _ => ConversationStatus::Active,
    }
}

fn display_names(metadata: Option<&CallMetadata>) -> (String, String) {
    let customer = metadata
        .and_then(|meta| meta.customer_name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_CUSTOMER_NAME.to_string());
    let agent = metadata
        .and_then(|meta| meta.agent_name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_AGENT_NAME.to_string());

    (customer, agent)
}

/// Call start and end times from the provider's metadata, falling back to
/// the current time when the provider did not report them.
fn call_window(
    metadata: Option<&CallMetadata>,
    status: ConversationStatus,
) -> (DateTime<Utc>, Option<DateTime<Utc>>) {
    let now = Utc::now();
    let started_at = metadata
        .and_then(|meta| meta.start_time_unix_secs)
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .unwrap_or(now);

    let ended_at = match status {
        ConversationStatus::Completed => Some(
            metadata
                .and_then(|meta| meta.call_duration_secs)
                .map(|secs| started_at + Duration::seconds(secs))
                .unwrap_or(now),
        ),
        ConversationStatus::Active => None,
    };

    (started_at, ended_at)
}

fn transcript_messages(
    conversation_id: &str,
    transcript: Option<&[TranscriptTurn]>,
) -> Vec<NewMessage> {
    let now = Utc::now();

    transcript
        .unwrap_or_default()
        .iter()
        .map(|turn| NewMessage {
            conversation_id: conversation_id.to_string(),
            role: turn.role().to_string(),
            content: turn.body().unwrap_or_default().to_string(),
            timestamp: turn.timestamp.unwrap_or(now),
        })
        .collect()
}
