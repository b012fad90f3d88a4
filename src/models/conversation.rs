use crate::models::transcript::TranscriptTurn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_CUSTOMER_NAME: &str = "Anonymous";
pub const DEFAULT_AGENT_NAME: &str = "AI Agent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    Active,
    Completed,
}

/// A conversation row as written to the datastore. The row id is generated
/// by the datastore, so inserts use this id-less shape.
#[derive(Debug, Clone, Serialize)]
pub struct NewConversation {
    pub provider_conversation_id: String,
    pub customer_name: String,
    pub agent_name: String,
    pub status: ConversationStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// A conversation row as returned by the datastore after insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRow {
    pub id: String,
    pub provider_conversation_id: String,
    pub customer_name: String,
    pub agent_name: String,
    pub status: ConversationStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
}

/// One transcript turn as written to the messages table. Messages are only
/// ever inserted after their parent conversation row exists.
#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    pub conversation_id: String,
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Metadata block delivered alongside a conversation payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallMetadata {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub start_time_unix_secs: Option<i64>,
    #[serde(default)]
    pub call_duration_secs: Option<i64>,
}

/// The conversation-ended webhook body as delivered by the provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationEndedPayload {
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub transcript: Option<Vec<TranscriptTurn>>,
    #[serde(default)]
    pub metadata: Option<CallMetadata>,
    #[serde(default)]
    pub analysis: Option<Value>,
}
