use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The three support categories the voice agent triages calls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationType {
    Dasher,
    Merchant,
    Customer,
}

impl ClassificationType {
    /// Parse the wire value. Anything outside the fixed set is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dasher" => Some(Self::Dasher),
            "merchant" => Some(Self::Merchant),
            "customer" => Some(Self::Customer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dasher => "dasher",
            Self::Merchant => "merchant",
            Self::Customer => "customer",
        }
    }
}

/// One recorded classification event. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ClassificationType,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "conversationId", skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}
