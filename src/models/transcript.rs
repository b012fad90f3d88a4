use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One role-tagged utterance as delivered by the provider.
///
/// Provider payloads have carried the utterance body under `message`,
/// `content`, or `text` depending on the event variant, so this decoder
/// accepts all three with a fixed precedence instead of a single field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptTurn {
    #[serde(default, deserialize_with = "tolerant_string")]
    pub role: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "tolerant_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TranscriptTurn {
    /// The utterance body: first non-empty of `message`, `content`, `text`.
    pub fn body(&self) -> Option<&str> {
        [&self.message, &self.content, &self.text]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|value| !value.is_empty())
    }

    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or("unknown")
    }
}

/// Accepts a string; any other shape decodes as `None` so one malformed
/// field cannot fail the surrounding payload.
fn tolerant_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::String(raw) => Some(raw),
        _ => None,
    }))
}

/// Accepts an RFC 3339 string or a unix-seconds number; anything else
/// decodes as `None` so callers fall back to the current time.
fn tolerant_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_timestamp))
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(raw) => DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc)),
        Value::Number(raw) => raw
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    }
}
