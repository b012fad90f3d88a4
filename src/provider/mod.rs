use crate::error::{Error, Result};
use serde_json::Value;

/// HTTP client for the conversational-AI provider's agent platform.
///
/// The provider owns the entire voice pipeline; this service only reads
/// conversation records back out of it. Upstream failure details are logged
/// here and never surfaced to callers.
pub struct ConvaiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ConvaiClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Fetch one conversation's full transcript and metadata.
    pub async fn get_conversation(&self, conversation_id: &str) -> Result<Value> {
        let url = format!("{}/v1/convai/conversations/{conversation_id}", self.base_url);
        self.get_json(&url).await
    }

    /// List recent conversations for one agent.
    pub async fn list_conversations(&self, agent_id: &str, page_size: u32) -> Result<Value> {
        let url = format!(
            "{}/v1/convai/conversations?agent_id={agent_id}&page_size={page_size}",
            self.base_url
        );
        self.get_json(&url).await
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .http
            .get(url)
            .header("xi-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "provider request failed");
            return Err(Error::Upstream {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}
