use crate::error::Result;
use crate::models::NewMessage;
use crate::storage::rest::RestClient;
use std::sync::Arc;

const TABLE: &str = "messages";

/// Messages table client. Rows are only ever written in bulk, after the
/// owning conversation row exists.
pub struct MessageStore {
    rest: Arc<RestClient>,
}

impl MessageStore {
    pub fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    /// Insert all transcript turns in a single request.
    pub async fn insert_many(&self, messages: &[NewMessage]) -> Result<()> {
        if messages.is_empty() {
            return Ok(());
        }
        self.rest.insert(TABLE, messages).await
    }
}
