pub mod conversation;
pub mod message;
pub mod rest;

use std::sync::Arc;

pub use conversation::ConversationStore;
pub use message::MessageStore;
pub use rest::RestClient;

/// Facade over the datastore's per-table clients. The datastore is the
/// system of record for conversations and messages.
pub struct Datastore {
    pub conversations: ConversationStore,
    pub messages: MessageStore,
}

impl Datastore {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let rest = Arc::new(RestClient::new(base_url, api_key));

        Self {
            conversations: ConversationStore::new(rest.clone()),
            messages: MessageStore::new(rest),
        }
    }
}
