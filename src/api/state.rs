use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::provider::ConvaiClient;
use crate::services::ClassificationLog;
use crate::storage::Datastore;
use std::sync::Arc;

/// Application state shared across all API handlers.
///
/// The provider and datastore clients are only present when their
/// credentials are configured; handlers that need a missing client fail with
/// a configuration error instead of taking the process down.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub classifications: Arc<ClassificationLog>,
    provider: Option<Arc<ConvaiClient>>,
    datastore: Option<Arc<Datastore>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let provider = config
            .provider_api_key
            .as_ref()
            .map(|key| Arc::new(ConvaiClient::new(&config.provider_base_url, key)));

        let datastore = match (&config.datastore_url, &config.datastore_key) {
            (Some(url), Some(key)) => Some(Arc::new(Datastore::new(url, key))),
            _ => None,
        };

        Self {
            config: Arc::new(config),
            classifications: Arc::new(ClassificationLog::new()),
            provider,
            datastore,
        }
    }

    pub fn provider(&self) -> Result<&ConvaiClient> {
        self.provider
            .as_deref()
            .ok_or(Error::Configuration("ElevenLabs API key"))
    }

    pub fn datastore(&self) -> Result<&Datastore> {
        self.datastore
            .as_deref()
            .ok_or(Error::Configuration("Datastore URL and key"))
    }
}
