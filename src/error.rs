use thiserror::Error;

/// Error taxonomy for the classification and persistence pipeline. Every
/// variant is caught at the request boundary and converted to a structured
/// JSON response; nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing required field in an inbound payload.
    #[error("{0}")]
    Validation(String),

    /// The conversational-AI provider returned a non-success status. The
    /// status and body are logged where the call is made; callers only ever
    /// see a generic message.
    #[error("upstream provider returned status {status}")]
    Upstream { status: u16 },

    /// The datastore rejected a write.
    #[error("{0}")]
    Persistence(String),

    /// Required credentials are missing. Raised before any network call.
    #[error("{0} is not configured")]
    Configuration(&'static str),

    /// Transport-level failure talking to the provider or datastore.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
