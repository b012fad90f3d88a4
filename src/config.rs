/// Environment-derived service configuration.
///
/// Credentials are optional at startup: the server always comes up, and the
/// endpoints that need a missing credential fail with a configuration error
/// at request time instead of crashing the process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to (default: 0.0.0.0)
    pub host: String,
    /// Port to listen on (default: 3000)
    pub port: u16,
    /// Conversational-AI provider API key
    pub provider_api_key: Option<String>,
    /// Conversational-AI provider base URL
    pub provider_base_url: String,
    /// The fixed agent the conversation list endpoint is scoped to
    pub agent_id: String,
    /// Datastore REST base URL
    pub datastore_url: Option<String>,
    /// Datastore API key
    pub datastore_key: Option<String>,
}

const DEFAULT_PROVIDER_URL: &str = "https://api.elevenlabs.io";
const DEFAULT_AGENT_ID: &str = "agent_7701k9qkzfhwfsntakrxdn982sp2";

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: env_or("TRIAGE_HTTP_HOST", "0.0.0.0"),
            port: env_opt("TRIAGE_HTTP_PORT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(3000),
            provider_api_key: env_opt("ELEVENLABS_API_KEY"),
            provider_base_url: env_or("ELEVENLABS_API_URL", DEFAULT_PROVIDER_URL),
            agent_id: env_or("ELEVENLABS_AGENT_ID", DEFAULT_AGENT_ID),
            datastore_url: env_opt("SUPABASE_URL"),
            datastore_key: env_opt("SUPABASE_KEY"),
        }
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn env_or(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}
