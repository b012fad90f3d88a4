use anyhow::Result;
use triage_backend::AppConfig;
use triage_backend::api::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,triage_backend=debug".into()),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env();
    if config.provider_api_key.is_none() {
        tracing::warn!("ELEVENLABS_API_KEY not set; conversation endpoints will return 500");
    }
    if config.datastore_url.is_none() || config.datastore_key.is_none() {
        tracing::warn!("SUPABASE_URL / SUPABASE_KEY not set; persistence will return 500");
    }

    let addr = format!("{}:{}", config.host, config.port);
    let app = api::router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Triage backend listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
