pub mod classification;
pub mod conversations;
pub mod error;
pub mod state;
pub mod webhook;

pub use error::ApiError;
pub use state::AppState;

use axum::{
    Json, Router,
    http::{Method, header},
    routing::get,
};
use tower_http::cors::CorsLayer;

#[derive(serde::Serialize)]
struct Health {
    status: String,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "triage backend is working!".to_string(),
    })
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route(
            "/classification",
            get(classification::list_classifications).post(classification::record_classification),
        )
        .route("/webhook", axum::routing::post(webhook::conversation_ended))
        .route("/conversations", get(conversations::get_conversations))
        .layer(cors)
        .with_state(state)
}
