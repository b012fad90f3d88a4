use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use triage_backend::AppConfig;
use triage_backend::api::{self, AppState};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(provider_url: Option<&str>, datastore_url: Option<&str>) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        provider_api_key: provider_url.map(|_| "test-key".to_string()),
        provider_base_url: provider_url.unwrap_or("http://provider.invalid").to_string(),
        agent_id: "agent_test".to_string(),
        datastore_url: datastore_url.map(str::to_string),
        datastore_key: datastore_url.map(|_| "store-key".to_string()),
    }
}

fn app(config: AppConfig) -> Router {
    api::router(AppState::new(config))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

fn conversation_row(id: &str, provider_id: &str) -> Value {
    json!({
        "id": id,
        "provider_conversation_id": provider_id,
        "customer_name": "Anonymous",
        "agent_name": "AI Agent",
        "status": "completed",
        "started_at": "2024-05-01T12:00:00Z",
        "ended_at": "2024-05-01T12:00:30Z"
    })
}

#[tokio::test]
async fn classification_rejects_unknown_type() {
    let app = app(config(None, None));

    let (status, body) = send(
        app.clone(),
        "POST",
        "/classification",
        Some(json!({ "type": "driver" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid classification type");

    // Nothing was recorded.
    let (status, body) = send(app, "GET", "/classification", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classifications"], json!([]));
}

#[tokio::test]
async fn classification_rejects_non_string_type() {
    let app = app(config(None, None));

    let (status, body) = send(
        app,
        "POST",
        "/classification",
        Some(json!({ "type": 123 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid classification type");
}

#[tokio::test]
async fn classification_rejects_missing_type() {
    let app = app(config(None, None));

    let (status, body) = send(app, "POST", "/classification", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid classification type");
}

#[tokio::test]
async fn classification_records_and_lists() {
    let app = app(config(None, None));

    let (status, body) = send(
        app.clone(),
        "POST",
        "/classification",
        Some(json!({ "type": "merchant" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Classification set to merchant");
    let id = body["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let (status, body) = send(app, "GET", "/classification", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["classifications"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["type"], "merchant");
    assert_eq!(entries[0]["id"], id);
    assert!(entries[0]["timestamp"].is_string());
}

#[tokio::test]
async fn classification_list_is_insertion_ordered() {
    let app = app(config(None, None));

    for kind in ["dasher", "merchant", "customer"] {
        let (status, _) = send(
            app.clone(),
            "POST",
            "/classification",
            Some(json!({ "type": kind, "conversation_id": "c1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(app, "GET", "/classification", None).await;
    let kinds: Vec<&str> = body["classifications"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["dasher", "merchant", "customer"]);

    let entries = body["classifications"].as_array().unwrap();
    assert_eq!(entries[0]["conversationId"], "c1");
}

#[tokio::test]
async fn webhook_without_conversation_id_writes_nothing() {
    let datastore = MockServer::start().await;
    let app = app(config(None, Some(&datastore.uri())));

    let (status, body) = send(app, "POST", "/webhook", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No conversation_id");

    assert!(datastore.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn webhook_persists_conversation_and_messages() {
    let datastore = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/conversations"))
        .and(query_param("on_conflict", "provider_conversation_id"))
        .and(header("apikey", "store-key"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([conversation_row("row-1", "c1")])),
        )
        .expect(1)
        .mount(&datastore)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/messages"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&datastore)
        .await;

    let app = app(config(None, Some(&datastore.uri())));
    let (status, body) = send(
        app,
        "POST",
        "/webhook",
        Some(json!({
            "conversation_id": "c1",
            "status": "done",
            "transcript": [
                { "role": "user", "message": "hi" },
                { "role": "agent", "message": "hello" }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["conversation_id"], "c1");

    let requests = datastore.received_requests().await.unwrap();

    let conversation: Value = requests
        .iter()
        .find(|req| req.url.path() == "/rest/v1/conversations")
        .map(|req| serde_json::from_slice(&req.body).unwrap())
        .unwrap();
    assert_eq!(conversation["provider_conversation_id"], "c1");
    assert_eq!(conversation["customer_name"], "Anonymous");
    assert_eq!(conversation["agent_name"], "AI Agent");
    assert_eq!(conversation["status"], "completed");

    let messages: Value = requests
        .iter()
        .find(|req| req.url.path() == "/rest/v1/messages")
        .map(|req| serde_json::from_slice(&req.body).unwrap())
        .unwrap();
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["conversation_id"], "row-1");
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "hi");
    assert_eq!(messages[1]["role"], "agent");
    assert_eq!(messages[1]["content"], "hello");
}

#[tokio::test]
async fn webhook_without_transcript_skips_message_insert() {
    let datastore = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/conversations"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([conversation_row("row-1", "c2")])),
        )
        .expect(1)
        .mount(&datastore)
        .await;

    let app = app(config(None, Some(&datastore.uri())));
    let (status, body) = send(
        app,
        "POST",
        "/webhook",
        Some(json!({ "conversation_id": "c2" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(datastore.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn webhook_surfaces_datastore_rejection() {
    let datastore = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/conversations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&datastore)
        .await;

    let app = app(config(None, Some(&datastore.uri())));
    let (status, body) = send(
        app,
        "POST",
        "/webhook",
        Some(json!({ "conversation_id": "c3" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to process webhook");
}

#[tokio::test]
async fn webhook_keeps_conversation_when_message_insert_fails() {
    let datastore = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/conversations"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([conversation_row("row-5", "c5")])),
        )
        .expect(1)
        .mount(&datastore)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/messages"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&datastore)
        .await;

    let app = app(config(None, Some(&datastore.uri())));
    let (status, body) = send(
        app,
        "POST",
        "/webhook",
        Some(json!({
            "conversation_id": "c5",
            "transcript": [{ "role": "user", "message": "hi" }]
        })),
    )
    .await;

    // The message failure surfaces as a 500, but the conversation insert
    // already happened and is not rolled back.
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to process webhook");

    let requests = datastore.received_requests().await.unwrap();
    assert!(
        requests
            .iter()
            .any(|req| req.url.path() == "/rest/v1/conversations")
    );
}

#[tokio::test]
async fn webhook_without_datastore_config_is_a_500() {
    let app = app(config(None, None));

    let (status, body) = send(
        app,
        "POST",
        "/webhook",
        Some(json!({ "conversation_id": "c4" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Datastore URL and key is not configured");
}

#[tokio::test]
async fn conversations_fetch_persists_and_echoes_upstream() {
    let provider = MockServer::start().await;
    let datastore = MockServer::start().await;

    let upstream = json!({
        "conversation_id": "c9",
        "status": "done",
        "transcript": [{ "role": "user", "message": "hi" }],
        "metadata": {
            "customer_name": "Ada",
            "start_time_unix_secs": 1_714_564_800,
            "call_duration_secs": 30
        }
    });

    Mock::given(method("GET"))
        .and(path("/v1/convai/conversations/c9"))
        .and(header("xi-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream.clone()))
        .expect(1)
        .mount(&provider)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/conversations"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([conversation_row("row-9", "c9")])),
        )
        .expect(1)
        .mount(&datastore)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/messages"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&datastore)
        .await;

    let app = app(config(Some(&provider.uri()), Some(&datastore.uri())));
    let (status, body) = send(app, "GET", "/conversations?id=c9", None).await;

    // The upstream body is returned unmodified.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, upstream);

    let requests = datastore.received_requests().await.unwrap();
    let conversation: Value = requests
        .iter()
        .find(|req| req.url.path() == "/rest/v1/conversations")
        .map(|req| serde_json::from_slice(&req.body).unwrap())
        .unwrap();
    assert_eq!(conversation["customer_name"], "Ada");
    assert_eq!(conversation["status"], "completed");
    assert_eq!(conversation["started_at"], "2024-05-01T12:00:00Z");
    assert_eq!(conversation["ended_at"], "2024-05-01T12:00:30Z");
}

#[tokio::test]
async fn conversations_fetch_upstream_failure_writes_nothing() {
    let provider = MockServer::start().await;
    let datastore = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/convai/conversations/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&provider)
        .await;

    let app = app(config(Some(&provider.uri()), Some(&datastore.uri())));
    let (status, body) = send(app, "GET", "/conversations?id=missing", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch conversations");
    assert!(datastore.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn conversations_list_proxies_raw_json() {
    let provider = MockServer::start().await;

    let upstream = json!({ "conversations": [{ "conversation_id": "c1" }], "has_more": false });
    Mock::given(method("GET"))
        .and(path("/v1/convai/conversations"))
        .and(query_param("agent_id", "agent_test"))
        .and(query_param("page_size", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream.clone()))
        .expect(1)
        .mount(&provider)
        .await;

    let app = app(config(Some(&provider.uri()), None));
    let (status, body) = send(app, "GET", "/conversations", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, upstream);
}

#[tokio::test]
async fn conversations_without_provider_key_is_a_500() {
    let app = app(config(None, None));

    let (status, body) = send(app, "GET", "/conversations", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "ElevenLabs API key is not configured");
}

#[tokio::test]
async fn health_check() {
    let app = app(config(None, None));

    let (status, body) = send(app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "triage backend is working!");
}
