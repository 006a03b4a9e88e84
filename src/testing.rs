//! Local stand-in for the sentiment service, used by tests
//!
//! Behaves like the real `/predict` service (401 without a key) and switches
//! behavior on magic input texts:
//! - `__status_500`: HTTP 500 with a JSON error body
//! - `__not_json`: HTTP 200 with a plain-text body
//! - `__bad_shape`: HTTP 200 with an object lacking sentiment/confidence
//! - `__hang`: never responds
//! - `__delay_<ms>:<label>`: responds after `ms` with `sentiment = label`
//! - text containing "hate": negative, anything else: positive (0.95)

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// What the stub saw for one `/predict` call
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub body: Value,
    pub api_key: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Clone, Default)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct StubServer {
    addr: SocketAddr,
    state: StubState,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start() -> Self {
        let state = StubState::default();
        let app = Router::new()
            .route("/predict", post(predict))
            .route("/health", get(health))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("stub server should bind");
        let addr = listener.local_addr().expect("stub server address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn predict_url(&self) -> String {
        format!("http://{}/predict", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn predict(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let api_key = header(&headers, "x-api-key");
    state.requests.lock().unwrap().push(RecordedRequest {
        body: body.clone(),
        api_key: api_key.clone(),
        content_type: header(&headers, CONTENT_TYPE.as_str()),
    });

    if api_key.is_none() {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"}))).into_response();
    }

    let text = body.get("text").and_then(Value::as_str).unwrap_or_default();

    if let Some(rest) = text.strip_prefix("__delay_") {
        let (ms, label) = rest.split_once(':').unwrap_or((rest, "positive"));
        let ms: u64 = ms.parse().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(ms)).await;
        return Json(json!({"sentiment": label, "confidence": 0.5})).into_response();
    }

    match text {
        "__status_500" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Model not available"})),
        )
            .into_response(),
        "__not_json" => (StatusCode::OK, "definitely not json").into_response(),
        "__bad_shape" => Json(json!({"label": "pos", "score": "high"})).into_response(),
        "__hang" => {
            std::future::pending::<()>().await;
            StatusCode::GATEWAY_TIMEOUT.into_response()
        }
        t if t.contains("hate") => {
            Json(json!({"sentiment": "negative", "confidence": 0.9})).into_response()
        }
        _ => Json(json!({"sentiment": "positive", "confidence": 0.95})).into_response(),
    }
}

async fn health() -> Json<Value> {
    Json(json!({"status": "OK", "model_loaded": true, "version": "distilbert"}))
}
