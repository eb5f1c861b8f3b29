//! In-process stub of the Lifeblood backend for tests
//!
//! Every request is recorded; responses are looked up by method and path and
//! default to `200 {"ok":true}`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::IntoResponse,
};
use serde_json::Value;

/// A request as seen by the stub
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub uri: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct Stub {
    calls: Arc<Mutex<Vec<Recorded>>>,
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

/// Stub backend listening on an ephemeral local port
pub struct StubServer {
    pub base_url: String,
    stub: Stub,
}

impl StubServer {
    /// Bind to `127.0.0.1:0` and serve in a background task
    pub async fn start() -> Self {
        let stub = Stub::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new().fallback(record).with_state(stub.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            stub,
        }
    }

    /// Register the response for a method and path (query string excluded)
    pub fn respond(&self, method: &str, path: &str, status: u16, body: &str) {
        self.stub.responses.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
    }

    /// Every request received so far, in arrival order
    pub fn calls(&self) -> Vec<Recorded> {
        self.stub.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Recorded {
        self.calls().last().cloned().expect("no request recorded")
    }
}

async fn record(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    stub.calls.lock().unwrap().push(Recorded {
        method: method.to_string(),
        uri: uri.to_string(),
        authorization: text(header::AUTHORIZATION),
        content_type: text(header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).ok(),
    });

    let (status, body) = stub
        .responses
        .lock()
        .unwrap()
        .get(&(method.to_string(), uri.path().to_string()))
        .cloned()
        .unwrap_or((200, r#"{"ok":true}"#.to_string()));

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}
