//! In-process stand-in for the lead-generation backend.
//!
//! Accepts any method on any path, records what it received and answers with
//! whatever status and raw body the test configured.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header::COOKIE, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::task::JoinHandle;

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub cookie: Option<String>,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct BackendState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    reply: Arc<Mutex<(u16, String)>>,
}

pub struct FakeBackend {
    pub addr: SocketAddr,
    state: BackendState,
    handle: JoinHandle<()>,
}

async fn record_and_reply(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let recorded = RecordedRequest {
        method,
        path: uri.path().to_string(),
        cookie: headers
            .get(COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        content_type: headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    };
    state.requests.lock().unwrap().push(recorded);

    let (status, raw) = state.reply.lock().unwrap().clone();
    let status = StatusCode::from_u16(status).unwrap();
    (status, [("content-type", "application/json")], raw).into_response()
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = BackendState {
            requests: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(Mutex::new((200, r#"{"success":true}"#.to_string()))),
        };

        let router = Router::new()
            .route("/", any(record_and_reply))
            .route("/*path", any(record_and_reply))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("fake backend crashed");
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer every following request with `status` and the raw `body`.
    pub fn reply_with(&self, status: u16, body: &str) {
        *self.state.reply.lock().unwrap() = (status, body.to_string());
    }

    pub fn reply_json(&self, status: u16, body: serde_json::Value) {
        self.reply_with(status, &body.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}
