//! In-process stand-in for the PostgREST `posts` endpoint.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::any;

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone, Default)]
struct MockState {
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    replies: Arc<Mutex<HashMap<Method, (StatusCode, String)>>>,
}

pub struct MockBackend {
    pub base_url: String,
    state: MockState,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new()
            .route("/rest/v1/posts", any(record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Override the reply for every request with `method`.
    pub fn reply(&self, method: Method, status: StatusCode, body: &str) {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert(method, (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.recorded.lock().unwrap().clone()
    }
}

fn default_reply(method: &Method) -> (StatusCode, String) {
    match *method {
        Method::GET => (StatusCode::OK, "[]".to_string()),
        Method::POST => (StatusCode::CREATED, String::new()),
        _ => (StatusCode::NO_CONTENT, String::new()),
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: String,
) -> impl IntoResponse {
    let (status, reply) = state
        .replies
        .lock()
        .unwrap()
        .get(&method)
        .cloned()
        .unwrap_or_else(|| default_reply(&method));

    state.recorded.lock().unwrap().push(RecordedRequest {
        method,
        query,
        headers,
        body,
    });

    (status, [(header::CONTENT_TYPE, "application/json")], reply)
}
