//! In-process stand-in for the finance API.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use finbot_tui::client::{Client, Session};

pub const TOKEN: &str = "test-token";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path without the `/api` prefix.
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct Shared {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

pub struct MockBackend {
    pub base_url: String,
    shared: Shared,
}

impl MockBackend {
    pub async fn start() -> Self {
        let shared = Shared::default();
        let app = Router::new().fallback(handle).with_state(shared.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            shared,
        }
    }

    pub fn client(&self) -> Client {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        Client::with_http(http, &self.base_url).unwrap()
    }

    /// Answers `method path` with `body` as JSON.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        self.shared
            .responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
    }

    /// Answers `method path` with `{"success": true, "data": data}`.
    pub fn respond_data(&self, method: &str, path: &str, data: Value) {
        self.respond(method, path, 200, json!({ "success": true, "data": data }));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|req| req.method == method && req.path == path)
            .collect()
    }
}

pub fn signed_in() -> Session {
    Session::new(Some(TOKEN.to_string()))
}

pub fn transaction_json(id: &str, amount: f64, kind: &str, category: &str) -> Value {
    json!({
        "_id": id,
        "amount": amount,
        "type": kind,
        "category": category,
        "description": "",
        "source": "web",
        "createdAt": "2026-10-17T03:00:00.000Z"
    })
}

async fn handle(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix("/api")
        .unwrap_or(uri.path())
        .to_string();
    let recorded = Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };
    shared.requests.lock().unwrap().push(recorded);

    let canned = shared
        .responses
        .lock()
        .unwrap()
        .get(&(method.to_string(), path))
        .cloned();
    let (status, body) = canned.unwrap_or_else(|| {
        (
            200,
            json!({ "success": true, "message": "ok" }).to_string(),
        )
    });

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}
