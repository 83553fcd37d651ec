// In-process stand-in for the shopping list HTTP API.
use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::storage::ListRecord;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Debug, Clone)]
struct Account {
    password: String,
    key: String,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    records: Vec<ListRecord>,
    requests: Vec<RecordedRequest>,
}

#[derive(Clone, Default)]
struct MockServerState {
    inner: Arc<Mutex<Inner>>,
}

impl MockServerState {
    fn record(&self, method: &Method, uri: &Uri, headers: &HeaderMap) {
        let authorization = headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        self.inner.lock().unwrap().requests.push(RecordedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            authorization,
        });
    }

    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        let Some(token) = headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Token "))
        else {
            return false;
        };
        self.inner
            .lock()
            .unwrap()
            .accounts
            .values()
            .any(|account| account.key == token)
    }
}

fn key_for(username: &str) -> String {
    format!("key-{}", username)
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct RegistrationPayload {
    username: String,
    #[allow(dead_code)]
    email: String,
    password1: String,
    password2: String,
}

#[derive(Debug, Serialize)]
struct KeyPayload {
    key: String,
}

async fn login_handler(
    State(state): State<MockServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<KeyPayload>, StatusCode> {
    state.record(&method, &uri, &headers);
    let inner = state.inner.lock().unwrap();
    match inner.accounts.get(&payload.username) {
        Some(account) if account.password == payload.password => Ok(Json(KeyPayload {
            key: account.key.clone(),
        })),
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

async fn registration_handler(
    State(state): State<MockServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(payload): Json<RegistrationPayload>,
) -> Result<(StatusCode, Json<KeyPayload>), StatusCode> {
    state.record(&method, &uri, &headers);
    if payload.password1 != payload.password2 {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut inner = state.inner.lock().unwrap();
    if inner.accounts.contains_key(&payload.username) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let key = key_for(&payload.username);
    inner.accounts.insert(
        payload.username,
        Account {
            password: payload.password1,
            key: key.clone(),
        },
    );
    Ok((StatusCode::CREATED, Json(KeyPayload { key })))
}

async fn list_get_handler(
    State(state): State<MockServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Json<Vec<ListRecord>>, StatusCode> {
    state.record(&method, &uri, &headers);
    if !state.is_authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(state.inner.lock().unwrap().records.clone()))
}

async fn list_put_handler(
    State(state): State<MockServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(records): Json<Vec<ListRecord>>,
) -> StatusCode {
    state.record(&method, &uri, &headers);
    if !state.is_authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    state.inner.lock().unwrap().records = records;
    StatusCode::NO_CONTENT
}

pub struct MockApiServer {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    state: MockServerState,
}

impl MockApiServer {
    pub async fn start() -> Self {
        let state = MockServerState::default();

        let app = Router::new()
            .route("/auth/login/", post(login_handler))
            .route("/auth/registration/", post(registration_handler))
            .route(
                "/shopping-list/",
                get(list_get_handler).put(list_put_handler),
            )
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap_or_else(|e| {
            panic!("Failed to bind mock server to 127.0.0.1:0. Error: {}", e);
        });
        let addr = listener.local_addr().unwrap();
        log::info!("Mock API server listening on {}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap_or_else(|e| {
                    log::error!("Mock API server error: {}", e);
                });
        });

        MockApiServer {
            addr,
            shutdown_tx,
            state,
        }
    }

    pub fn address(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Registers an account directly and returns its session key.
    pub fn add_user(&self, username: &str, password: &str) -> String {
        let key = key_for(username);
        self.state.inner.lock().unwrap().accounts.insert(
            username.to_string(),
            Account {
                password: password.to_string(),
                key: key.clone(),
            },
        );
        key
    }

    pub fn stored_records(&self) -> Vec<ListRecord> {
        self.state.inner.lock().unwrap().records.clone()
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.state.inner.lock().unwrap().requests.clone()
    }

    pub async fn shutdown(self) {
        if self.shutdown_tx.send(()).is_err() {
            log::warn!("Mock API server shutdown signal already sent or receiver dropped.");
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }
}
