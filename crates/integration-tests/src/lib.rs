//! Integration tests for StoreDesk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storedesk-integration-tests
//! ```
//!
//! Each test starts a [`MockApi`] on a random local port and points a
//! [`Console`] at it. The mock answers with canned JSON per method and path
//! and records every request, so tests can assert both on what the console
//! shows and on exactly what it sent.
//!
//! # Test Categories
//!
//! - `auth` - Sign-in, super-admin gate, sign-out
//! - `customers` - List, add, edit, confirmed delete
//! - `orders` - Pagination and status updates
//! - `products` - Fallback endpoint, payload coercion, filters
//! - `profile_settings` - Profile edit, two-factor, password change
//! - `shell` - Route gating and the dashboard summary

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use secrecy::SecretString;
use serde_json::{Value, json};
use storedesk_admin::models::SessionUser;
use storedesk_admin::{Console, ConsoleConfig, MemoryBackend, OAuthClientConfig, Shell};

/// Bearer token stored by [`MockApi::signed_in_console`].
pub const TEST_TOKEN: &str = "test-token";

/// A request the mock received.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    /// Path and query, relative to the API base.
    pub path: String,
    pub body: String,
    pub authorization: Option<String>,
}

impl Call {
    /// The body parsed as JSON, or `Null`.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone)]
struct Stub {
    method: Method,
    path: String,
    status: StatusCode,
    body: Value,
}

#[derive(Debug, Default)]
struct MockState {
    stubs: Mutex<Vec<Stub>>,
    calls: Mutex<Vec<Call>>,
}

/// In-process stand-in for the admin REST API.
#[derive(Debug)]
pub struct MockApi {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockApi {
    /// Bind to `127.0.0.1:0` and serve in the background.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, state }
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    /// Answer `method path` with `status` and `body`.
    ///
    /// `path` may carry a query; a stub with a query only matches that exact
    /// query, one without matches any. Later stubs win.
    pub fn stub(&self, method: Method, path: &str, status: u16, body: Value) {
        self.state.stubs.lock().unwrap().push(Stub {
            method,
            path: path.to_string(),
            status: StatusCode::from_u16(status).unwrap(),
            body,
        });
    }

    pub fn ok(&self, method: Method, path: &str, body: Value) {
        self.stub(method, path, 200, body);
    }

    /// Every request received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Requests whose method matches and whose path (query ignored) equals `path`.
    #[must_use]
    pub fn calls_to(&self, method: &Method, path: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| &c.method == method && strip_query(&c.path) == path)
            .collect()
    }

    /// Configuration pointing at the mock, with an OAuth client.
    #[must_use]
    pub fn config(&self) -> ConsoleConfig {
        ConsoleConfig::for_api_base(&self.base_url())
            .unwrap()
            .with_oauth(OAuthClientConfig::new("2", "client-secret"))
    }

    /// A console with an empty in-memory session.
    #[must_use]
    pub fn console(&self) -> Console {
        Console::with_backend(self.config(), MemoryBackend::default()).unwrap()
    }

    /// A console already signed in as [`super_admin`].
    #[must_use]
    pub fn signed_in_console(&self) -> Console {
        let console = self.console();
        console
            .session()
            .set(&SecretString::from(TEST_TOKEN), &super_admin())
            .unwrap();
        console
    }

    #[must_use]
    pub fn shell(&self) -> Shell {
        Shell::new(self.signed_in_console())
    }
}

/// The user returned for a successful super-admin sign-in.
#[must_use]
pub fn super_admin_json() -> Value {
    json!({
        "id": 4,
        "firstname": "Asha",
        "lastname": "Rao",
        "email": "asha@example.com",
        "mobile": "9876543210",
        "city": "Pune",
        "role": [{"id": 1, "name": "superadmin"}],
        "sys_admin": 0
    })
}

#[must_use]
pub fn super_admin() -> SessionUser {
    serde_json::from_value(super_admin_json()).unwrap()
}

/// A `/admin/login` success body for `user`.
#[must_use]
pub fn login_body(user: &Value) -> Value {
    json!({
        "tokenDetails": {"access_token": "issued-token", "token_type": "Bearer"},
        "userDetails": user,
        "message": "Login successful"
    })
}

fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(p, _)| p)
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let full = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);
    let path = full.strip_prefix("/api/v1").unwrap_or(&full).to_string();

    state.calls.lock().unwrap().push(Call {
        method: method.clone(),
        path: path.clone(),
        body,
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
    });

    let stubs = state.stubs.lock().unwrap();
    let matched = stubs.iter().rev().find(|s| {
        s.method == method && (s.path == path || (!s.path.contains('?') && s.path == strip_query(&path)))
    });
    match matched {
        Some(stub) => (stub.status, Json(stub.body.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("No stub for {method} {path}")})),
        )
            .into_response(),
    }
}
