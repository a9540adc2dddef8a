use crate::domain::{ApiRequest, ApiResponse, ApiTransport, HttpMethod, TransportError};
use crate::interface_adapters::protocol::ErrorResponse;
use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex, PoisonError};

// Canned reply for one method + path pair.
#[derive(Debug, Clone, PartialEq)]
pub struct MockHandler {
    pub method: HttpMethod,
    pub path: String,
    pub status: u16,
    pub body: Value,
}

impl MockHandler {
    pub fn new(method: HttpMethod, path: impl Into<String>, status: u16, body: Value) -> Self {
        Self {
            method,
            path: path.into(),
            status,
            body,
        }
    }

    pub fn get(path: impl Into<String>, status: u16, body: Value) -> Self {
        Self::new(HttpMethod::Get, path, status, body)
    }

    pub fn post(path: impl Into<String>, status: u16, body: Value) -> Self {
        Self::new(HttpMethod::Post, path, status, body)
    }

    fn matches(&self, method: HttpMethod, path: &str) -> bool {
        self.method == method && self.path == path
    }

    fn response(&self) -> ApiResponse {
        ApiResponse::new(self.status, self.body.clone())
    }
}

// Handlers every test starts from.
pub fn default_handlers() -> Vec<MockHandler> {
    vec![
        MockHandler::post(
            "/api/register",
            200,
            json!({ "detail": "Registration successful" }),
        ),
        MockHandler::post(
            "/api/login",
            200,
            json!({ "detail": "Welcome Amanda!", "token": "a long, totally legit token" }),
        ),
        MockHandler::get(
            "/api/profile",
            200,
            json!({ "username": "amanda", "first_name": "Amanda", "last_name": "Smith" }),
        ),
    ]
}

#[derive(Default)]
struct HandlerTable {
    initial: Vec<MockHandler>,
    // Newest first; consulted before `initial`.
    overrides: Vec<MockHandler>,
}

// Canned-response stand-in for the backend. Clones share one handler table,
// so a test can override a handler while a server built from a clone is running.
#[derive(Clone)]
pub struct MockApi {
    table: Arc<Mutex<HandlerTable>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new(default_handlers())
    }
}

impl MockApi {
    pub fn new(initial: Vec<MockHandler>) -> Self {
        Self {
            table: Arc::new(Mutex::new(HandlerTable {
                initial,
                overrides: Vec::new(),
            })),
        }
    }

    // Prepend a handler that wins over defaults and earlier overrides.
    pub fn use_handler(&self, handler: MockHandler) {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        table.overrides.insert(0, handler);
    }

    // Drop every override so the next test sees only the initial handlers.
    pub fn reset_handlers(&self) {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        table.overrides.clear();
    }

    pub fn override_count(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .overrides
            .len()
    }

    // Query strings are ignored when matching.
    pub fn resolve(&self, method: HttpMethod, path: &str) -> Option<ApiResponse> {
        let path = path.split('?').next().unwrap_or_default();
        let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        table
            .overrides
            .iter()
            .chain(table.initial.iter())
            .find(|handler| handler.matches(method, path))
            .map(MockHandler::response)
    }
}

#[async_trait]
impl ApiTransport for MockApi {
    async fn send(&self, req: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.resolve(req.method, &req.path).ok_or_else(|| {
            tracing::warn!(method = %req.method, path = %req.path, "unhandled mock request.");
            TransportError::Unhandled {
                method: req.method,
                path: req.path,
            }
        })
    }
}

// Serves the handler table over HTTP; used by the dev server in mock mode.
pub fn mock_response(mock: &MockApi, method: &Method, uri: &Uri) -> Response {
    let resolved = HttpMethod::parse(method.as_str())
        .and_then(|method| mock.resolve(method, uri.path()));

    let Some(response) = resolved else {
        tracing::warn!(%method, path = %uri.path(), "unhandled mock request.");
        let message = format!("no mock handler for {method} {}", uri.path());
        return (StatusCode::NOT_FOUND, Json(ErrorResponse { message })).into_response();
    };

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}

async fn mock_fallback(State(mock): State<MockApi>, method: Method, uri: Uri) -> Response {
    mock_response(&mock, &method, &uri)
}

// Standalone mock backend: every route is answered from the handler table.
pub fn router(mock: MockApi) -> Router {
    Router::new().fallback(mock_fallback).with_state(mock)
}
