use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::{ApiRequest, ApiResponse, ApiTransport, TransportError};

// Shared scripted transport for deterministic use-case tests.
#[derive(Clone)]
pub(crate) struct ScriptedTransport {
    result: Result<ApiResponse, TransportError>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn respond(status: u16, body: Value) -> Self {
        Self {
            result: Ok(ApiResponse::new(status, body)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn fail(err: TransportError) -> Self {
        Self {
            result: Err(err),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn send(&self, req: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(req);
        self.result.clone()
    }
}

// 422 body returned when every registration input was left blank.
pub(crate) fn all_fields_required() -> Value {
    json!({
        "detail": {
            "username": ["This field is required."],
            "first_name": ["This field is required."],
            "last_name": ["This field is required."],
            "email": ["This field is required."],
            "password": ["This field is required."],
            "password_confirmation": ["This field is required."],
        }
    })
}
