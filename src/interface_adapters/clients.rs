use crate::domain::{ApiRequest, ApiResponse, ApiTransport, HttpMethod, TransportError};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;

// Pass-through transport: thin wrapper around reqwest for calls to the real backend.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    pub base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

fn reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn map_send_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Transport(err.to_string())
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn send(&self, req: ApiRequest) -> Result<ApiResponse, TransportError> {
        // Compose the backend URL and forward the JSON payload unchanged.
        let url = format!("{}{}", self.base_url, req.path);
        let mut builder = self.http.request(reqwest_method(req.method), url);
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }
        if let Some(token) = &req.bearer {
            builder = builder.bearer_auth(token);
        }

        let res = builder.send().await.map_err(map_send_error)?;
        let status = res.status().as_u16();

        // Keep the status for every response; the caller decides what 4xx/5xx mean.
        let bytes = res.bytes().await.map_err(map_send_error)?;
        if bytes.is_empty() {
            return Ok(ApiResponse::new(status, serde_json::Value::Null));
        }

        let body = serde_json::from_slice(&bytes)
            .map_err(|err| TransportError::Decode(err.to_string()))?;
        Ok(ApiResponse::new(status, body))
    }
}
