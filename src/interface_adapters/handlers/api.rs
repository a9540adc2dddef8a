use crate::interface_adapters::mock::mock_response;
use crate::interface_adapters::protocol::ErrorResponse;
use crate::interface_adapters::state::{ApiBackend, AppState};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::fmt;
use std::sync::Arc;
use url::Url;

// Request headers worth forwarding to the backend.
const FORWARDED_HEADERS: [header::HeaderName; 3] =
    [header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT];

// Upstream response headers passed back to the browser. `Set-Cookie` may repeat.
const RETURNED_HEADERS: [header::HeaderName; 4] = [
    header::CONTENT_TYPE,
    header::LOCATION,
    header::WWW_AUTHENTICATE,
    header::SET_COOKIE,
];

#[derive(Debug)]
pub enum ProxyError {
    Url(url::ParseError),
    Upstream(reqwest::Error),
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::Url(err) => write!(f, "invalid upstream url: {err}"),
            ProxyError::Upstream(err) => write!(f, "upstream error: {err}"),
        }
    }
}

impl std::error::Error for ProxyError {}

#[tracing::instrument(
    name = "api",
    skip_all,
    fields(method = %method, path = %uri.path())
)]
pub async fn api(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match &state.api {
        ApiBackend::Mock(mock) => mock_response(mock, &method, &uri),
        ApiBackend::Proxy { http, target } => {
            match forward(http, target, method, &uri, &headers, body).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(error = %e, "failed to proxy api request.");
                    (
                        StatusCode::BAD_GATEWAY,
                        Json(ErrorResponse {
                            message: "upstream unavailable".to_string(),
                        }),
                    )
                        .into_response()
                }
            }
        }
    }
}

// Forward the request unchanged (path, query, body) to the backend origin.
async fn forward(
    http: &reqwest::Client,
    target: &Url,
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let path_and_query = uri
        .path_and_query()
        .map(|value| value.as_str())
        .unwrap_or_else(|| uri.path());
    let url = target.join(path_and_query).map_err(ProxyError::Url)?;

    let mut request = http.request(method, url);
    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(&name) {
            request = request.header(name, value.clone());
        }
    }

    let upstream = request
        .body(body)
        .send()
        .await
        .map_err(ProxyError::Upstream)?;
    let status = upstream.status();
    let mut returned = HeaderMap::new();
    for name in RETURNED_HEADERS {
        for value in upstream.headers().get_all(&name) {
            returned.append(name.clone(), value.clone());
        }
    }
    let bytes = upstream.bytes().await.map_err(ProxyError::Upstream)?;

    tracing::debug!(%status, "proxied api request.");

    let mut response = (status, bytes).into_response();
    for name in RETURNED_HEADERS {
        response.headers_mut().remove(&name);
    }
    response.headers_mut().extend(returned);
    Ok(response)
}
