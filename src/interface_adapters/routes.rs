use crate::interface_adapters::handlers::api::api;
use crate::interface_adapters::state::AppState;
use axum::{Router, routing::any};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};

pub const INDEX_FILE: &str = "index.html";

pub fn app(state: Arc<AppState>) -> Router {
    // Paths with no file in the bundle are client-side routes and get the index page.
    let bundle = ServeDir::new(&state.static_dir)
        .fallback(ServeFile::new(state.static_dir.join(INDEX_FILE)));

    // `/api/*` goes to the backend (or the mock); everything else is the bundle.
    Router::new()
        .route("/api", any(api))
        .route("/api/{*path}", any(api))
        .fallback_service(bundle)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface_adapters::mock::{MockApi, MockHandler};
    use crate::interface_adapters::state::ApiBackend;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use std::path::PathBuf;
    use tower::ServiceExt;

    // Per-test bundle directory under the system temp dir.
    fn bundle_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "portal-client-routes-{}-{name}",
            std::process::id()
        ));
        std::fs::create_dir_all(dir.join("static")).expect("expected bundle dir");
        std::fs::write(dir.join("index.html"), "<div id=\"root\"></div>")
            .expect("expected index.html");
        std::fs::write(dir.join("static").join("bundle.js"), "console.log(1)")
            .expect("expected bundle.js");
        std::fs::write(dir.join("my font.woff2"), "wOF2").expect("expected font file");
        dir
    }

    fn build_test_app(mock: MockApi, static_dir: PathBuf) -> Router {
        app(Arc::new(AppState {
            api: ApiBackend::Mock(mock),
            static_dir,
        }))
    }

    async fn body_text(response: axum::response::Response) -> String {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("expected response body");
        String::from_utf8(body.to_vec()).expect("expected utf-8 body")
    }

    #[tokio::test]
    async fn when_register_is_posted_in_mock_mode_then_returns_200_and_detail() {
        let app = build_test_app(MockApi::default(), bundle_dir("register-ok"));

        let request = Request::builder()
            .method("POST")
            .uri("/api/register")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"username":"amanda"}"#))
            .expect("expected request to build");

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload: Value =
            serde_json::from_str(&body_text(response).await).expect("expected json body");
        assert_eq!(payload["detail"], "Registration successful");
    }

    #[tokio::test]
    async fn when_mock_override_is_registered_then_returns_422_and_field_errors() {
        let mock = MockApi::default();
        mock.use_handler(MockHandler::post(
            "/api/register",
            422,
            json!({ "detail": { "email": ["This field is required."] } }),
        ));
        let app = build_test_app(mock, bundle_dir("register-422"));

        let request = Request::builder()
            .method("POST")
            .uri("/api/register")
            .body(Body::empty())
            .expect("expected request to build");

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload: Value =
            serde_json::from_str(&body_text(response).await).expect("expected json body");
        assert_eq!(payload["detail"]["email"][0], "This field is required.");
    }

    #[tokio::test]
    async fn when_asset_exists_then_it_is_served_with_content_type() {
        let app = build_test_app(MockApi::default(), bundle_dir("asset"));

        let request = Request::builder()
            .uri("/static/bundle.js")
            .body(Body::empty())
            .expect("expected request to build");

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()["content-type"]
            .to_str()
            .expect("expected ascii content type")
            .to_string();
        assert!(content_type.contains("javascript"), "{content_type}");
        assert_eq!(body_text(response).await, "console.log(1)");
    }

    #[tokio::test]
    async fn when_asset_name_is_percent_encoded_then_it_is_decoded() {
        let app = build_test_app(MockApi::default(), bundle_dir("encoded"));

        let request = Request::builder()
            .uri("/my%20font.woff2")
            .body(Body::empty())
            .expect("expected request to build");

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "wOF2");
    }

    #[tokio::test]
    async fn when_client_route_is_requested_then_index_is_served() {
        let app = build_test_app(MockApi::default(), bundle_dir("client-route"));

        let request = Request::builder()
            .uri("/profile")
            .body(Body::empty())
            .expect("expected request to build");

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "<div id=\"root\"></div>");
    }

    #[tokio::test]
    async fn when_root_is_requested_then_index_is_served() {
        let app = build_test_app(MockApi::default(), bundle_dir("root"));

        let request = Request::builder()
            .uri("/")
            .body(Body::empty())
            .expect("expected request to build");

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "<div id=\"root\"></div>");
    }

    #[tokio::test]
    async fn when_path_escapes_bundle_then_only_the_index_is_served() {
        let dir = bundle_dir("escape");
        std::fs::write(
            dir.parent().expect("expected temp parent").join("portal-client-secret.txt"),
            "secret",
        )
        .expect("expected file outside the bundle");
        let app = build_test_app(MockApi::default(), dir);

        let request = Request::builder()
            .uri("/static/../../portal-client-secret.txt")
            .body(Body::empty())
            .expect("expected request to build");

        let response = app.oneshot(request).await.unwrap();

        assert!(!body_text(response).await.contains("secret"));
    }

    #[tokio::test]
    async fn when_api_path_is_unhandled_then_mock_returns_404_instead_of_index() {
        let app = build_test_app(MockApi::default(), bundle_dir("api-miss"));

        let request = Request::builder()
            .uri("/api/nothing-here")
            .body(Body::empty())
            .expect("expected request to build");

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let payload: Value =
            serde_json::from_str(&body_text(response).await).expect("expected json body");
        assert!(payload["message"].is_string());
    }

    #[tokio::test]
    async fn when_proxy_upstream_is_down_then_returns_502() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("expected free port");
        let addr = listener.local_addr().expect("expected local addr");
        drop(listener);
        let target = url::Url::parse(&format!("http://{addr}")).expect("expected url");
        let app = app(Arc::new(AppState {
            api: ApiBackend::Proxy {
                http: reqwest::Client::new(),
                target,
            },
            static_dir: bundle_dir("proxy-down"),
        }));

        let request = Request::builder()
            .method("POST")
            .uri("/api/register")
            .body(Body::empty())
            .expect("expected request to build");

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let payload: Value =
            serde_json::from_str(&body_text(response).await).expect("expected json body");
        assert_eq!(payload["message"], "upstream unavailable");
    }
}
