// Shared helpers for booting servers on ephemeral ports in integration tests.
#![allow(dead_code)]

use std::{
    future::Future,
    path::PathBuf,
    sync::{Arc, OnceLock},
    time::Duration,
};

use axum::Router;

// Run `serve` on a dedicated thread with its own runtime and return the base URL
// once the socket accepts connections.
pub fn spawn_with<F, Fut>(serve: F) -> String
where
    F: FnOnce(tokio::net::TcpListener) -> Fut + Send + 'static,
    Fut: Future<Output = ()>,
{
    // Slot where the server thread publishes its selected URL.
    let published_url = Arc::new(OnceLock::<String>::new());
    let published_url_thread = Arc::clone(&published_url);

    // An OS thread keeps the server alive past individual `#[tokio::test]` runtimes.
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("test runtime");
        runtime.block_on(async move {
            // Bind to an ephemeral port to avoid collisions with local services.
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind ephemeral test port");
            let addr = listener.local_addr().expect("get local addr");
            let _ = published_url_thread.set(format!("http://{}", addr));
            serve(listener).await;
        });
    });

    wait_for_readiness(published_url)
}

pub fn spawn_router(app: Router) -> String {
    spawn_with(move |listener| async move {
        axum::serve(listener, app).await.expect("server failed");
    })
}

// Address nothing listens on, for transport-failure tests.
pub fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    format!("http://{}", addr)
}

// Bundle directory with an index page and one script, unique per test.
pub fn bundle_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "portal-client-it-{}-{name}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).expect("create bundle dir");
    std::fs::write(dir.join("index.html"), "<div id=\"root\"></div>").expect("write index.html");
    std::fs::write(dir.join("bundle.js"), "console.log('portal')").expect("write bundle.js");
    dir
}

fn wait_for_readiness(published_url: Arc<OnceLock<String>>) -> String {
    // Poll until the server thread publishes the base URL.
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://")
        .to_string();

    // Retry for a short period to avoid racing server bind/accept.
    for _ in 0..100 {
        if std::net::TcpStream::connect(&addr).is_ok() {
            return base_url;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
