use crate::frameworks::config::{ApiMode, DevServerConfig};
use crate::interface_adapters::mock::MockApi;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{ApiBackend, AppState};
use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, config: DevServerConfig) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(&config)?;

    // Start the web server with the api and bundle routes wired up.
    let app = routes::app(state);

    tracing::info!(%address, mode = ?config.api_mode, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let config = DevServerConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        std::io::Error::other(e)
    })?;

    let address = SocketAddr::from(([127, 0, 0, 1], config.port));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, config).await
}

fn build_state(config: &DevServerConfig) -> Result<Arc<AppState>> {
    let api = match config.api_mode {
        ApiMode::Proxy => {
            // Redirects go back to the browser, not through the proxy.
            let http = reqwest::Client::builder()
                .timeout(config.api_timeout)
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .map_err(|e| std::io::Error::other(format!("failed to initialize proxy client: {e}")))?;
            tracing::debug!(
                target_url = %config.proxy_target,
                timeout_ms = config.api_timeout.as_millis(),
                "api proxy configured"
            );
            ApiBackend::Proxy {
                http,
                target: config.proxy_target.clone(),
            }
        }
        ApiMode::Mock => {
            tracing::warn!("serving /api from mock handlers");
            ApiBackend::Mock(MockApi::default())
        }
    };

    tracing::debug!(static_dir = %config.static_dir.display(), "bundle directory configured");

    Ok(Arc::new(AppState {
        api,
        static_dir: config.static_dir.clone(),
    }))
}
