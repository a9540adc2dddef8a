use crate::interface_adapters::mock::MockApi;
use std::path::PathBuf;
use url::Url;

// Where `/api/*` requests go.
#[derive(Clone)]
pub enum ApiBackend {
    Proxy { http: reqwest::Client, target: Url },
    Mock(MockApi),
}

#[derive(Clone)]
pub struct AppState {
    pub api: ApiBackend,
    // Root of the built client bundle.
    pub static_dir: PathBuf,
}
