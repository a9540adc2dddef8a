use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};
use url::Url;

// Dev server defaults, matching the old bundler setup.
pub const DEFAULT_DEV_SERVER_PORT: u16 = 8000;
pub const DEFAULT_PROXY_TARGET: &str = "http://localhost:4000";
pub const DEFAULT_STATIC_DIR: &str = "frontend/dist";
pub const DEFAULT_API_TIMEOUT_MS: u64 = 5000;

// How API calls are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    // Forward to the real backend.
    Proxy,
    // Answer from the canned mock handlers.
    Mock,
}

impl FromStr for ApiMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "proxy" | "http" => Ok(ApiMode::Proxy),
            "mock" => Ok(ApiMode::Mock),
            _ => Err(ConfigError::InvalidMode(value.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidUrl { var: &'static str, source: url::ParseError },
    InvalidMode(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidUrl { var, source } => write!(f, "{var} is not a valid url: {source}"),
            ConfigError::InvalidMode(value) => {
                write!(f, "API_MODE must be `proxy` or `mock`, got `{value}`")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct DevServerConfig {
    pub port: u16,
    pub api_mode: ApiMode,
    pub proxy_target: Url,
    pub static_dir: PathBuf,
    pub api_timeout: Duration,
}

impl DevServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: dev_server_port(),
            api_mode: api_mode()?,
            proxy_target: api_proxy_target()?,
            static_dir: static_dir(),
            api_timeout: api_timeout(),
        })
    }
}

pub fn dev_server_port() -> u16 {
    parse_or(env::var("DEV_SERVER_PORT").ok(), DEFAULT_DEV_SERVER_PORT)
}

pub fn api_mode() -> Result<ApiMode, ConfigError> {
    match env::var("API_MODE") {
        Ok(value) => value.parse(),
        Err(_) => Ok(ApiMode::Proxy),
    }
}

pub fn api_proxy_target() -> Result<Url, ConfigError> {
    let value = env::var("API_PROXY_TARGET").unwrap_or_else(|_| DEFAULT_PROXY_TARGET.to_string());
    parse_url("API_PROXY_TARGET", &value)
}

pub fn static_dir() -> PathBuf {
    env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR))
}

pub fn api_timeout() -> Duration {
    Duration::from_millis(parse_or(
        env::var("API_TIMEOUT_MS").ok(),
        DEFAULT_API_TIMEOUT_MS,
    ))
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn parse_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl { var, source })
}
