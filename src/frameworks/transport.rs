use crate::domain::{ApiTransport, TransportError};
use crate::frameworks::config::ApiMode;
use crate::interface_adapters::clients::HttpTransport;
use crate::interface_adapters::mock::MockApi;
use std::sync::Arc;
use std::time::Duration;

// Pick the forms' transport from configuration; nothing is patched at runtime.
pub fn api_transport(
    mode: ApiMode,
    base_url: &str,
    timeout: Duration,
) -> Result<Arc<dyn ApiTransport>, TransportError> {
    match mode {
        ApiMode::Proxy => {
            let transport = HttpTransport::new(base_url, timeout)
                .map_err(|e| TransportError::Transport(format!("failed to build http client: {e}")))?;
            tracing::debug!(base_url = %transport.base_url, "http transport configured.");
            Ok(Arc::new(transport))
        }
        ApiMode::Mock => {
            tracing::debug!("mock transport configured.");
            Ok(Arc::new(MockApi::default()))
        }
    }
}
